use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "shampoo-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_policies_writes_output() {
    let exe = env!("CARGO_BIN_EXE_shampoo-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-policies", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available policies"));
    assert!(content.contains("high-stakes"));
}

#[test]
fn cli_runs_policies_and_writes_json_report() {
    let exe = env!("CARGO_BIN_EXE_shampoo-tester");
    let output_path = temp_path("run");
    let output = Command::new(exe)
        .args([
            "--policies",
            "oracle,always-wait",
            "--seeds",
            "7,SH-LATHER42",
            "--iterations",
            "2",
            "--days",
            "6",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Shampoo Strategist Automated Tester"));

    let content = std::fs::read_to_string(output_path).expect("read output");
    let report: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let results = report.as_array().expect("array of results");
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r["passed"] == true));
    assert!(
        results
            .iter()
            .any(|r| r["share_code"] == "SH-LATHER42" && r["strategy"] == "oracle")
    );
    for result in results {
        for run in result["runs"].as_array().expect("runs") {
            assert_eq!(run["player_path"].as_str().map(str::len), Some(6));
        }
    }
}

#[test]
fn cli_rejects_invalid_day_count() {
    let exe = env!("CARGO_BIN_EXE_shampoo-tester");
    let output = Command::new(exe)
        .args(["--days", "1", "--iterations", "1"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid game configuration"));
}
