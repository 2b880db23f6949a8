use anyhow::Result;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

use super::PolicyResult;
use super::tester::efficiency_pct;

struct PolicyTotals {
    runs: usize,
    deaths: usize,
    score_sum: f64,
    best_sum: f64,
}

/// Fold per-seed results into one line per policy, in first-seen order.
fn totals_by_policy(results: &[PolicyResult]) -> Vec<(String, PolicyTotals)> {
    let mut order: Vec<String> = Vec::new();
    let mut totals: BTreeMap<String, PolicyTotals> = BTreeMap::new();
    for result in results {
        let entry = totals
            .entry(result.policy_name.clone())
            .or_insert_with(|| {
                order.push(result.policy_name.clone());
                PolicyTotals {
                    runs: 0,
                    deaths: 0,
                    score_sum: 0.0,
                    best_sum: 0.0,
                }
            });
        let runs = result.runs.len();
        #[allow(clippy::cast_precision_loss)]
        let weight = runs as f64;
        entry.runs += runs;
        entry.deaths += result.deaths;
        entry.score_sum += result.average_score * weight;
        entry.best_sum += result.average_best_score * weight;
    }
    order
        .into_iter()
        .filter_map(|name| totals.remove(&name).map(|t| (name, t)))
        .collect()
}

fn efficiency_label(efficiency: Option<f64>) -> String {
    efficiency.map_or_else(|| "n/a".to_string(), |pct| format!("{pct:.1}%"))
}

fn success_rate(results: &[PolicyResult]) -> f64 {
    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = (passed as f64 / total as f64) * 100.0;
    rate
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[PolicyResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Policy Test Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==============================".cyan())?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();
    let failed_tests = total_tests - passed_tests;

    writeln!(out, "Total policy runs: {total_tests}")?;
    writeln!(out, "Passed: {}", passed_tests.to_string().green())?;
    writeln!(out, "Failed: {}", failed_tests.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };

        writeln!(
            out,
            "{} {} (seed {} / {})",
            status,
            result.policy_name.bold(),
            result.seed,
            result.share_code.as_deref().unwrap_or("-")
        )?;
        writeln!(
            out,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(
            out,
            "   Average score: {:.1} of {:.1} possible ({})",
            result.average_score,
            result.average_best_score,
            efficiency_label(result.efficiency())
        )?;
        if result.deaths > 0 {
            writeln!(out, "   Hair fried: {}", result.deaths.to_string().red())?;
        }
        writeln!(out, "   Average time: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    let totals = totals_by_policy(results);
    if !totals.is_empty() {
        writeln!(out, "{}", "🏆 Policy Efficiency".bright_yellow().bold())?;
        writeln!(out, "{}", "====================".yellow())?;
        for (name, t) in &totals {
            writeln!(
                out,
                "{:<18} {:>7}  runs {:>4}  fried {:>3}",
                name,
                efficiency_label(efficiency_pct(t.score_sum, t.best_sum)),
                t.runs,
                t.deaths
            )?;
        }
    }

    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[PolicyResult]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[PolicyResult]) -> Result<()> {
    writeln!(out, "# Shampoo Strategist Policy Results\n")?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();
    let failed_tests = total_tests - passed_tests;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total policy runs**: {total_tests}")?;
    writeln!(out, "- **Passed**: {passed_tests}")?;
    writeln!(out, "- **Failed**: {failed_tests}")?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(out, "## Efficiency\n")?;
    writeln!(out, "| Policy | Runs | Fried | Efficiency |")?;
    writeln!(out, "|---|---:|---:|---:|")?;
    for (name, t) in totals_by_policy(results) {
        writeln!(
            out,
            "| {name} | {} | {} | {} |",
            t.runs,
            t.deaths,
            efficiency_label(efficiency_pct(t.score_sum, t.best_sum))
        )?;
    }
    writeln!(out)?;

    writeln!(out, "## Detailed Results\n")?;

    for result in results {
        let status = if result.passed { "✅" } else { "❌" };

        writeln!(
            out,
            "### {} {} (seed {}, `{}`)\n",
            status,
            result.policy_name,
            result.seed,
            result.share_code.as_deref().unwrap_or("-")
        )?;
        writeln!(
            out,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(
            out,
            "- **Average score**: {:.1} / {:.1} ({})",
            result.average_score,
            result.average_best_score,
            efficiency_label(result.efficiency())
        )?;
        writeln!(out, "- **Average time**: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, results: &[PolicyResult]) -> Result<()> {
    writeln!(
        out,
        "policy,seed,ending,final_score,best_score,efficiency_pct,rating,days_played,player_path,best_path"
    )?;
    for run in results.iter().flat_map(|r| &r.runs) {
        let efficiency = run
            .efficiency_pct
            .map(|pct| pct.to_string())
            .unwrap_or_default();
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{}",
            run.policy,
            run.seed,
            run.ending,
            run.final_score,
            run.best_score,
            efficiency,
            run.rating.label(),
            run.days_played,
            run.player_path,
            run.best_path
        )?;
    }
    Ok(())
}
