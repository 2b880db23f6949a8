mod logic;
mod util;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use shampoo_game::GameConfig;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use logic::seeds::SeedInfo;
use logic::{GameplayStrategy, LogicTester, PolicyResult, resolve_seed_inputs};
use util::split_csv;

#[derive(Debug, Parser)]
#[command(name = "shampoo-tester", version = "0.1.0")]
#[command(
    about = "Automated playthroughs for Shampoo Strategist - scripted policies scored against the solver"
)]
struct Args {
    /// Policies to run (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    policies: String,

    /// List all available policies and exit
    #[arg(long)]
    list_policies: bool,

    /// Seeds to run (comma-separated numbers or share codes, "all" for every code)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of consecutive seeds played per listed seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON file overriding game rules; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of days per game (overrides the config file)
    #[arg(long)]
    days: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_policies(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let config = load_config(&args)?;
    let strategies = expand_policies(&args.policies)?;
    let seed_infos = resolve_seed_inputs(&split_csv(&args.seeds))?;
    log::info!(
        "running {} policies over {} seeds x {} iterations ({} days)",
        strategies.len(),
        seed_infos.len(),
        args.iterations,
        config.total_days
    );

    let results = run_policies(&args, &config, &strategies, &seed_infos);

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_policies(args: &Args) -> Result<bool> {
    if !args.list_policies {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available policies:")?;
    for strategy in GameplayStrategy::ALL {
        writeln!(
            output_target.writer(),
            "  {:20} - {}",
            strategy.key(),
            strategy.description()
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🧴 Shampoo Strategist Automated Tester".bright_cyan().bold());
    println!("{}", "======================================".cyan());
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GameConfig::from_json(&raw)
                .with_context(|| format!("invalid game config {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    if let Some(days) = args.days {
        config = config.with_total_days(days);
    }
    config.validate().context("invalid game configuration")?;
    Ok(config)
}

fn expand_policies(policies_arg: &str) -> Result<Vec<GameplayStrategy>> {
    let mut strategies: Vec<GameplayStrategy> = Vec::new();
    for token in split_csv(policies_arg) {
        if token.eq_ignore_ascii_case("all") {
            for strategy in GameplayStrategy::ALL {
                if !strategies.contains(&strategy) {
                    strategies.push(strategy);
                }
            }
            continue;
        }
        match GameplayStrategy::from_key(&token) {
            Some(strategy) if !strategies.contains(&strategy) => strategies.push(strategy),
            Some(_) => {}
            None => eprintln!("⚠️  Unknown policy: {}", token.yellow()),
        }
    }
    if strategies.is_empty() {
        bail!("no known policies selected (try --list-policies)");
    }
    Ok(strategies)
}

fn run_policies(
    args: &Args,
    config: &GameConfig,
    strategies: &[GameplayStrategy],
    seed_infos: &[SeedInfo],
) -> Vec<PolicyResult> {
    println!("{}", "🧠 Running Policies".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let tester = LogicTester::new(config.clone(), args.verbose);
    strategies
        .iter()
        .flat_map(|strategy| tester.run_policy(*strategy, seed_infos, args.iterations))
        .collect()
}

fn write_reports(args: &Args, results: &[PolicyResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Shampoo Strategist Policy Results\n\n_No policies executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        "csv" => logic::reports::generate_csv_report(&mut output_target, results)?,
        _ => {
            let duration = start_time.elapsed();
            if results.is_empty() {
                writeln!(&mut output_target, "No policies executed.")?;
            } else {
                logic::reports::generate_console_report(&mut output_target, results, duration)?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
