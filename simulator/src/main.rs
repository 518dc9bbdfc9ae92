use anyhow::{Context, Result};
use clap::Parser;
use croupier_simulator::{render_table, run_grid, GridConfig, Statistic};
use croupier_types::{KerebelMode, Strategy};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML file with sweep settings; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Strategy to simulate (repeatable).
    #[arg(short, long = "strategy")]
    strategies: Vec<Strategy>,

    /// Objective as a multiple of the initial money (repeatable).
    #[arg(short, long = "objective")]
    objectives: Vec<f64>,

    #[arg(long)]
    initial_money: Option<f64>,

    /// Trials per (strategy, objective) cell.
    #[arg(short, long)]
    trials: Option<u64>,

    /// Seed shared by every cell (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    kerebel_mode: Option<KerebelMode>,

    /// Write the report as JSON to this path.
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(path: &Path) -> Result<GridConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_yaml::from_str(&raw).with_context(|| format!("failed to parse config {}", path.display()))
}

fn build_config(args: &Args) -> Result<GridConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GridConfig::default(),
    };
    if !args.strategies.is_empty() {
        config.strategies = args.strategies.clone();
    }
    if !args.objectives.is_empty() {
        config.objectives = args.objectives.clone();
    }
    if let Some(initial_money) = args.initial_money {
        config.initial_money = initial_money;
    }
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(mode) = args.kerebel_mode {
        config.params.kerebel_mode = mode;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn init_tracing(level: &str) -> Result<()> {
    let level: tracing::Level = level
        .parse()
        .map_err(|err| anyhow::anyhow!("invalid log level {level:?}: {err}"))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args)?;
    init_tracing(&config.log_level)?;

    let report = run_grid(&config).context("simulation failed")?;
    for statistic in Statistic::ALL {
        println!("{}", render_table(&report, statistic));
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }
    Ok(())
}
