//! taper-cli: command-line evaluation of block-decay configs.
//!
//! Loads a JSON block-decay config and prints the decayed amount at a block,
//! the fully decayed amount, or a schedule over a block range.

use std::path::{Path, PathBuf};
use std::process;

use alloy_primitives::U256;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use taper_core::constants::DEFAULT_SCHEDULE_STEP;
use taper_core::types::{BlockDecayConfig, PartialBlockDecayConfig};
use taper_decay::{decay_schedule, evaluate_at, evaluate_at_full_decay};
use tracing::{debug, error, warn};

/// Evaluate Dutch auction block-decay curves exactly as the settlement contract does.
#[derive(Parser, Debug)]
#[command(name = "taper-cli", version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "error", global = true)]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, default_value = "text", global = true)]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decayed amount at a block.
    At(AtArgs),
    /// Amount once decay has fully elapsed.
    End(EndArgs),
    /// Decayed amounts over a block range.
    Schedule(ScheduleArgs),
}

#[derive(Args, Debug)]
struct AtArgs {
    /// Path to a JSON block-decay config.
    #[arg(short, long)]
    config: PathBuf,

    /// Absolute block height to evaluate at.
    #[arg(short, long)]
    block: u64,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct EndArgs {
    /// Path to a JSON block-decay config. Only startAmount and relativeAmounts are required.
    #[arg(short, long)]
    config: PathBuf,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ScheduleArgs {
    /// Path to a JSON block-decay config.
    #[arg(short, long)]
    config: PathBuf,

    /// First block of the range (inclusive).
    #[arg(long)]
    from: u64,

    /// Last block of the range (inclusive).
    #[arg(long)]
    to: u64,

    /// Blocks between rows.
    #[arg(long, default_value_t = DEFAULT_SCHEDULE_STEP)]
    step: u64,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    match run(&cli.command) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            error!("{e:#}");
            process::exit(1);
        }
    }
}

/// Execute a command and render its output.
fn run(command: &Commands) -> Result<String> {
    match command {
        Commands::At(args) => run_at(args),
        Commands::End(args) => run_end(args),
        Commands::Schedule(args) => run_schedule(args),
    }
}

fn run_at(args: &AtArgs) -> Result<String> {
    let config: BlockDecayConfig = load_config(&args.config)?;
    check_curve(&config);
    let amount = evaluate_at(&config, args.block)
        .with_context(|| format!("evaluating {} at block {}", args.config.display(), args.block))?;
    debug!(block = args.block, %amount, "evaluated");

    if args.json {
        Ok(serde_json::json!({ "block": args.block, "amount": amount.to_string() }).to_string())
    } else {
        Ok(amount.to_string())
    }
}

fn run_end(args: &EndArgs) -> Result<String> {
    let config: PartialBlockDecayConfig = load_config(&args.config)?;
    let amount = evaluate_at_full_decay(&config)
        .with_context(|| format!("computing end amount of {}", args.config.display()))?;

    if args.json {
        let end_block = BlockDecayConfig::try_from(config)
            .ok()
            .and_then(|full| full.decay_end_block());
        Ok(serde_json::json!({ "endBlock": end_block, "amount": amount.to_string() }).to_string())
    } else {
        Ok(amount.to_string())
    }
}

fn run_schedule(args: &ScheduleArgs) -> Result<String> {
    let config: BlockDecayConfig = load_config(&args.config)?;
    check_curve(&config);
    let rows = decay_schedule(&config, args.from, args.to, args.step)
        .with_context(|| format!("building schedule for {}", args.config.display()))?;

    if args.json {
        let rows: Vec<_> = rows
            .iter()
            .map(|(block, amount)| serde_json::json!({ "block": block, "amount": amount.to_string() }))
            .collect();
        Ok(serde_json::Value::Array(rows).to_string())
    } else {
        Ok(render_rows(&rows))
    }
}

/// One `block amount` line per row.
fn render_rows(rows: &[(u64, U256)]) -> String {
    rows.iter()
        .map(|(block, amount)| format!("{block} {amount}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Warn about curves whose result follows the scan rule rather than the intended shape.
fn check_curve(config: &BlockDecayConfig) {
    if let Ok(curve) = config.curve() {
        if !curve.is_ascending() {
            warn!(
                relative_blocks = ?curve.relative_blocks(),
                "relative blocks are not strictly ascending"
            );
        }
    }
}

/// Read and parse a JSON config file.
fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so stdout carries only command output.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
