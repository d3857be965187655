//! # dgov CLI entry point
//!
//! Parses command-line arguments, initialises tracing and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dgov_cli::analyze::{run_analyze, AnalyzeArgs};
use dgov_cli::baselines::{run_baselines, BaselinesArgs};
use dgov_cli::batch::{run_batch, BatchArgs};

/// Data governance compliance scoring.
///
/// Scores companies against ISO/IEC 27001, ISO/IEC 27017, SOC 2 and internal
/// policy baselines from their record-store JSON.
#[derive(Parser, Debug)]
#[command(name = "dgov", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Analyzer configuration file (YAML, or JSON by `.json` extension).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one company record.
    Analyze(AnalyzeArgs),

    /// Score a JSON array of company records with a shared cache.
    Batch(BatchArgs),

    /// Print the industry baseline table.
    Baselines(BaselinesArgs),
}

fn verbosity_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(verbosity_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .with_target(false);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "dgov starting");

    let result = match cli.command {
        Commands::Analyze(args) => {
            dgov_cli::load_config(cli.config.as_deref()).and_then(|config| run_analyze(&args, config))
        }
        Commands::Batch(args) => {
            dgov_cli::load_config(cli.config.as_deref()).and_then(|config| run_batch(&args, config))
        }
        Commands::Baselines(args) => run_baselines(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
