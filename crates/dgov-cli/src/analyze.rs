//! # Analyze Subcommand
//!
//! Scores one company read from a JSON file.
//!
//! The company file is a record-store company dictionary. Its filings come
//! from `--filings` (a JSON array) when given, otherwise from the record's
//! embedded `annual_reports`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use dgov_analyzer::{AnalyzerConfig, ComplianceAnalyzer, Framework, ScoreTree};
use dgov_core::{CompanyRecord, FilingRecord};

/// Arguments for the `dgov analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Company record JSON file.
    #[arg(long, value_name = "FILE")]
    pub company: PathBuf,

    /// JSON array of filings; replaces the record's `annual_reports`.
    #[arg(long, value_name = "FILE")]
    pub filings: Option<PathBuf>,

    /// Judge filing recency against this year instead of the current one.
    #[arg(long)]
    pub reference_year: Option<i32>,

    /// Include the derived scoring factors in the output.
    #[arg(long)]
    pub explain: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the analyze subcommand.
pub fn run_analyze(args: &AnalyzeArgs, config: AnalyzerConfig) -> Result<u8> {
    let output = analyze_to_value(args, config)?;
    crate::emit_json(&output, args.pretty, None)?;
    Ok(0)
}

/// Compute the JSON document `run_analyze` prints.
pub fn analyze_to_value(args: &AnalyzeArgs, config: AnalyzerConfig) -> Result<Value> {
    let config = crate::override_reference_year(config, args.reference_year);
    let analyzer = ComplianceAnalyzer::with_config(config).context("invalid analyzer configuration")?;

    let mut record: CompanyRecord = crate::read_json(&args.company)?;
    if let Some(path) = &args.filings {
        let filings: Vec<FilingRecord> = crate::read_json(path)?;
        record.annual_reports = filings;
    }

    tracing::info!(
        company = %record.profile.name,
        filings = record.annual_reports.len(),
        reference_year = %analyzer.reference_year(),
        "analyzing company"
    );

    let value = if args.explain {
        let analysis = analyzer.explain(&record.profile, &record.annual_reports);
        log_summary(&analysis.scores);
        serde_json::to_value(&analysis)
    } else {
        let scores = analyzer.analyze_record(&record);
        log_summary(&scores);
        serde_json::to_value(scores)
    };
    value.context("failed to serialize scores")
}

fn log_summary(scores: &ScoreTree) {
    tracing::info!("averages: {}", averages_line(scores));
}

/// Per-framework averages, e.g. `ISO/IEC 27001: 88, SOC 2: 90`.
fn averages_line(scores: &ScoreTree) -> String {
    Framework::all()
        .iter()
        .map(|fw| format!("{}: {}", fw.label(), scores.framework_average(*fw)))
        .collect::<Vec<_>>()
        .join(", ")
}
