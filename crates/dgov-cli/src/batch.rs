//! # Batch Subcommand
//!
//! Scores every company in a JSON array of company records (each with
//! embedded `annual_reports`) using a single analyzer, so repeated
//! companies are served from the cache exactly as in a long-running service.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use dgov_analyzer::{AnalyzerConfig, CacheStats, ComplianceAnalyzer, ScoreTree};
use dgov_core::{CompanyId, CompanyRecord};

/// Arguments for the `dgov batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON array of company records.
    #[arg(long, value_name = "FILE")]
    pub input: PathBuf,

    /// Write results here instead of stdout.
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Judge filing recency against this year instead of the current one.
    #[arg(long)]
    pub reference_year: Option<i32>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,
}

/// One scored company in the batch output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    pub id: Option<CompanyId>,
    pub name: String,
    pub scores: ScoreTree,
}

/// Batch results in input order, plus cache counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub results: Vec<BatchEntry>,
    pub cache: CacheStats,
}

/// Execute the batch subcommand.
pub fn run_batch(args: &BatchArgs, config: AnalyzerConfig) -> Result<u8> {
    let report = score_batch(args, config)?;
    crate::emit_json(&report, args.pretty, args.output.as_deref())?;
    if let Some(path) = &args.output {
        tracing::info!(path = %path.display(), companies = report.results.len(), "wrote batch scores");
    }
    Ok(0)
}

/// Score every record in the input file.
pub fn score_batch(args: &BatchArgs, config: AnalyzerConfig) -> Result<BatchReport> {
    let config = crate::override_reference_year(config, args.reference_year);
    let analyzer = ComplianceAnalyzer::with_config(config).context("invalid analyzer configuration")?;
    let records: Vec<CompanyRecord> = crate::read_json(&args.input)?;

    let results = records
        .iter()
        .map(|record| BatchEntry {
            id: record.profile.id.clone(),
            name: record.profile.name.clone(),
            scores: analyzer.analyze_record(record),
        })
        .collect();

    let cache = analyzer.cache_stats();
    tracing::info!(
        companies = records.len(),
        hits = cache.hits,
        misses = cache.misses,
        entries = cache.entries,
        cache_key = %analyzer.config().cache.key,
        "batch scored"
    );
    Ok(BatchReport { results, cache })
}
