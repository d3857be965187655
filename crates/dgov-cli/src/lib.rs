//! # dgov-cli: Command-Line Interface for the Data Governance Stack
//!
//! Runs the compliance analyzer outside the web layer, on JSON records
//! exported from the record store.
//!
//! ## Subcommands
//!
//! - `dgov analyze`: Score one company.
//! - `dgov batch`: Score every company in a JSON array with one analyzer.
//! - `dgov baselines`: Print the industry baseline table.
//!
//! ```bash
//! dgov analyze --company acme.json --reference-year 2025 --pretty
//! dgov --config analyzer.yaml batch --input companies.json --output scores.json
//! dgov baselines
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; scoring lives in `dgov-analyzer`.
//! - Handlers return `anyhow::Result<u8>`; the binary maps it to an exit code.
//! - Results go to stdout or `--output`; logs go to stderr.

pub mod analyze;
pub mod baselines;
pub mod batch;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use dgov_analyzer::AnalyzerConfig;

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON: {}", path.display()))
}

/// Render a value as compact or pretty JSON.
pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.context("failed to serialize output")
}

/// Write rendered JSON to `output`, or to stdout when no path is given.
pub fn emit_json<T: Serialize>(value: &T, pretty: bool, output: Option<&Path>) -> Result<()> {
    let mut text = render_json(value, pretty)?;
    text.push('\n');
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("failed to write to stdout")
        }
    }
}

/// Analyzer settings from `--config`, or defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    match path {
        Some(path) => AnalyzerConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display())),
        None => Ok(AnalyzerConfig::default()),
    }
}

/// Apply a command-line reference year on top of file settings.
pub fn override_reference_year(config: AnalyzerConfig, year: Option<i32>) -> AnalyzerConfig {
    match year {
        Some(year) => config.with_reference_year(year),
        None => config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_defaults_without_path() {
        assert_eq!(load_config(None).unwrap(), AnalyzerConfig::default());
    }

    #[test]
    fn load_config_reports_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "cache: [").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("bad.yaml"));
    }

    #[test]
    fn cli_year_overrides_file_year() {
        let config = AnalyzerConfig::default().with_reference_year(2020);
        assert_eq!(override_reference_year(config.clone(), Some(2025)).reference_year, Some(2025));
        assert_eq!(override_reference_year(config, None).reference_year, Some(2020));
    }

    #[test]
    fn read_json_names_file_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("company.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = read_json::<serde_json::Value>(&path).unwrap_err();
        assert!(format!("{err:#}").contains("company.json"));
    }

    #[test]
    fn emit_json_writes_file_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        emit_json(&serde_json::json!({"a": 1}), false, Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"a\":1}\n");
    }
}
