//! # Analyzer Configuration
//!
//! ```yaml
//! reference_year: 2025          # omit for the current UTC year
//! cache:
//!   enabled: true
//!   capacity: 10000             # omit for unbounded
//!   key: filing_count           # or content_digest
//! ```
//!
//! Every field has a default, so an empty document is a valid config.
//! Unknown fields are rejected to catch typos early.

use std::path::Path;

use serde::{Deserialize, Serialize};

use dgov_core::{DgovError, ReferenceYear};

use crate::cache::CacheKeyStrategy;

/// Score cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Maximum number of entries; `None` is unbounded.
    pub capacity: Option<usize>,
    pub key: CacheKeyStrategy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: None,
            key: CacheKeyStrategy::FilingCount,
        }
    }
}

/// Top-level analyzer settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Pinned reference year; `None` follows the wall clock.
    pub reference_year: Option<i32>,
    pub cache: CacheConfig,
}

impl AnalyzerConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, DgovError> {
        let config: Self = serde_yaml::from_str(text)
            .map_err(|e| DgovError::Config(format!("invalid YAML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, DgovError> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| DgovError::Config(format!("invalid JSON config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file. `.json` is parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, DgovError> {
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), DgovError> {
        self.pinned_year()?;
        if self.cache.capacity == Some(0) {
            return Err(DgovError::Config(
                "cache.capacity must be positive; omit it for an unbounded cache".into(),
            ));
        }
        Ok(())
    }

    /// The configured reference year, validated.
    pub fn pinned_year(&self) -> Result<Option<ReferenceYear>, DgovError> {
        self.reference_year.map(ReferenceYear::fixed).transpose()
    }

    /// Builder used by callers that override file values.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn with_cache_key(mut self, key: CacheKeyStrategy) -> Self {
        self.cache.key = key;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache.capacity = Some(capacity);
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache.enabled = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(AnalyzerConfig::from_yaml_str("{}").unwrap(), AnalyzerConfig::default());
        assert_eq!(AnalyzerConfig::from_json_str("{}").unwrap(), AnalyzerConfig::default());
    }

    #[test]
    fn defaults() {
        let c = AnalyzerConfig::default();
        assert_eq!(c.reference_year, None);
        assert!(c.cache.enabled);
        assert_eq!(c.cache.capacity, None);
        assert_eq!(c.cache.key, CacheKeyStrategy::FilingCount);
    }

    #[test]
    fn full_yaml() {
        let c = AnalyzerConfig::from_yaml_str(
            "reference_year: 2025\ncache:\n  enabled: false\n  capacity: 16\n  key: content_digest\n",
        )
        .unwrap();
        assert_eq!(c.reference_year, Some(2025));
        assert!(!c.cache.enabled);
        assert_eq!(c.cache.capacity, Some(16));
        assert_eq!(c.cache.key, CacheKeyStrategy::ContentDigest);
    }

    #[test]
    fn partial_cache_section_keeps_defaults() {
        let c = AnalyzerConfig::from_yaml_str("cache:\n  capacity: 4\n").unwrap();
        assert!(c.cache.enabled);
        assert_eq!(c.cache.key, CacheKeyStrategy::FilingCount);
    }

    #[test]
    fn unknown_fields_rejected() {
        let err = AnalyzerConfig::from_yaml_str("refrence_year: 2025\n").unwrap_err();
        assert!(matches!(err, DgovError::Config(_)));
        assert!(AnalyzerConfig::from_json_str(r#"{"cache":{"size":3}}"#).is_err());
    }

    #[test]
    fn unknown_key_strategy_rejected() {
        assert!(AnalyzerConfig::from_yaml_str("cache:\n  key: name\n").is_err());
    }

    #[test]
    fn zero_capacity_rejected() {
        let err = AnalyzerConfig::from_json_str(r#"{"cache":{"capacity":0}}"#).unwrap_err();
        assert!(err.to_string().contains("cache.capacity"));
    }

    #[test]
    fn out_of_range_year_rejected() {
        assert!(AnalyzerConfig::from_yaml_str("reference_year: 1800\n").is_err());
        assert!(AnalyzerConfig::from_yaml_str("reference_year: 10000\n").is_err());
    }

    #[test]
    fn load_picks_parser_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("analyzer.json");
        std::fs::write(&json, r#"{"reference_year": 2024}"#).unwrap();
        assert_eq!(AnalyzerConfig::load(&json).unwrap().reference_year, Some(2024));

        let yaml = dir.path().join("analyzer.yaml");
        std::fs::write(&yaml, "reference_year: 2023\n").unwrap();
        assert_eq!(AnalyzerConfig::load(&yaml).unwrap().reference_year, Some(2023));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AnalyzerConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, DgovError::Io(_)));
    }
}
