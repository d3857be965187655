//! # Compliance Analyzer
//!
//! The public entry point. A [`ComplianceAnalyzer`] owns its configuration
//! and its score cache; there is no global state, and two analyzers never
//! share entries.
//!
//! ## Pipeline
//!
//! ```text
//! cache lookup ─hit─▶ cached tree
//!      │ miss
//!      ▼
//! AnalysisFactors::derive ─▶ frameworks::score_tree ─▶ cache insert ─▶ tree
//! ```
//!
//! `analyze` never fails. Missing fields are defaulted by the record types
//! and every leaf is clamped into its range.

use serde::Serialize;

use dgov_core::{CompanyProfile, CompanyRecord, DgovError, FilingRecord, ReferenceYear};

use crate::cache::{CacheKey, CacheStats, ScoreCache};
use crate::config::AnalyzerConfig;
use crate::factors::AnalysisFactors;
use crate::frameworks::score_tree;
use crate::score::ScoreTree;

/// Factors and scores for one company, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub factors: AnalysisFactors,
    pub scores: ScoreTree,
}

/// Heuristic compliance scorer with a per-instance memo cache.
#[derive(Debug)]
pub struct ComplianceAnalyzer {
    config: AnalyzerConfig,
    reference_year: Option<ReferenceYear>,
    cache: ScoreCache,
}

impl ComplianceAnalyzer {
    /// Wall-clock reference year, unbounded cache keyed on filing count.
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
            reference_year: None,
            cache: ScoreCache::new(),
        }
    }

    /// Build an analyzer from validated configuration.
    ///
    /// # Errors
    ///
    /// `DgovError::Config` for a zero cache capacity or a reference year
    /// outside `1900..=9999`.
    pub fn with_config(config: AnalyzerConfig) -> Result<Self, DgovError> {
        config.validate()?;
        let reference_year = config.pinned_year()?;
        let cache = ScoreCache::with_capacity(config.cache.capacity);
        tracing::debug!(
            reference_year = ?reference_year,
            cache_enabled = config.cache.enabled,
            cache_key = %config.cache.key,
            cache_capacity = ?cache.capacity(),
            "compliance analyzer configured"
        );
        Ok(Self {
            config,
            reference_year,
            cache,
        })
    }

    /// The validated settings this analyzer was built from.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The year recency is judged against for a call made now.
    pub fn reference_year(&self) -> ReferenceYear {
        ReferenceYear::resolve(self.reference_year)
    }

    /// Score a company, consulting and populating the cache.
    pub fn analyze(&self, company: &CompanyProfile, filings: &[FilingRecord]) -> ScoreTree {
        if !self.config.cache.enabled {
            return self.analyze_uncached(company, filings);
        }

        let key = CacheKey::new(company.id.as_ref(), filings, self.config.cache.key);
        if let Some(tree) = self.cache.get(&key) {
            tracing::debug!(company = %company.name, id = ?company.id, "score cache hit");
            return tree;
        }

        tracing::debug!(company = %company.name, id = ?company.id, "score cache miss");
        let tree = self.analyze_uncached(company, filings);
        self.cache.insert(key, tree);
        tree
    }

    /// Score a company without touching the cache.
    pub fn analyze_uncached(&self, company: &CompanyProfile, filings: &[FilingRecord]) -> ScoreTree {
        let factors = AnalysisFactors::derive(company, filings, self.reference_year());
        tracing::debug!(
            industry = %factors.industry,
            size = %factors.size,
            quality = factors.report_quality,
            maturity = factors.maturity,
            variance = factors.variance,
            "derived analysis factors"
        );
        score_tree(&factors)
    }

    /// Derived factors alongside the scores `analyze` returns.
    ///
    /// Factors are always recomputed. With the filing-count key a cached
    /// tree may predate the current filings, in which case the two disagree.
    pub fn explain(&self, company: &CompanyProfile, filings: &[FilingRecord]) -> Analysis {
        Analysis {
            factors: AnalysisFactors::derive(company, filings, self.reference_year()),
            scores: self.analyze(company, filings),
        }
    }

    /// Score a company record with embedded annual reports.
    pub fn analyze_record(&self, record: &CompanyRecord) -> ScoreTree {
        self.analyze(&record.profile, &record.annual_reports)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached tree.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl Default for ComplianceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
