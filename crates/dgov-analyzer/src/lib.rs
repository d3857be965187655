//! # dgov-analyzer: Heuristic Compliance Scoring
//!
//! Maps a company profile and its filing history to bounded, reproducible
//! compliance percentages for ISO/IEC 27001, ISO/IEC 27017, SOC 2 and three
//! internal policies.
//!
//! ## Modules
//!
//! - [`baseline`]: per-industry starting percentages and size multipliers.
//! - [`factors`]: size, report quality, maturity and name-seeded variance.
//! - [`frameworks`]: the per-leaf formulas.
//! - [`score`]: the [`ScoreTree`] output and its range invariant.
//! - [`cache`]: per-analyzer memoization.
//! - [`config`]: YAML/JSON analyzer settings.
//! - [`analyzer`]: [`ComplianceAnalyzer`], the entry point.
//!
//! ## Example
//!
//! ```
//! use dgov_analyzer::{AnalyzerConfig, ComplianceAnalyzer};
//! use dgov_core::{CompanyProfile, FilingRecord};
//!
//! let analyzer =
//!     ComplianceAnalyzer::with_config(AnalyzerConfig::default().with_reference_year(2025))?;
//! let company = CompanyProfile::new("Acme Tech Corp")
//!     .with_industry("Software")
//!     .with_ticker("ACME")
//!     .with_description("x".repeat(250));
//! let filings = [
//!     FilingRecord::new(2025).with_pdf_url("http://x"),
//!     FilingRecord::new(2024).with_pdf_url("http://y"),
//! ];
//! let scores = analyzer.analyze(&company, &filings);
//! assert_eq!(scores.iso27001.access_control, 91);
//! # Ok::<(), dgov_core::DgovError>(())
//! ```

pub mod analyzer;
pub mod baseline;
pub mod cache;
pub mod config;
pub mod factors;
pub mod frameworks;
pub mod score;

pub use analyzer::{Analysis, ComplianceAnalyzer};
pub use baseline::{soc2_industry_boost, IndustryBaseline, SizeCategory};
pub use cache::{CacheKey, CacheKeyStrategy, CacheStats, FilingDiscriminant, ScoreCache};
pub use config::{AnalyzerConfig, CacheConfig};
pub use factors::AnalysisFactors;
pub use score::{
    Framework, Iso27001Scores, Iso27017Scores, PolicyScores, ScoreLeaf, ScoreTree, Soc2Scores,
    LEAF_COUNT, SCORE_FLOOR,
};
