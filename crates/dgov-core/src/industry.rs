//! # Industry Taxonomy
//!
//! The closed set of industry buckets companies are scored against, and the
//! keyword classifier that maps free-text `industry`/`sector` strings onto
//! them.
//!
//! ## Classification Rule
//!
//! The input is lowercased and scanned for keyword *substrings* (not whole
//! words) bucket by bucket in the order of [`Industry::all()`]. The first
//! bucket with any matching keyword wins; nothing matches → `Default`.
//! Order matters: "fintech banking" is Technology, because "tech" is checked
//! before "bank".

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DgovError;

/// Industry bucket used to select a scoring baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    #[serde(rename = "Technology")]
    Technology,
    #[serde(rename = "Financial Services")]
    FinancialServices,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Retail")]
    Retail,
    #[serde(rename = "Manufacturing")]
    Manufacturing,
    #[serde(rename = "Energy")]
    Energy,
    #[serde(rename = "Telecommunications")]
    Telecommunications,
    /// Fallback for anything the keyword table does not recognise.
    #[serde(rename = "default")]
    Default,
}

/// Total number of industry buckets, including `Default`.
pub const INDUSTRY_COUNT: usize = 8;

impl Industry {
    /// All buckets in classification priority order. `Default` is last.
    pub fn all() -> &'static [Industry] {
        &[
            Self::Technology,
            Self::FinancialServices,
            Self::Healthcare,
            Self::Retail,
            Self::Manufacturing,
            Self::Energy,
            Self::Telecommunications,
            Self::Default,
        ]
    }

    /// Display name; matches the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::FinancialServices => "Financial Services",
            Self::Healthcare => "Healthcare",
            Self::Retail => "Retail",
            Self::Manufacturing => "Manufacturing",
            Self::Energy => "Energy",
            Self::Telecommunications => "Telecommunications",
            Self::Default => "default",
        }
    }

    /// Lowercase keywords that select this bucket. Empty for `Default`.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Technology => &["tech", "software", "computing", "internet"],
            Self::FinancialServices => &["bank", "financial", "insurance", "investment"],
            Self::Healthcare => &["health", "pharma", "medical", "hospital"],
            Self::Retail => &["retail", "consumer", "commerce"],
            Self::Manufacturing => &["manufacturing", "industrial", "automotive"],
            Self::Energy => &["energy", "oil", "utilities", "power"],
            Self::Telecommunications => &["telecom", "communication", "wireless"],
            Self::Default => &[],
        }
    }

    /// Classify a free-text industry or sector description.
    pub fn classify(text: &str) -> Industry {
        let lowered = text.to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|industry| industry.keywords().iter().any(|kw| lowered.contains(kw)))
            .unwrap_or(Self::Default)
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Industry {
    type Err = DgovError;

    /// Parse a bucket from its display name (exact match).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|industry| industry.as_str() == s)
            .ok_or_else(|| DgovError::InvalidInput(format!("unknown industry: {s:?}")))
    }
}
