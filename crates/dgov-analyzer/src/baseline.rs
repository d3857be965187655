//! # Baseline Tables
//!
//! Static inputs to the scoring formulas: per-industry starting percentages
//! for each framework, and the size-category multiplier.
//!
//! Both lookups are exhaustive matches on closed enums, so there is no
//! "missing entry" path. `Industry::Default` is an ordinary row.

use serde::{Deserialize, Serialize};

use dgov_core::Industry;

/// Industry starting percentages, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryBaseline {
    pub iso27001: u8,
    pub iso27017: u8,
    pub soc2: u8,
}

impl IndustryBaseline {
    const fn new(iso27001: u8, iso27017: u8, soc2: u8) -> Self {
        Self {
            iso27001,
            iso27017,
            soc2,
        }
    }

    /// Baseline row for an industry bucket.
    pub fn for_industry(industry: Industry) -> Self {
        match industry {
            Industry::Technology => Self::new(85, 88, 90),
            Industry::FinancialServices => Self::new(92, 85, 95),
            Industry::Healthcare => Self::new(88, 82, 93),
            Industry::Retail => Self::new(75, 78, 80),
            Industry::Manufacturing => Self::new(72, 70, 75),
            Industry::Energy => Self::new(80, 75, 82),
            Industry::Telecommunications => Self::new(82, 85, 85),
            Industry::Default => Self::new(75, 75, 78),
        }
    }
}

/// SOC2 security/availability/privacy boost for industries that routinely
/// undergo SOC2 audits.
pub fn soc2_industry_boost(industry: Industry) -> f64 {
    match industry {
        Industry::Technology | Industry::FinancialServices => 1.05,
        _ => 1.0,
    }
}

/// Company size bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

impl SizeCategory {
    /// Bucket for a size score: `>= 4` large, `>= 2` medium, otherwise small.
    pub fn from_score(score: u8) -> Self {
        if score >= 4 {
            Self::Large
        } else if score >= 2 {
            Self::Medium
        } else {
            Self::Small
        }
    }

    /// Multiplier applied to every baseline-scaled sub-score.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Large => 1.08,
            Self::Medium => 1.03,
            Self::Small => 0.97,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Large => "large",
            Self::Medium => "medium",
            Self::Small => "small",
        }
    }
}

impl std::fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baselines_are_percentages() {
        for industry in Industry::all() {
            let b = IndustryBaseline::for_industry(*industry);
            for v in [b.iso27001, b.iso27017, b.soc2] {
                assert!(v <= 100, "{industry}: {v}");
            }
        }
    }

    #[test]
    fn known_rows() {
        assert_eq!(IndustryBaseline::for_industry(Industry::Technology).iso27001, 85);
        assert_eq!(IndustryBaseline::for_industry(Industry::FinancialServices).soc2, 95);
        assert_eq!(
            IndustryBaseline::for_industry(Industry::Default),
            IndustryBaseline {
                iso27001: 75,
                iso27017: 75,
                soc2: 78
            }
        );
    }

    #[test]
    fn boost_only_for_tech_and_finance() {
        for industry in Industry::all() {
            let expected = matches!(industry, Industry::Technology | Industry::FinancialServices);
            assert_eq!(soc2_industry_boost(*industry) > 1.0, expected, "{industry}");
        }
    }

    #[test]
    fn size_thresholds() {
        assert_eq!(SizeCategory::from_score(0), SizeCategory::Small);
        assert_eq!(SizeCategory::from_score(1), SizeCategory::Small);
        assert_eq!(SizeCategory::from_score(2), SizeCategory::Medium);
        assert_eq!(SizeCategory::from_score(3), SizeCategory::Medium);
        assert_eq!(SizeCategory::from_score(4), SizeCategory::Large);
        assert_eq!(SizeCategory::from_score(5), SizeCategory::Large);
    }

    #[test]
    fn multiplier_is_monotonic_in_size() {
        let sizes = [SizeCategory::Small, SizeCategory::Medium, SizeCategory::Large];
        for pair in sizes.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].multiplier() < pair[1].multiplier());
        }
    }

    #[test]
    fn size_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SizeCategory::Large).unwrap(), "\"large\"");
    }
}
