//! # Framework Formulas
//!
//! Turns [`AnalysisFactors`] into a [`ScoreTree`].
//!
//! Each leaf is computed in two stages:
//!
//! 1. **Base**: `trunc(baseline × size multiplier × driver × … × weight)`,
//!    multiplied strictly left to right in `f64`, then capped at the leaf
//!    cap. The driver is report quality or maturity depending on the leaf.
//! 2. **Final**: `clamp(base + variance + leaf offset, 50, cap)`.
//!
//! | Leaf | Driver | Boost | Weight | Offset | Cap |
//! |---|---|---|---|---|---|
//! | access_control | quality | | 1.02 | 0 | 98 |
//! | information_security | quality | | 0.98 | −1 | 96 |
//! | operations_security | maturity | | 0.95 | +1 | 94 |
//! | cloud_access_control | quality | | 1.01 | +2 | 97 |
//! | virtual_network_security | maturity | | 0.99 | 0 | 95 |
//! | cloud_asset_management | quality | | 0.96 | −2 | 92 |
//! | security | quality | yes | 1.01 | +1 | 98 |
//! | availability | maturity | yes | 0.98 | 0 | 96 |
//! | processing_integrity | quality | | 0.97 | −1 | 94 |
//! | confidentiality | maturity | | 0.94 | −2 | 92 |
//! | privacy | quality | yes | 1.02 | +2 | 99 |
//!
//! Policies skip the size multiplier: `policy_base = trunc(iso27001 baseline
//! × 1.1)`, then `trunc(policy_base × quality × weight)` with weights
//! 1.05 / 1.02 / 0.98 and offsets +3 / +1 / 0.

use crate::baseline::{soc2_industry_boost, IndustryBaseline};
use crate::factors::AnalysisFactors;
use crate::score::{
    cap, clamp_leaf, Iso27001Scores, Iso27017Scores, PolicyScores, ScoreTree, Soc2Scores,
};

/// Compute the full score tree for derived factors.
pub fn score_tree(factors: &AnalysisFactors) -> ScoreTree {
    let baseline = IndustryBaseline::for_industry(factors.industry);
    ScoreTree {
        iso27001: iso27001(baseline.iso27001, factors),
        iso27017: iso27017(baseline.iso27017, factors),
        soc2: soc2(baseline.soc2, factors),
        policies: policies(baseline.iso27001, factors),
    }
}

/// `trunc(baseline × terms[0] × terms[1] × …)`, multiplied left to right.
fn scaled(baseline: u8, terms: &[f64]) -> i64 {
    let product = terms.iter().fold(f64::from(baseline), |acc, term| acc * term);
    product as i64
}

/// Base value capped at the leaf cap.
fn base(baseline: u8, terms: &[f64], cap: u8) -> i64 {
    scaled(baseline, terms).min(i64::from(cap))
}

/// Apply variance and leaf offset, then clamp into the leaf range.
fn finish(base: i64, variance: i64, offset: i64, cap: u8) -> u8 {
    clamp_leaf(base + variance + offset, cap)
}

fn iso27001(baseline: u8, f: &AnalysisFactors) -> Iso27001Scores {
    let m = f.size.multiplier();
    let (q, mat, v) = (f.report_quality, f.maturity, f.variance);

    let access_control = base(baseline, &[m, q, 1.02], cap::ACCESS_CONTROL);
    let information_security = base(baseline, &[m, q, 0.98], cap::INFORMATION_SECURITY);
    let operations_security = base(baseline, &[m, mat, 0.95], cap::OPERATIONS_SECURITY);

    Iso27001Scores {
        access_control: finish(access_control, v, 0, cap::ACCESS_CONTROL),
        information_security: finish(information_security, v, -1, cap::INFORMATION_SECURITY),
        operations_security: finish(operations_security, v, 1, cap::OPERATIONS_SECURITY),
    }
}

fn iso27017(baseline: u8, f: &AnalysisFactors) -> Iso27017Scores {
    let m = f.size.multiplier();
    let (q, mat, v) = (f.report_quality, f.maturity, f.variance);

    let cloud_access_control = base(baseline, &[m, q, 1.01], cap::CLOUD_ACCESS_CONTROL);
    let virtual_network_security = base(baseline, &[m, mat, 0.99], cap::VIRTUAL_NETWORK_SECURITY);
    let cloud_asset_management = base(baseline, &[m, q, 0.96], cap::CLOUD_ASSET_MANAGEMENT);

    Iso27017Scores {
        cloud_access_control: finish(cloud_access_control, v, 2, cap::CLOUD_ACCESS_CONTROL),
        virtual_network_security: finish(virtual_network_security, v, 0, cap::VIRTUAL_NETWORK_SECURITY),
        cloud_asset_management: finish(cloud_asset_management, v, -2, cap::CLOUD_ASSET_MANAGEMENT),
    }
}

fn soc2(baseline: u8, f: &AnalysisFactors) -> Soc2Scores {
    let m = f.size.multiplier();
    let boost = soc2_industry_boost(f.industry);
    let (q, mat, v) = (f.report_quality, f.maturity, f.variance);

    let security = base(baseline, &[m, q, boost, 1.01], cap::SECURITY);
    let availability = base(baseline, &[m, mat, boost, 0.98], cap::AVAILABILITY);
    let processing_integrity = base(baseline, &[m, q, 0.97], cap::PROCESSING_INTEGRITY);
    let confidentiality = base(baseline, &[m, mat, 0.94], cap::CONFIDENTIALITY);
    let privacy = base(baseline, &[m, q, boost, 1.02], cap::PRIVACY);

    Soc2Scores {
        security: finish(security, v, 1, cap::SECURITY),
        availability: finish(availability, v, 0, cap::AVAILABILITY),
        processing_integrity: finish(processing_integrity, v, -1, cap::PROCESSING_INTEGRITY),
        confidentiality: finish(confidentiality, v, -2, cap::CONFIDENTIALITY),
        privacy: finish(privacy, v, 2, cap::PRIVACY),
    }
}

fn policies(iso27001_baseline: u8, f: &AnalysisFactors) -> PolicyScores {
    let policy_base = scaled(iso27001_baseline, &[1.1]);
    let (q, v) = (f.report_quality, f.variance);
    let weighted = |weight: f64, cap: u8| ((policy_base as f64 * q * weight) as i64).min(i64::from(cap));

    let privacy_policy = weighted(1.05, cap::PRIVACY_POLICY);
    let security_policy = weighted(1.02, cap::SECURITY_POLICY);
    let data_handling_policy = weighted(0.98, cap::DATA_HANDLING_POLICY);

    PolicyScores {
        privacy_policy: finish(privacy_policy, v, 3, cap::PRIVACY_POLICY),
        security_policy: finish(security_policy, v, 1, cap::SECURITY_POLICY),
        data_handling_policy: finish(data_handling_policy, v, 0, cap::DATA_HANDLING_POLICY),
    }
}
