//! # Score Tree
//!
//! The analyzer's output: fourteen integer percentages in four groups.
//!
//! ```text
//! iso27001  access_control · information_security · operations_security
//! iso27017  cloud_access_control · virtual_network_security · cloud_asset_management
//! soc2      security · availability · processing_integrity · confidentiality · privacy
//! policies  privacy_policy · security_policy · data_handling_policy
//! ```
//!
//! ## Range Invariant
//!
//! Every leaf lies in `[SCORE_FLOOR, cap]` where `cap` is the leaf's entry in
//! [`cap`]. Leaves are only produced through [`clamp_leaf()`], so the
//! invariant holds for any input, however extreme.
//!
//! The serialized form is exactly the nested JSON object above with no
//! wrapper; the HTTP layer returns it verbatim.

use serde::{Deserialize, Serialize};

/// Lower bound of every leaf.
pub const SCORE_FLOOR: u8 = 50;

/// Number of leaves in a [`ScoreTree`].
pub const LEAF_COUNT: usize = 14;

/// Per-leaf upper bounds.
pub mod cap {
    pub const ACCESS_CONTROL: u8 = 98;
    pub const INFORMATION_SECURITY: u8 = 96;
    pub const OPERATIONS_SECURITY: u8 = 94;

    pub const CLOUD_ACCESS_CONTROL: u8 = 97;
    pub const VIRTUAL_NETWORK_SECURITY: u8 = 95;
    pub const CLOUD_ASSET_MANAGEMENT: u8 = 92;

    pub const SECURITY: u8 = 98;
    pub const AVAILABILITY: u8 = 96;
    pub const PROCESSING_INTEGRITY: u8 = 94;
    pub const CONFIDENTIALITY: u8 = 92;
    pub const PRIVACY: u8 = 99;

    pub const PRIVACY_POLICY: u8 = 99;
    pub const SECURITY_POLICY: u8 = 97;
    pub const DATA_HANDLING_POLICY: u8 = 95;
}

/// Clamp a raw score into `[SCORE_FLOOR, cap]`.
///
/// The cap is applied first, then the floor, so the floor wins if a cap were
/// ever configured below it.
pub fn clamp_leaf(value: i64, cap: u8) -> u8 {
    let clamped = value.min(i64::from(cap)).max(i64::from(SCORE_FLOOR));
    // In [50, 255] after the two bounds above.
    clamped as u8
}

/// Top-level score group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    Iso27001,
    Iso27017,
    Soc2,
    Policies,
}

impl Framework {
    pub fn all() -> &'static [Framework] {
        &[Self::Iso27001, Self::Iso27017, Self::Soc2, Self::Policies]
    }

    /// JSON key of the group.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iso27001 => "iso27001",
            Self::Iso27017 => "iso27017",
            Self::Soc2 => "soc2",
            Self::Policies => "policies",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Iso27001 => "ISO/IEC 27001",
            Self::Iso27017 => "ISO/IEC 27017",
            Self::Soc2 => "SOC 2",
            Self::Policies => "Policies",
        }
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ISO/IEC 27001 control scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Iso27001Scores {
    pub access_control: u8,
    pub information_security: u8,
    pub operations_security: u8,
}

/// ISO/IEC 27017 cloud control scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Iso27017Scores {
    pub cloud_access_control: u8,
    pub virtual_network_security: u8,
    pub cloud_asset_management: u8,
}

/// SOC 2 trust service criteria scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Soc2Scores {
    pub security: u8,
    pub availability: u8,
    pub processing_integrity: u8,
    pub confidentiality: u8,
    pub privacy: u8,
}

/// Internal policy acknowledgement percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyScores {
    pub privacy_policy: u8,
    pub security_policy: u8,
    pub data_handling_policy: u8,
}

/// Full analyzer output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreTree {
    pub iso27001: Iso27001Scores,
    pub iso27017: Iso27017Scores,
    pub soc2: Soc2Scores,
    pub policies: PolicyScores,
}

/// One leaf of a [`ScoreTree`] with its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreLeaf {
    pub framework: Framework,
    pub name: &'static str,
    pub value: u8,
    pub cap: u8,
}

impl ScoreLeaf {
    /// True when the value is inside `[SCORE_FLOOR, cap]`.
    pub fn in_range(&self) -> bool {
        (SCORE_FLOOR..=self.cap).contains(&self.value)
    }
}

impl ScoreTree {
    /// All fourteen leaves in serialization order.
    pub fn leaves(&self) -> [ScoreLeaf; LEAF_COUNT] {
        use Framework::*;
        let leaf = |framework: Framework, name: &'static str, value: u8, cap: u8| ScoreLeaf {
            framework,
            name,
            value,
            cap,
        };
        let (a, b, c, d) = (self.iso27001, self.iso27017, self.soc2, self.policies);
        [
            leaf(Iso27001, "access_control", a.access_control, cap::ACCESS_CONTROL),
            leaf(Iso27001, "information_security", a.information_security, cap::INFORMATION_SECURITY),
            leaf(Iso27001, "operations_security", a.operations_security, cap::OPERATIONS_SECURITY),
            leaf(Iso27017, "cloud_access_control", b.cloud_access_control, cap::CLOUD_ACCESS_CONTROL),
            leaf(Iso27017, "virtual_network_security", b.virtual_network_security, cap::VIRTUAL_NETWORK_SECURITY),
            leaf(Iso27017, "cloud_asset_management", b.cloud_asset_management, cap::CLOUD_ASSET_MANAGEMENT),
            leaf(Soc2, "security", c.security, cap::SECURITY),
            leaf(Soc2, "availability", c.availability, cap::AVAILABILITY),
            leaf(Soc2, "processing_integrity", c.processing_integrity, cap::PROCESSING_INTEGRITY),
            leaf(Soc2, "confidentiality", c.confidentiality, cap::CONFIDENTIALITY),
            leaf(Soc2, "privacy", c.privacy, cap::PRIVACY),
            leaf(Policies, "privacy_policy", d.privacy_policy, cap::PRIVACY_POLICY),
            leaf(Policies, "security_policy", d.security_policy, cap::SECURITY_POLICY),
            leaf(Policies, "data_handling_policy", d.data_handling_policy, cap::DATA_HANDLING_POLICY),
        ]
    }

    /// Truncating mean of one group's leaves.
    pub fn framework_average(&self, framework: Framework) -> u8 {
        let (sum, count) = self
            .leaves()
            .iter()
            .filter(|leaf| leaf.framework == framework)
            .fold((0u32, 0u32), |(sum, count), leaf| (sum + u32::from(leaf.value), count + 1));
        // Every framework has at least three leaves.
        (sum / count.max(1)) as u8
    }
}
