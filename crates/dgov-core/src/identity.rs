//! # Company Identity
//!
//! Companies are identified by whatever the persistence layer hands over:
//! usually an integer primary key, sometimes a string. `CompanyId` keeps the
//! two apart so `7` and `"7"` are distinct cache keys, and renders both the
//! way the record store prints them.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a company record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompanyId {
    /// Integer primary key.
    Numeric(i64),
    /// Any other identifier form.
    Text(String),
}

impl From<i64> for CompanyId {
    fn from(id: i64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for CompanyId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for CompanyId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}
