//! # Reference Year
//!
//! Filing recency is judged against a calendar year. In production that is
//! the current UTC year at the moment of analysis; tests and reproducible
//! batch runs pin it explicitly.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DgovError;

/// Earliest reference year accepted from configuration.
pub const MIN_REFERENCE_YEAR: i32 = 1900;
/// Latest reference year accepted from configuration.
pub const MAX_REFERENCE_YEAR: i32 = 9999;

/// The "current year" recency windows are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceYear(i32);

impl ReferenceYear {
    /// The current UTC calendar year.
    pub fn now() -> Self {
        Self(Utc::now().year())
    }

    /// A fixed reference year.
    ///
    /// # Errors
    ///
    /// Returns `DgovError::Config` outside `1900..=9999`.
    pub fn fixed(year: i32) -> Result<Self, DgovError> {
        if !(MIN_REFERENCE_YEAR..=MAX_REFERENCE_YEAR).contains(&year) {
            return Err(DgovError::Config(format!(
                "reference year {year} outside {MIN_REFERENCE_YEAR}..={MAX_REFERENCE_YEAR}"
            )));
        }
        Ok(Self(year))
    }

    /// The pinned year if one is given, otherwise the current UTC year.
    pub fn resolve(pinned: Option<ReferenceYear>) -> Self {
        pinned.unwrap_or_else(Self::now)
    }

    /// The calendar year as an integer.
    pub fn value(&self) -> i32 {
        self.0
    }

    /// First year of a window reaching `years_back` years into the past.
    ///
    /// A filing is "within the last N years" when `filing.year >= window_start(N)`.
    pub fn window_start(&self, years_back: i32) -> i32 {
        self.0.saturating_sub(years_back)
    }
}

impl std::fmt::Display for ReferenceYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
