//! # Company and Filing Records
//!
//! The input side of the analyzer. Shapes follow the JSON the record store
//! emits for a company (`to_dict()`) and for each of its annual reports;
//! fields the analyzer does not score (`exchange`, `website`, `html_url`, ...)
//! are carried so records round-trip without loss. Unknown keys such as
//! `created_at` are ignored.
//!
//! ## Presence Rule
//!
//! An optional string counts as present only when it is `Some` and non-empty.
//! `ticker: ""` is "no ticker", and `industry: ""` falls through to `sector`.
//! `null` and missing keys are equivalent everywhere, including `name`
//! (→ empty string), `year` (→ 0) and `annual_reports` (→ empty).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::identity::CompanyId;

/// Company attributes as scraped and stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Record identity; used only to key the score cache.
    #[serde(default)]
    pub id: Option<CompanyId>,
    /// Company name. Seeds the score variance.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub employee_count: Option<i64>,
    #[serde(default)]
    pub website: Option<String>,
    /// Page the record was scraped from.
    #[serde(default)]
    pub source_url: Option<String>,
}

impl CompanyProfile {
    /// A profile with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<CompanyId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The text industry classification runs on: `industry`, else `sector`,
    /// else the empty string.
    pub fn industry_text(&self) -> &str {
        present(&self.industry)
            .or_else(|| present(&self.sector))
            .unwrap_or("")
    }

    /// True when a non-empty ticker is recorded.
    pub fn has_ticker(&self) -> bool {
        present(&self.ticker).is_some()
    }

    /// Description length in characters (not bytes).
    pub fn description_len(&self) -> usize {
        self.description.as_deref().map_or(0, |d| d.chars().count())
    }
}

/// One historical annual report of a company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRecord {
    /// Fiscal year the report covers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: i32,
    #[serde(default)]
    pub title: Option<String>,
    /// "Annual Report", "10-K", ...
    #[serde(default)]
    pub report_type: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub view_url: Option<String>,
    #[serde(default)]
    pub filing_date: Option<NaiveDate>,
}

impl FilingRecord {
    /// A filing with only a year set.
    pub fn new(year: i32) -> Self {
        Self {
            year,
            ..Self::default()
        }
    }

    pub fn with_pdf_url(mut self, url: impl Into<String>) -> Self {
        self.pdf_url = Some(url.into());
        self
    }

    /// True when a non-empty PDF link is recorded.
    pub fn has_pdf(&self) -> bool {
        present(&self.pdf_url).is_some()
    }
}

/// A company with its annual reports embedded, as returned by the record
/// store when reports are included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(flatten)]
    pub profile: CompanyProfile,
    #[serde(default, deserialize_with = "null_as_default")]
    pub annual_reports: Vec<FilingRecord>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
