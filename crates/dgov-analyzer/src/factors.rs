//! # Scoring Factors
//!
//! Derives the company-specific facts every framework formula consumes:
//! industry bucket, size bucket, report quality, reporting maturity and the
//! deterministic per-company variance.
//!
//! ## Numeric Contract
//!
//! Quality and maturity are plain `f64`s built with the same operations in
//! the same order as the scoring service this engine replaced. In particular
//! quality is accumulated as `0.5 + 0.2 + 0.2 + 0.1`, which is
//! `0.9999999999999999`, not `1.0`. Truncation in the framework formulas
//! depends on those last bits, so do not simplify the arithmetic.

use serde::Serialize;

use dgov_core::{name_seed, CompanyProfile, FilingRecord, Industry, ReferenceYear};

use crate::baseline::SizeCategory;

/// Filings at most this many years old count toward company size.
pub const SIZE_RECENT_WINDOW_YEARS: i32 = 2;
/// Filings at most this many years old count as "recent" for report quality.
pub const QUALITY_RECENT_WINDOW_YEARS: i32 = 3;
/// Descriptions longer than this many characters suggest a larger company.
pub const LONG_DESCRIPTION_CHARS: usize = 200;

/// Inclusive bounds of [`company_variance()`].
pub const VARIANCE_RANGE: (i64, i64) = (-5, 5);

/// Everything derived from a company before the framework formulas run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisFactors {
    pub industry: Industry,
    pub size: SizeCategory,
    /// Raw size points, `0..=5`.
    pub size_score: u8,
    /// In `[0.5, 1.0]`.
    pub report_quality: f64,
    /// In `[0.6, 1.0]`.
    pub maturity: f64,
    /// In `-5..=5`.
    pub variance: i64,
    pub reference_year: ReferenceYear,
}

impl AnalysisFactors {
    /// Derive all factors for a company and its filings.
    pub fn derive(company: &CompanyProfile, filings: &[FilingRecord], year: ReferenceYear) -> Self {
        let size_score = size_score(company, filings, year);
        Self {
            industry: Industry::classify(company.industry_text()),
            size: SizeCategory::from_score(size_score),
            size_score,
            report_quality: report_quality(filings, year),
            maturity: maturity(filings),
            variance: company_variance(&company.name),
            reference_year: year,
        }
    }
}

/// Size points: ticker +2; three or more recent filings +2, else at least one
/// +1; long description +1.
pub fn size_score(company: &CompanyProfile, filings: &[FilingRecord], year: ReferenceYear) -> u8 {
    let window_start = year.window_start(SIZE_RECENT_WINDOW_YEARS);
    let recent = filings.iter().filter(|f| f.year >= window_start).count();

    let mut score = 0;
    if company.has_ticker() {
        score += 2;
    }
    if recent >= 3 {
        score += 2;
    } else if recent >= 1 {
        score += 1;
    }
    if company.description_len() > LONG_DESCRIPTION_CHARS {
        score += 1;
    }
    score
}

/// Report quality in `[0.5, 1.0]`. No filings → exactly `0.5`.
pub fn report_quality(filings: &[FilingRecord], year: ReferenceYear) -> f64 {
    if filings.is_empty() {
        return 0.5;
    }

    let window_start = year.window_start(QUALITY_RECENT_WINDOW_YEARS);
    let has_recent = filings.iter().any(|f| f.year >= window_start);
    let has_multiple = filings.len() >= 2;
    let has_pdf = filings.iter().any(FilingRecord::has_pdf);

    let mut quality = 0.5;
    if has_recent {
        quality += 0.2;
    }
    if has_multiple {
        quality += 0.2;
    }
    if has_pdf {
        quality += 0.1;
    }
    f64::min(quality, 1.0)
}

/// Reporting maturity in `[0.6, 1.0]`: filings per year of reporting span.
/// No filings → exactly `0.6`.
pub fn maturity(filings: &[FilingRecord]) -> f64 {
    let years = filings.iter().map(|f| i64::from(f.year));
    let (Some(min), Some(max)) = (years.clone().min(), years.max()) else {
        return 0.6;
    };

    let span = if filings.len() > 1 { max - min } else { 0 };
    let consistency = if span > 0 {
        filings.len() as f64 / span.max(1) as f64
    } else {
        1.0
    };
    f64::min(0.6 + consistency * 0.3, 1.0)
}

/// Deterministic per-company offset in [`VARIANCE_RANGE`], seeded by the
/// company name.
pub fn company_variance(name: &str) -> i64 {
    let (low, high) = VARIANCE_RANGE;
    i64::from(name_seed(name)) % (high - low + 1) + low
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year() -> ReferenceYear {
        ReferenceYear::fixed(2025).unwrap()
    }

    fn filings(years: &[i32]) -> Vec<FilingRecord> {
        years.iter().map(|y| FilingRecord::new(*y)).collect()
    }

    // ── size ────────────────────────────────────────────────────────

    #[test]
    fn size_ticker_alone_is_medium() {
        let c = CompanyProfile::new("A").with_ticker("A");
        assert_eq!(size_score(&c, &[], year()), 2);
        assert_eq!(SizeCategory::from_score(2), SizeCategory::Medium);
    }

    #[test]
    fn size_recent_filing_window_is_two_years() {
        let c = CompanyProfile::new("A");
        assert_eq!(size_score(&c, &filings(&[2023]), year()), 1);
        assert_eq!(size_score(&c, &filings(&[2022]), year()), 0);
        assert_eq!(size_score(&c, &filings(&[2025, 2024, 2023]), year()), 2);
        assert_eq!(size_score(&c, &filings(&[2025, 2024, 2022]), year()), 1);
    }

    #[test]
    fn size_description_must_exceed_200_chars() {
        let exactly = CompanyProfile::new("A").with_description("x".repeat(200));
        let longer = CompanyProfile::new("A").with_description("x".repeat(201));
        assert_eq!(size_score(&exactly, &[], year()), 0);
        assert_eq!(size_score(&longer, &[], year()), 1);
    }

    #[test]
    fn size_maximum_is_five() {
        let c = CompanyProfile::new("A")
            .with_ticker("A")
            .with_description("x".repeat(300));
        assert_eq!(size_score(&c, &filings(&[2025, 2025, 2024, 2023]), year()), 5);
    }

    // ── quality ─────────────────────────────────────────────────────

    #[test]
    fn quality_empty_is_half() {
        assert_eq!(report_quality(&[], year()), 0.5);
    }

    #[test]
    fn quality_keeps_float_accumulation() {
        let f = vec![
            FilingRecord::new(2025).with_pdf_url("p"),
            FilingRecord::new(2024),
        ];
        assert_eq!(report_quality(&f, year()), 0.9999999999999999);
    }

    #[test]
    fn quality_components() {
        assert_eq!(report_quality(&filings(&[2015]), year()), 0.5);
        assert_eq!(report_quality(&filings(&[2022]), year()), 0.7);
        assert_eq!(report_quality(&filings(&[2010, 2011]), year()), 0.7);
        let old_pdf = vec![FilingRecord::new(2015).with_pdf_url("u")];
        assert_eq!(report_quality(&old_pdf, year()), 0.6);
    }

    #[test]
    fn quality_ignores_empty_pdf_url() {
        let f = vec![FilingRecord::new(2015).with_pdf_url("")];
        assert_eq!(report_quality(&f, year()), 0.5);
    }

    // ── maturity ────────────────────────────────────────────────────

    #[test]
    fn maturity_empty_and_single() {
        assert_eq!(maturity(&[]), 0.6);
        assert_eq!(maturity(&filings(&[1999])), 0.8999999999999999);
    }

    #[test]
    fn maturity_duplicate_years_have_zero_span() {
        assert_eq!(maturity(&filings(&[2020, 2020, 2020])), 0.8999999999999999);
    }

    #[test]
    fn maturity_dense_reporting_caps_at_one() {
        // 2 filings over a 1-year span: consistency 2.0 → 1.2 → capped.
        assert_eq!(maturity(&filings(&[2025, 2024])), 1.0);
    }

    #[test]
    fn maturity_sparse_reporting() {
        // 2 filings over 10 years: 0.6 + 0.2 * 0.3
        let m = maturity(&filings(&[2015, 2025]));
        assert_eq!(m, 0.6 + 0.2 * 0.3);
        assert!(m > 0.6 && m < 0.7);
    }

    #[test]
    fn maturity_extreme_years_do_not_overflow() {
        let m = maturity(&filings(&[i32::MIN, i32::MAX]));
        assert!((0.6..=1.0).contains(&m));
    }

    // ── variance ────────────────────────────────────────────────────

    #[test]
    fn variance_known_names() {
        assert_eq!(company_variance(""), -5);
        assert_eq!(company_variance("Acme Tech Corp"), -2);
        assert_eq!(company_variance("Globex Bank"), -4);
        assert_eq!(company_variance("Initech"), 5);
        assert_eq!(company_variance("M\u{00fc}ller Industrial AG"), 3);
    }

    #[test]
    fn variance_covers_whole_range() {
        let (low, high) = VARIANCE_RANGE;
        let seen: std::collections::BTreeSet<i64> =
            (0..500).map(|i| company_variance(&format!("company-{i}"))).collect();
        assert_eq!(seen.first(), Some(&low));
        assert_eq!(seen.last(), Some(&high));
        assert_eq!(seen.len() as i64, high - low + 1);
    }

    #[test]
    fn derive_collects_all_factors() {
        let c = CompanyProfile::new("Acme Tech Corp")
            .with_industry("Software")
            .with_ticker("ACME")
            .with_description("x".repeat(250));
        let f = vec![
            FilingRecord::new(2025).with_pdf_url("http://x"),
            FilingRecord::new(2024).with_pdf_url("http://y"),
        ];
        let factors = AnalysisFactors::derive(&c, &f, year());
        assert_eq!(factors.industry, Industry::Technology);
        assert_eq!(factors.size_score, 4);
        assert_eq!(factors.size, SizeCategory::Large);
        assert_eq!(factors.maturity, 1.0);
        assert_eq!(factors.variance, -2);
        assert_eq!(factors.reference_year, year());
    }
}
