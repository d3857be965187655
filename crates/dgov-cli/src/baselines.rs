//! # Baselines Subcommand
//!
//! Prints the industry baseline table with classification keywords, in
//! classification priority order.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use dgov_analyzer::{soc2_industry_boost, IndustryBaseline};
use dgov_core::Industry;

/// Arguments for the `dgov baselines` subcommand.
#[derive(Args, Debug)]
pub struct BaselinesArgs {
    /// Emit JSON instead of a text table.
    #[arg(long)]
    pub json: bool,
}

/// One row of the baseline table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineRow {
    pub industry: Industry,
    #[serde(flatten)]
    pub baseline: IndustryBaseline,
    pub soc2_boost: f64,
    pub keywords: &'static [&'static str],
}

/// All rows, `default` last.
pub fn baseline_rows() -> Vec<BaselineRow> {
    Industry::all()
        .iter()
        .map(|industry| BaselineRow {
            industry: *industry,
            baseline: IndustryBaseline::for_industry(*industry),
            soc2_boost: soc2_industry_boost(*industry),
            keywords: industry.keywords(),
        })
        .collect()
}

/// Render the rows as an aligned text table.
pub fn render_table(rows: &[BaselineRow]) -> String {
    let mut out = format!(
        "{:<20} {:>8} {:>8} {:>5} {:>6}  {}\n",
        "INDUSTRY", "ISO27001", "ISO27017", "SOC2", "BOOST", "KEYWORDS"
    );
    for row in rows {
        out.push_str(&format!(
            "{:<20} {:>8} {:>8} {:>5} {:>6.2}  {}\n",
            row.industry.as_str(),
            row.baseline.iso27001,
            row.baseline.iso27017,
            row.baseline.soc2,
            row.soc2_boost,
            row.keywords.join(", ")
        ));
    }
    out
}

/// Execute the baselines subcommand.
pub fn run_baselines(args: &BaselinesArgs) -> Result<u8> {
    let rows = baseline_rows();
    if args.json {
        crate::emit_json(&rows, true, None)?;
    } else {
        print!("{}", render_table(&rows));
    }
    Ok(0)
}
