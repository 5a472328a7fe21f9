//! Portfolio summary command.
//!
//! Prints the headline cards, vendor win share and budget-by-category chart
//! of the selected projects.

use anyhow::Result;
use bid_ledger_calibration::{aggregate_portfolio, ReportFormatter};
use clap::Args;

use super::dataset::DatasetArgs;

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Print the statistics as JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}

/// Runs the summary command.
///
/// # Errors
/// Returns an error if the config or dataset cannot be loaded.
pub fn run_summary(args: &SummaryArgs) -> Result<()> {
    let ledger = args.dataset.load()?;
    let stats = aggregate_portfolio(ledger.selected());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!(
            "{}",
            ReportFormatter::format(&stats, &ledger.query, &ledger.config.report)
        );
    }

    Ok(())
}
