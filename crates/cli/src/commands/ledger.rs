use anyhow::Result;
use bid_ledger_calibration::ReportFormatter;
use clap::Args;

use super::dataset::DatasetArgs;

/// Arguments for the ledger command.
#[derive(Args, Debug, Clone)]
pub struct LedgerArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Show every bid under its project
    #[arg(short, long)]
    pub expand: bool,
}

/// Prints one row per selected project.
///
/// # Errors
/// Returns an error if the config or dataset cannot be loaded.
pub fn run_ledger(args: &LedgerArgs) -> Result<()> {
    let ledger = args.dataset.load()?;
    let selected = ledger.selected();

    print!(
        "{}",
        ReportFormatter::format_ledger(&selected, &ledger.config.report, args.expand)
    );
    println!("{} of {} projects", selected.len(), ledger.projects.len());

    Ok(())
}
