//! Reconciliation statement export.

use std::path::PathBuf;

use anyhow::Result;
use bid_ledger_data::CsvStorage;
use clap::Args;

use super::dataset::DatasetArgs;

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Output CSV file path
    #[arg(short, long, default_value = "ledger_export.csv")]
    pub output: PathBuf,
}

/// Writes every calibrated bid of the selected projects to CSV.
///
/// # Errors
/// Returns an error if loading fails or the file cannot be written.
pub fn run_export(args: &ExportArgs) -> Result<()> {
    let ledger = args.dataset.load()?;
    let rows = CsvStorage::write_ledger(&args.output, &ledger.selected())?;

    println!("Exported {} bids to {}", rows, args.output.display());
    Ok(())
}
