//! Data-quality audit command.

use anyhow::Result;
use bid_ledger_calibration::{audit_portfolio, ReportFormatter};
use clap::Args;

use super::dataset::DatasetArgs;

#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Print findings as JSON
    #[arg(long)]
    pub json: bool,
}

/// Runs the audit command. Findings never make the command fail.
///
/// # Errors
/// Returns an error if the config or dataset cannot be loaded.
pub fn run_audit(args: &AuditArgs) -> Result<()> {
    let ledger = args.dataset.load()?;
    let audits = audit_portfolio(ledger.selected());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&audits)?);
    } else {
        print!("{}", ReportFormatter::format_audit(&audits));
    }

    Ok(())
}
