//! CLI commands for the bid calibration ledger.

pub mod audit;
pub mod dataset;
pub mod export;
pub mod generate;
pub mod ledger;
pub mod narrative;
pub mod summary;

pub use audit::{run_audit, AuditArgs};
pub use export::{run_export, ExportArgs};
pub use generate::{run_generate, GenerateArgs};
pub use ledger::{run_ledger, LedgerArgs};
pub use narrative::{run_narrative, NarrativeArgs};
pub use summary::{run_summary, SummaryArgs};
