//! Dataset sources and ledger export.
//!
//! This crate provides:
//! - JSON and CSV readers producing [`ProjectInput`](bid_ledger_core::ProjectInput)
//! - A seeded mock generator for demos and tests
//! - The bid-level reconciliation CSV export

pub mod csv_source;
pub mod csv_storage;
pub mod json_source;
pub mod loader;
pub mod mock;

pub use csv_source::{BidRow, CsvSource};
pub use csv_storage::CsvStorage;
pub use json_source::JsonSource;
pub use loader::DatasetLoader;
pub use mock::{MockGenerator, MOCK_PROJECT_COUNT};
