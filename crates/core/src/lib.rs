//! Core types, error taxonomy and configuration shared by the bid ledger crates.

pub mod config;
pub mod config_loader;
pub mod error;
pub mod input;
pub mod types;

pub use config::{
    AppConfig, CalibrationConfig, NarrativeConfig, ReportConfig, DEFAULT_TAX_AND_REBATE_RATE,
};
pub use config_loader::ConfigLoader;
pub use error::{CalibrationError, UnknownVariant};
pub use input::{ProjectInput, RawBid};
pub use types::{CategorySelector, CustomerCategory, ProjectStatus, Vendor};
