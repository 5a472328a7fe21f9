//! Bid financial calibration engine.
//!
//! Turns raw bid observations into calibrated metrics and rolls them up into
//! project and portfolio statistics.
//!
//! # Pipeline
//!
//! ```text
//! ProjectInput ──MetricDeriver──▶ Project ──ProjectQuery──▶ &Project ──aggregate_portfolio──▶ PortfolioStats
//!                                   │                                                          │
//!                              winning_bid()                                         NarrativeRequest
//! ```
//!
//! # Modules
//!
//! - [`deriver`]: per-bid metric derivation and project calibration
//! - [`project`]: calibrated projects, winner resolution, ledger rows
//! - [`filter`]: category and text search over projects
//! - [`portfolio`]: headline statistics and chart groupings
//! - [`quality`]: non-fatal data-quality audit
//! - [`narrative`]: payload for the external narrative service
//! - [`formatter`]: text rendering of reports
//!
//! # Example
//!
//! ```
//! use bid_ledger_calibration::{aggregate_portfolio, filter_projects, MetricDeriver};
//! use bid_ledger_core::{CategorySelector, CustomerCategory, ProjectInput, ProjectStatus, RawBid, Vendor};
//! use rust_decimal_macros::dec;
//!
//! let input = ProjectInput {
//!     id: "FIN-2024-001".to_string(),
//!     project_name: "ICBC 2024 production center build".to_string(),
//!     customer_name: "ICBC".to_string(),
//!     category: CustomerCategory::SixMajorBanks,
//!     status: ProjectStatus::Closed,
//!     date: "2024-03".to_string(),
//!     budget: dec!(1000000),
//!     landscape: "awarded".to_string(),
//!     bids: vec![RawBid {
//!         vendor: Vendor::Huawei,
//!         product_model: "CE12800/S12700".to_string(),
//!         list_price: dec!(1000000),
//!         transaction_price: dec!(700000),
//!         channel_margin: dec!(0.10),
//!         tax_and_rebate_rate: None,
//!         channel_name: "Integrator-A".to_string(),
//!         mfg_margin: dec!(0.45),
//!         sales_margin: dec!(0.30),
//!         is_winner: true,
//!     }],
//! };
//!
//! let projects = MetricDeriver::new().calibrate_all(vec![input]);
//! let selected = filter_projects(&projects, CategorySelector::All, "ICBC");
//! let stats = aggregate_portfolio(selected);
//!
//! assert_eq!(stats.avg_factory_discount, dec!(0.49));
//! assert_eq!(stats.total_profit, dec!(70000));
//! ```

pub mod bid;
pub mod deriver;
pub mod filter;
pub mod formatter;
pub mod narrative;
pub mod portfolio;
pub mod project;
pub mod quality;

pub use bid::{BidRecord, DerivedMetrics};
pub use deriver::{derive_metrics, MetricDeriver};
pub use filter::{filter_projects, ProjectQuery};
pub use formatter::ReportFormatter;
pub use narrative::NarrativeRequest;
pub use portfolio::{aggregate_portfolio, winning_bids, PortfolioStats, SkippedRecord};
pub use project::{project_winner, Project, ProjectSummary, RejectedBid, WinnerSummary};
pub use quality::{audit_portfolio, audit_project, DataQualityIssue, ProjectAudit};
