//! Raw observations as supplied by a dataset source.
//!
//! These are the inputs of the calibration engine. They carry no derived
//! values: outbound price, discounts and profit are always recomputed, and any
//! such fields present in a source document are ignored on load.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CustomerCategory, ProjectStatus, Vendor};

/// One vendor's offer within a project, before calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBid {
    pub vendor: Vendor,

    /// Vendor-specific model identifier.
    #[serde(alias = "productModel")]
    pub product_model: String,

    /// Undiscounted catalog price.
    #[serde(alias = "listPrice")]
    pub list_price: Decimal,

    /// Amount the end customer actually pays.
    #[serde(alias = "transactionPrice")]
    pub transaction_price: Decimal,

    /// Reseller margin rate (as decimal, e.g., 0.10 for 10%).
    #[serde(alias = "channelMargin")]
    pub channel_margin: Decimal,

    /// Tax and rebate deduction rate. Falls back to the deriver's configured
    /// rate when absent.
    #[serde(default, alias = "taxAndRebateRate", skip_serializing_if = "Option::is_none")]
    pub tax_and_rebate_rate: Option<Decimal>,

    /// Reselling integrator.
    #[serde(alias = "channelName")]
    pub channel_name: String,

    /// Estimated manufacturing gross margin.
    #[serde(alias = "mfgMargin")]
    pub mfg_margin: Decimal,

    /// Estimated sales gross margin.
    #[serde(alias = "salesMargin")]
    pub sales_margin: Decimal,

    #[serde(default, alias = "isWinner")]
    pub is_winner: bool,
}

/// One customer engagement with its raw bids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    pub id: String,
    #[serde(alias = "projectName")]
    pub project_name: String,
    #[serde(alias = "customerName")]
    pub customer_name: String,
    pub category: CustomerCategory,
    pub status: ProjectStatus,
    /// Tender month, `YYYY-MM`.
    pub date: String,
    pub budget: Decimal,
    /// Free-text market-state label.
    #[serde(default)]
    pub landscape: String,
    #[serde(default)]
    pub bids: Vec<RawBid>,
}

impl ProjectInput {
    /// Number of bids carrying the winner flag.
    #[must_use]
    pub fn winner_flags(&self) -> usize {
        self.bids.iter().filter(|b| b.is_winner).count()
    }
}
