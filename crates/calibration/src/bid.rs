//! Calibrated bid records.

use bid_ledger_core::{RawBid, Vendor};
use rust_decimal::Decimal;
use serde::Serialize;

/// Financial metrics derived from a bid's observed prices and rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedMetrics {
    /// Price the vendor ships at after channel margin and tax/rebate deductions.
    ///
    /// Negative when the deductions exceed the transaction price.
    pub factory_outbound_price: Decimal,
    /// `transaction_price / list_price`.
    pub customer_discount: Decimal,
    /// `factory_outbound_price / list_price`.
    pub factory_discount: Decimal,
    /// Channel profit, `transaction_price * channel_margin`.
    pub est_profit: Decimal,
    /// Tax and rebate rate the derivation used.
    pub applied_tax_and_rebate_rate: Decimal,
}

impl DerivedMetrics {
    /// Returns true if the vendor would ship below zero on this bid.
    #[must_use]
    pub fn is_uneconomic(&self) -> bool {
        self.factory_outbound_price < Decimal::ZERO
    }
}

/// A bid together with its derived metrics.
///
/// Only produced by [`crate::MetricDeriver`], so the metrics always match the
/// raw fields they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BidRecord {
    #[serde(flatten)]
    raw: RawBid,
    #[serde(flatten)]
    metrics: DerivedMetrics,
}

impl BidRecord {
    pub(crate) fn new(raw: RawBid, metrics: DerivedMetrics) -> Self {
        Self { raw, metrics }
    }

    #[must_use]
    pub fn raw(&self) -> &RawBid {
        &self.raw
    }

    #[must_use]
    pub fn metrics(&self) -> &DerivedMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn vendor(&self) -> Vendor {
        self.raw.vendor
    }

    #[must_use]
    pub fn is_winner(&self) -> bool {
        self.raw.is_winner
    }

    #[must_use]
    pub fn factory_discount(&self) -> Decimal {
        self.metrics.factory_discount
    }

    #[must_use]
    pub fn est_profit(&self) -> Decimal {
        self.metrics.est_profit
    }
}
