//! Metric derivation for individual bids.
//!
//! The deriver turns the four observed inputs of a bid (list price,
//! transaction price, channel margin, tax/rebate rate) into the reported
//! financial metrics:
//!
//! ```text
//! factory_outbound_price = transaction_price * (1 - channel_margin - tax_and_rebate_rate)
//! customer_discount      = transaction_price / list_price
//! factory_discount       = factory_outbound_price / list_price
//! est_profit             = transaction_price * channel_margin
//! ```
//!
//! A negative outbound price is kept as-is: it marks an uneconomic bid rather
//! than an input error.

use bid_ledger_core::config::DEFAULT_TAX_AND_REBATE_RATE;
use bid_ledger_core::{CalibrationConfig, CalibrationError, ProjectInput, RawBid};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::bid::{BidRecord, DerivedMetrics};
use crate::project::{Project, RejectedBid};

// =============================================================================
// Metric Deriver
// =============================================================================

/// Derives bid metrics under a configurable tax and rebate rate.
#[derive(Debug, Clone)]
pub struct MetricDeriver {
    tax_and_rebate_rate: Decimal,
}

impl Default for MetricDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricDeriver {
    /// Creates a deriver using the standard 20% tax and rebate rate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tax_and_rebate_rate: DEFAULT_TAX_AND_REBATE_RATE,
        }
    }

    /// Creates a deriver from the calibration section of the configuration.
    #[must_use]
    pub fn with_config(config: &CalibrationConfig) -> Self {
        Self::with_rate(config.tax_and_rebate_rate)
    }

    /// Creates a deriver with a custom fallback tax and rebate rate.
    #[must_use]
    pub fn with_rate(tax_and_rebate_rate: Decimal) -> Self {
        Self {
            tax_and_rebate_rate,
        }
    }

    /// Fallback rate applied to bids that do not carry their own.
    #[must_use]
    pub fn tax_and_rebate_rate(&self) -> Decimal {
        self.tax_and_rebate_rate
    }

    /// Derives the metrics of a single bid.
    ///
    /// # Errors
    /// Returns `InvalidInput` if a price is not positive or a rate falls
    /// outside `[0, 1)`.
    pub fn derive(&self, bid: &RawBid) -> Result<DerivedMetrics, CalibrationError> {
        let rate = bid.tax_and_rebate_rate.unwrap_or(self.tax_and_rebate_rate);
        validate_inputs(bid, rate)?;

        let factory_outbound_price =
            bid.transaction_price * (Decimal::ONE - bid.channel_margin - rate);
        let customer_discount = ratio(bid.transaction_price, bid.list_price)?;
        let factory_discount = ratio(factory_outbound_price, bid.list_price)?;
        let est_profit = bid.transaction_price * bid.channel_margin;

        Ok(DerivedMetrics {
            factory_outbound_price,
            customer_discount,
            factory_discount,
            est_profit,
            applied_tax_and_rebate_rate: rate,
        })
    }

    /// Derives the metrics of a bid and wraps both into a record.
    ///
    /// # Errors
    /// Same as [`MetricDeriver::derive`].
    pub fn calibrate_bid(&self, bid: RawBid) -> Result<BidRecord, CalibrationError> {
        let metrics = self.derive(&bid)?;
        Ok(BidRecord::new(bid, metrics))
    }

    /// Calibrates every bid of a project.
    ///
    /// Bids that fail derivation are kept on the project as rejected bids so
    /// the rest of the project remains usable.
    #[must_use]
    pub fn calibrate_project(&self, input: ProjectInput) -> Project {
        let ProjectInput {
            id,
            project_name,
            customer_name,
            category,
            status,
            date,
            budget,
            landscape,
            bids,
        } = input;

        let mut records = Vec::with_capacity(bids.len());
        let mut rejected = Vec::new();

        for (position, raw) in bids.into_iter().enumerate() {
            match self.derive(&raw) {
                Ok(metrics) => {
                    debug!(
                        project = %id,
                        vendor = %raw.vendor,
                        factory_discount = %metrics.factory_discount,
                        "Derived bid metrics"
                    );
                    records.push(BidRecord::new(raw, metrics));
                }
                Err(error) => {
                    warn!(project = %id, vendor = %raw.vendor, %error, "Rejected bid");
                    rejected.push(RejectedBid {
                        position,
                        raw,
                        error,
                    });
                }
            }
        }

        Project {
            id,
            project_name,
            customer_name,
            category,
            status,
            date,
            budget,
            landscape,
            bids: records,
            rejected,
        }
    }

    /// Calibrates a whole dataset, preserving project order.
    #[must_use]
    pub fn calibrate_all(&self, inputs: Vec<ProjectInput>) -> Vec<Project> {
        let projects: Vec<Project> = inputs
            .into_iter()
            .map(|input| self.calibrate_project(input))
            .collect();

        let rejected: usize = projects.iter().map(|p| p.rejected_bids().len()).sum();
        info!(
            projects = projects.len(),
            rejected_bids = rejected,
            tax_and_rebate_rate = %self.tax_and_rebate_rate,
            "Calibrated dataset"
        );

        projects
    }
}

/// Derives bid metrics with the standard deriver.
///
/// # Errors
/// Same as [`MetricDeriver::derive`].
pub fn derive_metrics(bid: &RawBid) -> Result<DerivedMetrics, CalibrationError> {
    MetricDeriver::new().derive(bid)
}

fn validate_inputs(bid: &RawBid, rate: Decimal) -> Result<(), CalibrationError> {
    if bid.list_price <= Decimal::ZERO {
        return Err(CalibrationError::invalid_input(
            "list_price",
            format!("must be positive, got {}", bid.list_price),
        ));
    }
    if bid.transaction_price <= Decimal::ZERO {
        return Err(CalibrationError::invalid_input(
            "transaction_price",
            format!("must be positive, got {}", bid.transaction_price),
        ));
    }
    check_rate("channel_margin", bid.channel_margin)?;
    check_rate("tax_and_rebate_rate", rate)
}

fn check_rate(field: &'static str, value: Decimal) -> Result<(), CalibrationError> {
    if value < Decimal::ZERO || value >= Decimal::ONE {
        return Err(CalibrationError::invalid_input(
            field,
            format!("must be within [0, 1), got {value}"),
        ));
    }
    Ok(())
}

fn ratio(numerator: Decimal, list_price: Decimal) -> Result<Decimal, CalibrationError> {
    numerator
        .checked_div(list_price)
        .ok_or_else(|| CalibrationError::invalid_input("list_price", "ratio is not representable"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bid_ledger_core::{CustomerCategory, ProjectStatus, Vendor};
    use rust_decimal_macros::dec;

    fn raw_bid(list_price: Decimal, transaction_price: Decimal, channel_margin: Decimal) -> RawBid {
        RawBid {
            vendor: Vendor::Huawei,
            product_model: "CE12800/S12700".to_string(),
            list_price,
            transaction_price,
            channel_margin,
            tax_and_rebate_rate: None,
            channel_name: "Integrator-A".to_string(),
            mfg_margin: dec!(0.45),
            sales_margin: dec!(0.30),
            is_winner: false,
        }
    }

    fn project_input(bids: Vec<RawBid>) -> ProjectInput {
        ProjectInput {
            id: "FIN-2024-001".to_string(),
            project_name: "ICBC 2024 data center build-out".to_string(),
            customer_name: "ICBC".to_string(),
            category: CustomerCategory::SixMajorBanks,
            status: ProjectStatus::Closed,
            date: "2024-05".to_string(),
            budget: dec!(1000000),
            landscape: "awarded".to_string(),
            bids,
        }
    }

    // ==================== Derivation Tests ====================

    #[test]
    fn test_reference_bid() {
        let bid = raw_bid(dec!(1000000), dec!(700000), dec!(0.10));
        let metrics = MetricDeriver::new().derive(&bid).unwrap();

        assert_eq!(metrics.factory_outbound_price, dec!(490000));
        assert_eq!(metrics.customer_discount, dec!(0.70));
        assert_eq!(metrics.factory_discount, dec!(0.49));
        assert_eq!(metrics.est_profit, dec!(70000));
        assert_eq!(metrics.applied_tax_and_rebate_rate, dec!(0.20));
    }

    #[test]
    fn test_bid_rate_overrides_configured_rate() {
        let mut bid = raw_bid(dec!(1000000), dec!(700000), dec!(0.10));
        bid.tax_and_rebate_rate = Some(dec!(0.13));

        let metrics = MetricDeriver::new().derive(&bid).unwrap();
        assert_eq!(metrics.factory_outbound_price, dec!(539000));
        assert_eq!(metrics.applied_tax_and_rebate_rate, dec!(0.13));
    }

    #[test]
    fn test_configured_rate_applies_without_bid_rate() {
        let bid = raw_bid(dec!(1000000), dec!(700000), dec!(0.10));
        let deriver = MetricDeriver::with_config(&CalibrationConfig {
            tax_and_rebate_rate: dec!(0.06),
        });

        let metrics = deriver.derive(&bid).unwrap();
        assert_eq!(metrics.factory_outbound_price, dec!(588000));
        assert_eq!(metrics.factory_discount, dec!(0.588));
    }

    #[test]
    fn test_outbound_identity_holds() {
        let deriver = MetricDeriver::new();
        let cases = [
            (dec!(3000000), dec!(1000000), dec!(0.07)),
            (dec!(7777777), dec!(1234567), dec!(0.0333)),
            (dec!(900000), dec!(900000), dec!(0.15)),
            (dec!(10), dec!(3), dec!(0.01)),
        ];

        for (list, tx, margin) in cases {
            let m = deriver.derive(&raw_bid(list, tx, margin)).unwrap();
            let expected = tx * (Decimal::ONE - margin - dec!(0.20));
            assert_eq!(m.factory_outbound_price, expected);

            let reconstructed = m.factory_discount * list;
            assert!((reconstructed - m.factory_outbound_price).abs() < dec!(0.000001));
        }
    }

    #[test]
    fn test_factory_discount_below_customer_discount() {
        let deriver = MetricDeriver::new();
        for margin in [dec!(0.01), dec!(0.05), dec!(0.12), dec!(0.15)] {
            let m = deriver
                .derive(&raw_bid(dec!(5000000), dec!(800000), margin))
                .unwrap();
            assert!(m.factory_discount < m.customer_discount);
        }
    }

    #[test]
    fn test_uneconomic_bid_is_preserved() {
        let mut bid = raw_bid(dec!(1000000), dec!(500000), dec!(0.90));
        bid.tax_and_rebate_rate = Some(dec!(0.20));

        let metrics = MetricDeriver::new().derive(&bid).unwrap();
        assert_eq!(metrics.factory_outbound_price, dec!(-50000));
        assert!(metrics.factory_discount < Decimal::ZERO);
        assert!(metrics.is_uneconomic());
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_zero_list_price_is_invalid_input() {
        let bid = raw_bid(Decimal::ZERO, dec!(700000), dec!(0.10));
        let err = MetricDeriver::new().derive(&bid).unwrap_err();

        assert!(matches!(
            err,
            CalibrationError::InvalidInput {
                field: "list_price",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_list_price_is_invalid_input() {
        let bid = raw_bid(dec!(-1), dec!(700000), dec!(0.10));
        assert!(derive_metrics(&bid).is_err());
    }

    #[test]
    fn test_non_positive_transaction_price_is_invalid() {
        let bid = raw_bid(dec!(1000000), Decimal::ZERO, dec!(0.10));
        let err = derive_metrics(&bid).unwrap_err();
        assert!(matches!(
            err,
            CalibrationError::InvalidInput {
                field: "transaction_price",
                ..
            }
        ));
    }

    #[test]
    fn test_rates_out_of_range_are_invalid() {
        let bid = raw_bid(dec!(1000000), dec!(700000), dec!(1.0));
        assert!(matches!(
            derive_metrics(&bid).unwrap_err(),
            CalibrationError::InvalidInput {
                field: "channel_margin",
                ..
            }
        ));

        let deriver = MetricDeriver::with_rate(dec!(-0.05));
        let bid = raw_bid(dec!(1000000), dec!(700000), dec!(0.10));
        assert!(matches!(
            deriver.derive(&bid).unwrap_err(),
            CalibrationError::InvalidInput {
                field: "tax_and_rebate_rate",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_margin_is_accepted() {
        let bid = raw_bid(dec!(1000000), dec!(700000), Decimal::ZERO);
        let metrics = derive_metrics(&bid).unwrap();
        assert_eq!(metrics.est_profit, Decimal::ZERO);
        assert_eq!(metrics.factory_outbound_price, dec!(560000));
    }

    // ==================== Project Calibration Tests ====================

    #[test]
    fn test_calibrate_project_isolates_bad_bid() {
        let good = raw_bid(dec!(1000000), dec!(700000), dec!(0.10));
        let mut bad = raw_bid(Decimal::ZERO, dec!(650000), dec!(0.08));
        bad.vendor = Vendor::Cisco;

        let project = MetricDeriver::new().calibrate_project(project_input(vec![good, bad]));

        assert_eq!(project.bids().len(), 1);
        assert_eq!(project.rejected_bids().len(), 1);
        assert_eq!(project.rejected_bids()[0].position, 1);
        assert_eq!(project.rejected_bids()[0].raw.vendor, Vendor::Cisco);
        assert_eq!(project.bids()[0].metrics().factory_outbound_price, dec!(490000));
    }

    #[test]
    fn test_calibrate_all_preserves_order() {
        let mut second = project_input(vec![]);
        second.id = "FIN-2024-002".to_string();

        let projects = MetricDeriver::new().calibrate_all(vec![project_input(vec![]), second]);
        let ids: Vec<&str> = projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["FIN-2024-001", "FIN-2024-002"]);
    }
}
