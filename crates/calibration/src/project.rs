//! Calibrated projects and winner resolution.

use bid_ledger_core::{CalibrationError, CustomerCategory, ProjectStatus, RawBid, Vendor};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::bid::BidRecord;

/// A bid the deriver could not calibrate, kept for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedBid {
    /// Index of the bid within the project's source bid list.
    pub position: usize,
    pub raw: RawBid,
    pub error: CalibrationError,
}

/// A customer engagement with its calibrated bids.
///
/// Built by [`crate::MetricDeriver::calibrate_project`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: String,
    pub project_name: String,
    pub customer_name: String,
    pub category: CustomerCategory,
    pub status: ProjectStatus,
    pub date: String,
    pub budget: Decimal,
    pub landscape: String,
    pub(crate) bids: Vec<BidRecord>,
    pub(crate) rejected: Vec<RejectedBid>,
}

impl Project {
    /// Bids whose metrics were derived, in source order.
    #[must_use]
    pub fn bids(&self) -> &[BidRecord] {
        &self.bids
    }

    /// Bids rejected by the deriver, in source order.
    #[must_use]
    pub fn rejected_bids(&self) -> &[RejectedBid] {
        &self.rejected
    }

    /// Total number of bids received, including rejected ones.
    #[must_use]
    pub fn bid_count(&self) -> usize {
        self.bids.len() + self.rejected.len()
    }

    /// Budget this project contributes to portfolio totals.
    #[must_use]
    pub fn budget_share(&self) -> Decimal {
        self.budget
    }

    /// Returns the winning bid, if one has been determined.
    ///
    /// Winner flags are counted across all bids, rejected ones included.
    ///
    /// # Errors
    /// - `MultipleWinners` if more than one bid is flagged.
    /// - `UnusableWinner` if the only flagged bid was rejected by the deriver.
    pub fn winning_bid(&self) -> Result<Option<&BidRecord>, CalibrationError> {
        let flagged = self.bids.iter().filter(|b| b.is_winner()).count()
            + self.rejected.iter().filter(|r| r.raw.is_winner).count();

        match flagged {
            0 => Ok(None),
            1 => {
                if let Some(bid) = self.bids.iter().find(|b| b.is_winner()) {
                    return Ok(Some(bid));
                }
                let reason = self
                    .rejected
                    .iter()
                    .find(|r| r.raw.is_winner)
                    .map(|r| r.error.to_string())
                    .unwrap_or_default();
                Err(CalibrationError::UnusableWinner {
                    project_id: self.id.clone(),
                    reason,
                })
            }
            count => Err(CalibrationError::MultipleWinners {
                project_id: self.id.clone(),
                count,
            }),
        }
    }

    /// Builds the ledger row shown for this project.
    #[must_use]
    pub fn summary(&self) -> ProjectSummary {
        let (winner, flag) = match self.winning_bid() {
            Ok(bid) => (bid.map(WinnerSummary::from), None),
            Err(err) => (None, Some(err)),
        };

        ProjectSummary {
            id: self.id.clone(),
            customer_name: self.customer_name.clone(),
            project_name: self.project_name.clone(),
            category: self.category,
            status: self.status,
            budget: self.budget,
            landscape: self.landscape.clone(),
            bid_count: self.bid_count(),
            winner,
            flag,
        }
    }
}

/// Resolves the winner of a project.
///
/// # Errors
/// See [`Project::winning_bid`].
pub fn project_winner(project: &Project) -> Result<Option<&BidRecord>, CalibrationError> {
    project.winning_bid()
}

// =============================================================================
// Ledger Summary
// =============================================================================

/// Headline figures of a winning bid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinnerSummary {
    pub vendor: Vendor,
    pub transaction_price: Decimal,
    pub factory_outbound_price: Decimal,
    pub factory_discount: Decimal,
}

impl From<&BidRecord> for WinnerSummary {
    fn from(bid: &BidRecord) -> Self {
        Self {
            vendor: bid.vendor(),
            transaction_price: bid.raw().transaction_price,
            factory_outbound_price: bid.metrics().factory_outbound_price,
            factory_discount: bid.metrics().factory_discount,
        }
    }
}

/// One ledger row per project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub id: String,
    pub customer_name: String,
    pub project_name: String,
    pub category: CustomerCategory,
    pub status: ProjectStatus,
    pub budget: Decimal,
    pub landscape: String,
    pub bid_count: usize,
    /// Winner figures; `None` while the tender is open or when flagged.
    pub winner: Option<WinnerSummary>,
    /// Winner resolution error, if any.
    pub flag: Option<CalibrationError>,
}
