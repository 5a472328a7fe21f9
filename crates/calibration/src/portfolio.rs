//! Portfolio-level statistics over a (filtered) project collection.
//!
//! Aggregation never fails. Rejected bids and projects with an unresolvable
//! winner are listed in [`PortfolioStats::skipped`] and the statistics are
//! computed from everything else; flagged projects still count toward budget
//! totals since the budget does not depend on bid data. A budget or winning
//! bid that would overflow a running total is skipped the same way.

use std::collections::BTreeMap;

use bid_ledger_core::{CalibrationError, CustomerCategory, Vendor};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::bid::BidRecord;
use crate::project::{Project, RejectedBid};

/// A record left out of the winner statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    pub project_id: String,
    /// Set when a single bid was rejected; `None` for project-level flags.
    pub vendor: Option<Vendor>,
    pub error: CalibrationError,
}

impl SkippedRecord {
    fn bid(project: &Project, rejected: &RejectedBid) -> Self {
        Self {
            project_id: project.id.clone(),
            vendor: Some(rejected.raw.vendor),
            error: rejected.error.clone(),
        }
    }

    fn project(project: &Project, error: CalibrationError) -> Self {
        Self {
            project_id: project.id.clone(),
            vendor: None,
            error,
        }
    }
}

/// Headline statistics and chart groupings of a project collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioStats {
    pub project_count: usize,
    /// Sum of budgets over all projects, winners or not.
    pub total_budget: Decimal,
    pub winning_bid_count: usize,
    /// Mean factory discount of winning bids; zero when there are none.
    pub avg_factory_discount: Decimal,
    /// Channel profit summed over winning bids.
    pub total_profit: Decimal,
    /// Wins per vendor; vendors without a win are absent.
    pub vendor_win_count: BTreeMap<Vendor, u32>,
    /// Raw budget per category.
    pub category_budget_total: BTreeMap<CustomerCategory, Decimal>,
    pub skipped: Vec<SkippedRecord>,
}

impl PortfolioStats {
    /// Fraction of winning bids taken by each vendor.
    #[must_use]
    pub fn vendor_win_share(&self) -> BTreeMap<Vendor, Decimal> {
        if self.winning_bid_count == 0 {
            return BTreeMap::new();
        }
        let total = Decimal::from(self.winning_bid_count);
        self.vendor_win_count
            .iter()
            .map(|(vendor, wins)| (*vendor, Decimal::from(*wins) / total))
            .collect()
    }

    /// Returns true if nothing was left out of the statistics.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Collects the winning bids across projects.
///
/// Projects without a winner contribute nothing; projects whose winner cannot
/// be resolved are returned in the second list.
pub fn winning_bids<'a, I>(projects: I) -> (Vec<&'a BidRecord>, Vec<SkippedRecord>)
where
    I: IntoIterator<Item = &'a Project>,
{
    let mut winners = Vec::new();
    let mut flagged = Vec::new();

    for project in projects {
        match project.winning_bid() {
            Ok(Some(bid)) => winners.push(bid),
            Ok(None) => {}
            Err(err) => flagged.push(SkippedRecord::project(project, err)),
        }
    }

    (winners, flagged)
}

/// Reduces a project collection to portfolio statistics.
pub fn aggregate_portfolio<'a, I>(projects: I) -> PortfolioStats
where
    I: IntoIterator<Item = &'a Project>,
{
    let mut stats = PortfolioStats::default();
    let mut discount_sum = Decimal::ZERO;

    for project in projects {
        stats.project_count += 1;

        let budget = project.budget_share();
        let category_total = stats
            .category_budget_total
            .get(&project.category)
            .copied()
            .unwrap_or(Decimal::ZERO);
        match (
            stats.total_budget.checked_add(budget),
            category_total.checked_add(budget),
        ) {
            (Some(total), Some(category_total)) => {
                stats.total_budget = total;
                stats
                    .category_budget_total
                    .insert(project.category, category_total);
            }
            _ => {
                let err = CalibrationError::invalid_input(
                    "budget",
                    format!("{budget} overflows the portfolio budget total"),
                );
                warn!(project = %project.id, error = %err, "Excluding project budget from statistics");
                stats.skipped.push(SkippedRecord::project(project, err));
            }
        }

        stats.skipped.extend(
            project
                .rejected_bids()
                .iter()
                .map(|rejected| SkippedRecord::bid(project, rejected)),
        );

        match project.winning_bid() {
            Ok(Some(winner)) => match (
                discount_sum.checked_add(winner.factory_discount()),
                stats.total_profit.checked_add(winner.est_profit()),
            ) {
                (Some(discounts), Some(profit)) => {
                    stats.winning_bid_count += 1;
                    discount_sum = discounts;
                    stats.total_profit = profit;
                    *stats.vendor_win_count.entry(winner.vendor()).or_insert(0) += 1;
                }
                _ => {
                    let err = CalibrationError::invalid_input(
                        "transaction_price",
                        "winning bid overflows the portfolio totals",
                    );
                    warn!(project = %project.id, error = %err, "Excluding project winner from statistics");
                    stats.skipped.push(SkippedRecord {
                        project_id: project.id.clone(),
                        vendor: Some(winner.vendor()),
                        error: err,
                    });
                }
            },
            Ok(None) => {}
            Err(err) => {
                warn!(project = %project.id, error = %err, "Excluding project winner from statistics");
                stats.skipped.push(SkippedRecord::project(project, err));
            }
        }
    }

    if stats.winning_bid_count > 0 {
        stats.avg_factory_discount = discount_sum / Decimal::from(stats.winning_bid_count);
    }

    info!(
        projects = stats.project_count,
        winners = stats.winning_bid_count,
        skipped = stats.skipped.len(),
        total_budget = %stats.total_budget,
        "Aggregated portfolio"
    );

    stats
}
