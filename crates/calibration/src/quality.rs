//! Data-quality audit.
//!
//! These checks cover assumptions the source data is expected to satisfy but
//! that are not hard constraints. They never reject anything; they only
//! report.

use bid_ledger_core::{ProjectStatus, Vendor};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::project::Project;

/// A suspicious but non-fatal property of a project or one of its bids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum DataQualityIssue {
    /// Customer pays more than the catalog price.
    TransactionAboveList {
        vendor: Vendor,
        transaction_price: Decimal,
        list_price: Decimal,
    },
    /// Manufacturing margin estimate below the sales margin estimate.
    MfgMarginBelowSalesMargin {
        vendor: Vendor,
        mfg_margin: Decimal,
        sales_margin: Decimal,
    },
    /// Deductions exceed the transaction price.
    UneconomicBid {
        vendor: Vendor,
        factory_outbound_price: Decimal,
    },
    /// A planned project already has a winner.
    PlannedProjectHasWinner,
    NoBids,
    /// Budget is zero or negative.
    NonPositiveBudget { budget: Decimal },
}

impl std::fmt::Display for DataQualityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransactionAboveList {
                vendor,
                transaction_price,
                list_price,
            } => write!(
                f,
                "{vendor}: transaction price {transaction_price} exceeds list price {list_price}"
            ),
            Self::MfgMarginBelowSalesMargin {
                vendor,
                mfg_margin,
                sales_margin,
            } => write!(
                f,
                "{vendor}: manufacturing margin {mfg_margin} below sales margin {sales_margin}"
            ),
            Self::UneconomicBid {
                vendor,
                factory_outbound_price,
            } => write!(f, "{vendor}: negative outbound price {factory_outbound_price}"),
            Self::PlannedProjectHasWinner => write!(f, "planned project already has a winner"),
            Self::NoBids => write!(f, "project has no bids"),
            Self::NonPositiveBudget { budget } => write!(f, "budget {budget} is not positive"),
        }
    }
}

/// Audit findings of one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectAudit {
    pub project_id: String,
    pub issues: Vec<DataQualityIssue>,
}

/// Lists the data-quality issues of a project.
#[must_use]
pub fn audit_project(project: &Project) -> Vec<DataQualityIssue> {
    let mut issues = Vec::new();

    if project.budget <= Decimal::ZERO {
        issues.push(DataQualityIssue::NonPositiveBudget {
            budget: project.budget,
        });
    }
    if project.bid_count() == 0 {
        issues.push(DataQualityIssue::NoBids);
    }

    let raw_bids = project
        .bids()
        .iter()
        .map(|b| b.raw())
        .chain(project.rejected_bids().iter().map(|r| &r.raw));

    for raw in raw_bids {
        if raw.transaction_price > raw.list_price {
            issues.push(DataQualityIssue::TransactionAboveList {
                vendor: raw.vendor,
                transaction_price: raw.transaction_price,
                list_price: raw.list_price,
            });
        }
        if raw.mfg_margin < raw.sales_margin {
            issues.push(DataQualityIssue::MfgMarginBelowSalesMargin {
                vendor: raw.vendor,
                mfg_margin: raw.mfg_margin,
                sales_margin: raw.sales_margin,
            });
        }
    }

    for bid in project.bids() {
        if bid.metrics().is_uneconomic() {
            issues.push(DataQualityIssue::UneconomicBid {
                vendor: bid.vendor(),
                factory_outbound_price: bid.metrics().factory_outbound_price,
            });
        }
    }

    let has_winner = project.bids().iter().any(|b| b.is_winner())
        || project.rejected_bids().iter().any(|r| r.raw.is_winner);
    if project.status == ProjectStatus::Planned && has_winner {
        issues.push(DataQualityIssue::PlannedProjectHasWinner);
    }

    for issue in &issues {
        warn!(project = %project.id, %issue, "Data quality issue");
    }

    issues
}

/// Audits every project, returning only those with findings.
pub fn audit_portfolio<'a, I>(projects: I) -> Vec<ProjectAudit>
where
    I: IntoIterator<Item = &'a Project>,
{
    projects
        .into_iter()
        .filter_map(|project| {
            let issues = audit_project(project);
            (!issues.is_empty()).then(|| ProjectAudit {
                project_id: project.id.clone(),
                issues,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MetricDeriver;
    use bid_ledger_core::{CustomerCategory, ProjectInput, RawBid};
    use rust_decimal_macros::dec;

    fn clean_bid(vendor: Vendor) -> RawBid {
        RawBid {
            vendor,
            product_model: vendor.flagship_model().to_string(),
            list_price: dec!(5000000),
            transaction_price: dec!(700000),
            channel_margin: dec!(0.10),
            tax_and_rebate_rate: None,
            channel_name: "Integrator-E".to_string(),
            mfg_margin: dec!(0.45),
            sales_margin: dec!(0.30),
            is_winner: false,
        }
    }

    fn project(status: ProjectStatus, bids: Vec<RawBid>) -> Project {
        MetricDeriver::new().calibrate_project(ProjectInput {
            id: "FIN-2025-021".to_string(),
            project_name: "Bank of Shanghai 2025 production center build".to_string(),
            customer_name: "Bank of Shanghai".to_string(),
            category: CustomerCategory::CityCommercialBanks,
            status,
            date: "2025-06".to_string(),
            budget: dec!(3000000),
            landscape: "contested".to_string(),
            bids,
        })
    }

    #[test]
    fn test_clean_project_has_no_issues() {
        let p = project(
            ProjectStatus::Planned,
            vec![clean_bid(Vendor::Huawei), clean_bid(Vendor::Cisco)],
        );
        assert!(audit_project(&p).is_empty());
    }

    #[test]
    fn test_margin_and_price_assumptions() {
        let mut bid = clean_bid(Vendor::Ruijie);
        bid.transaction_price = dec!(6000000);
        bid.mfg_margin = dec!(0.10);
        bid.sales_margin = dec!(0.20);

        let issues = audit_project(&project(ProjectStatus::Closed, vec![bid]));
        assert_eq!(issues.len(), 2);
        assert!(matches!(
            issues[0],
            DataQualityIssue::TransactionAboveList { vendor: Vendor::Ruijie, .. }
        ));
        assert!(matches!(
            issues[1],
            DataQualityIssue::MfgMarginBelowSalesMargin { .. }
        ));
    }

    #[test]
    fn test_uneconomic_bid_reported() {
        let mut bid = clean_bid(Vendor::Juniper);
        bid.channel_margin = dec!(0.85);

        let issues = audit_project(&project(ProjectStatus::Closed, vec![bid]));
        assert_eq!(
            issues,
            vec![DataQualityIssue::UneconomicBid {
                vendor: Vendor::Juniper,
                factory_outbound_price: dec!(-35000),
            }]
        );
    }

    #[test]
    fn test_planned_project_with_winner() {
        let mut bid = clean_bid(Vendor::H3c);
        bid.is_winner = true;

        let issues = audit_project(&project(ProjectStatus::Planned, vec![bid]));
        assert_eq!(issues, vec![DataQualityIssue::PlannedProjectHasWinner]);
    }

    #[test]
    fn test_audit_portfolio_keeps_only_findings() {
        let clean = project(ProjectStatus::Closed, vec![clean_bid(Vendor::Huawei)]);
        let mut empty = project(ProjectStatus::Closed, vec![]);
        empty.id = "EMPTY".to_string();

        let audits = audit_portfolio(&[clean, empty]);
        assert_eq!(audits.len(), 1);
        assert_eq!(audits[0].project_id, "EMPTY");
        assert_eq!(audits[0].issues, vec![DataQualityIssue::NoBids]);
    }

    #[test]
    fn test_non_positive_budget_reported() {
        let mut zero = project(ProjectStatus::Closed, vec![clean_bid(Vendor::Huawei)]);
        zero.budget = Decimal::ZERO;
        assert_eq!(
            audit_project(&zero),
            vec![DataQualityIssue::NonPositiveBudget {
                budget: Decimal::ZERO
            }]
        );

        let mut negative = project(ProjectStatus::Closed, vec![]);
        negative.budget = dec!(-500000);
        let issues = audit_project(&negative);
        assert_eq!(
            issues,
            vec![
                DataQualityIssue::NonPositiveBudget {
                    budget: dec!(-500000)
                },
                DataQualityIssue::NoBids,
            ]
        );
        assert_eq!(issues[0].to_string(), "budget -500000 is not positive");
    }
}
