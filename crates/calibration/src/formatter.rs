//! Plain-text rendering of portfolio reports, bid ledgers and audit findings.

#![allow(clippy::format_push_string)]

use bid_ledger_core::ReportConfig;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::filter::ProjectQuery;
use crate::portfolio::{PortfolioStats, SkippedRecord};
use crate::project::Project;
use crate::quality::ProjectAudit;

const RULE: &str = "═══════════════════════════════════════════════════════════════\n";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────\n";

/// Scales an amount to the display unit, leaving it unscaled for a zero divisor.
#[must_use]
pub fn to_display_units(value: Decimal, divisor: Decimal) -> Decimal {
    value.checked_div(divisor).unwrap_or(value)
}

/// Scales and rounds half away from zero, as chart labels show amounts.
#[must_use]
pub fn to_rounded_display_units(value: Decimal, divisor: Decimal) -> Decimal {
    to_display_units(value, divisor).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn amount(value: Decimal, divisor: Decimal) -> Decimal {
    to_display_units(value, divisor).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn pct(value: Decimal) -> Decimal {
    (value * Decimal::ONE_HUNDRED).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub struct ReportFormatter;

impl ReportFormatter {
    /// Renders the headline cards and chart groupings of a portfolio.
    #[must_use]
    pub fn format(stats: &PortfolioStats, query: &ProjectQuery, config: &ReportConfig) -> String {
        let unit = config.display_unit_divisor;
        let mut output = String::new();

        output.push('\n');
        output.push_str(RULE);
        output.push_str("                  BID CALIBRATION SUMMARY                      \n");
        output.push_str(RULE);
        output.push_str(&format!("Category:              {}\n", query.category));
        if !query.term.is_empty() {
            output.push_str(&format!("Search:                {}\n", query.term));
        }
        output.push_str(&format!("Projects:              {}\n", stats.project_count));
        output.push('\n');

        output.push_str("Headline\n");
        output.push_str(THIN_RULE);
        output.push_str(&format!(
            "Total Budget:          {} {:.2} {}\n",
            config.currency_symbol,
            amount(stats.total_budget, unit),
            config.display_unit_label
        ));
        output.push_str(&format!(
            "Avg Factory Discount:  {:.2}%\n",
            pct(stats.avg_factory_discount)
        ));
        output.push_str(&format!(
            "Channel Profit:        {} {:.2} {}\n",
            config.currency_symbol,
            amount(stats.total_profit, unit),
            config.display_unit_label
        ));
        output.push_str(&format!("Awarded Projects:      {}\n", stats.winning_bid_count));
        output.push('\n');

        output.push_str("Vendor Win Share\n");
        output.push_str(THIN_RULE);
        if stats.vendor_win_count.is_empty() {
            output.push_str("N/A (no awarded projects)\n");
        } else {
            let share = stats.vendor_win_share();
            for (vendor, wins) in &stats.vendor_win_count {
                output.push_str(&format!(
                    "{:<22} {:>3} wins  {:>6.1}%\n",
                    vendor.as_str(),
                    wins,
                    pct(share.get(vendor).copied().unwrap_or_default())
                ));
            }
        }
        output.push('\n');

        output.push_str(&format!(
            "Budget by Category ({})\n",
            config.display_unit_label
        ));
        output.push_str(THIN_RULE);
        for (category, budget) in &stats.category_budget_total {
            output.push_str(&format!(
                "{:<22} {:>12}\n",
                category.as_str(),
                to_rounded_display_units(*budget, unit)
            ));
        }
        output.push('\n');
        output.push_str(RULE);

        if !stats.skipped.is_empty() {
            output.push_str(&Self::format_skipped(&stats.skipped));
        }

        output
    }

    /// Renders one row per project, optionally followed by every bid.
    #[must_use]
    pub fn format_ledger(projects: &[&Project], config: &ReportConfig, expand: bool) -> String {
        let unit = config.display_unit_divisor;
        let mut output = String::new();

        output.push_str(&format!(
            "{:<14} {:<26} {:>14} {:>14} {:>10} {:<10} {}\n",
            "Project", "Customer", "Transaction", "Outbound", "Discount", "Winner", "Landscape"
        ));
        output.push_str(&"-".repeat(110));
        output.push('\n');

        for project in projects {
            let summary = project.summary();
            match (&summary.winner, &summary.flag) {
                (Some(winner), _) => output.push_str(&format!(
                    "{:<14} {:<26} {:>14.2} {:>14.2} {:>9.2}% {:<10} {}\n",
                    summary.id,
                    summary.customer_name,
                    amount(winner.transaction_price, unit),
                    amount(winner.factory_outbound_price, unit),
                    pct(winner.factory_discount),
                    winner.vendor.as_str(),
                    summary.landscape
                )),
                (None, Some(flag)) => output.push_str(&format!(
                    "{:<14} {:<26} {:>14} {:>14} {:>10} {:<10} {}\n",
                    summary.id, summary.customer_name, "-", "-", "FLAGGED", flag.kind(), summary.landscape
                )),
                (None, None) => output.push_str(&format!(
                    "{:<14} {:<26} {:>14} {:>14} {:>10} {:<10} {}\n",
                    summary.id, summary.customer_name, "-", "-", "pending", "N/A", summary.landscape
                )),
            }

            if expand {
                output.push_str(&Self::format_bids(project, config));
            }
        }

        output
    }

    fn format_bids(project: &Project, config: &ReportConfig) -> String {
        let unit = config.display_unit_divisor;
        let mut output = String::new();

        for bid in project.bids() {
            let raw = bid.raw();
            let m = bid.metrics();
            let marker = if bid.is_winner() { "*" } else { " " };
            output.push_str(&format!(
                "   {} {:<8} {:<26} list {:>10.2}  tx {:>10.2}  out {:>10.2}  cust {:>6.2}%  fact {:>6.2}%  \
                 margin {:>5.2}%  tax {:>5.2}%  profit {:>8.2}  mfg {:>5.2}%  sales {:>5.2}%  via {}\n",
                marker,
                bid.vendor().as_str(),
                raw.product_model,
                amount(raw.list_price, unit),
                amount(raw.transaction_price, unit),
                amount(m.factory_outbound_price, unit),
                pct(m.customer_discount),
                pct(m.factory_discount),
                pct(raw.channel_margin),
                pct(m.applied_tax_and_rebate_rate),
                amount(m.est_profit, unit),
                pct(raw.mfg_margin),
                pct(raw.sales_margin),
                raw.channel_name
            ));
        }
        for rejected in project.rejected_bids() {
            output.push_str(&format!(
                "   ! {:<8} rejected: {}\n",
                rejected.raw.vendor.as_str(),
                rejected.error
            ));
        }

        output
    }

    /// Renders records excluded from the statistics.
    #[must_use]
    pub fn format_skipped(skipped: &[SkippedRecord]) -> String {
        let mut output = String::new();
        output.push_str(&format!("\nSkipped Records ({})\n", skipped.len()));
        output.push_str(THIN_RULE);
        for record in skipped {
            let vendor = record.vendor.map_or("-", |v| v.as_str());
            output.push_str(&format!(
                "{:<14} {:<8} {}\n",
                record.project_id, vendor, record.error
            ));
        }
        output
    }

    /// Renders data-quality findings.
    #[must_use]
    pub fn format_audit(audits: &[ProjectAudit]) -> String {
        let mut output = String::new();
        if audits.is_empty() {
            output.push_str("No data quality issues found.\n");
            return output;
        }

        let total: usize = audits.iter().map(|a| a.issues.len()).sum();
        output.push_str(&format!(
            "Data Quality Issues ({total} in {} projects)\n",
            audits.len()
        ));
        output.push_str(THIN_RULE);
        for audit in audits {
            for issue in &audit.issues {
                output.push_str(&format!("{:<14} {}\n", audit.project_id, issue));
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aggregate_portfolio, MetricDeriver};
    use bid_ledger_core::{CustomerCategory, ProjectInput, ProjectStatus, RawBid, Vendor};
    use rust_decimal_macros::dec;

    fn sample() -> Vec<Project> {
        let bid = RawBid {
            vendor: Vendor::Huawei,
            product_model: "CE12800/S12700".to_string(),
            list_price: dec!(1000000),
            transaction_price: dec!(700000),
            channel_margin: dec!(0.10),
            tax_and_rebate_rate: None,
            channel_name: "Integrator-A".to_string(),
            mfg_margin: dec!(0.45),
            sales_margin: dec!(0.30),
            is_winner: true,
        };
        vec![MetricDeriver::new().calibrate_project(ProjectInput {
            id: "FIN-2024-001".to_string(),
            project_name: "ICBC 2024 production center build".to_string(),
            customer_name: "ICBC".to_string(),
            category: CustomerCategory::SixMajorBanks,
            status: ProjectStatus::Closed,
            date: "2024-04".to_string(),
            budget: dec!(1234567),
            landscape: "awarded".to_string(),
            bids: vec![bid],
        })]
    }

    #[test]
    fn test_display_units() {
        assert_eq!(to_display_units(dec!(1234567), dec!(10000)), dec!(123.4567));
        assert_eq!(to_rounded_display_units(dec!(1235000), dec!(10000)), dec!(124));
        assert_eq!(to_rounded_display_units(dec!(1234999), dec!(10000)), dec!(123));
        assert_eq!(to_display_units(dec!(42), Decimal::ZERO), dec!(42));
    }

    #[test]
    fn test_summary_report() {
        let projects = sample();
        let stats = aggregate_portfolio(&projects);
        let report = ReportFormatter::format(&stats, &ProjectQuery::all(), &ReportConfig::default());

        assert!(report.contains("Total Budget:          ¥ 123.46 x10k"));
        assert!(report.contains("Avg Factory Discount:  49.00%"));
        assert!(report.contains("Channel Profit:        ¥ 7.00 x10k"));
        assert!(report.contains("Huawei"));
        assert!(report.contains("Six Major Banks"));
        assert!(!report.contains("Skipped Records"));
    }

    #[test]
    fn test_empty_report() {
        let stats = aggregate_portfolio(&Vec::<Project>::new());
        let report = ReportFormatter::format(&stats, &ProjectQuery::all(), &ReportConfig::default());
        assert!(report.contains("N/A (no awarded projects)"));
        assert!(report.contains("Avg Factory Discount:  0.00%"));
    }

    #[test]
    fn test_ledger_rows() {
        let projects = sample();
        let refs: Vec<&Project> = projects.iter().collect();
        let ledger = ReportFormatter::format_ledger(&refs, &ReportConfig::default(), true);

        assert!(ledger.contains("FIN-2024-001"));
        assert!(ledger.contains("49.00%"));
        assert!(ledger.contains("Integrator-A"));
    }

    #[test]
    fn test_audit_without_findings() {
        assert_eq!(
            ReportFormatter::format_audit(&[]),
            "No data quality issues found.\n"
        );
    }
}
