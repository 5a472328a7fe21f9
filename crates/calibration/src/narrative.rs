//! Payload for the external narrative service.
//!
//! The calibration engine only packages its results; sending the request and
//! handling the reply is left to the caller.

use bid_ledger_core::AppConfig;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::filter::ProjectQuery;
use crate::portfolio::PortfolioStats;

/// Summary handed to the narrative service together with its prompt.
#[derive(Debug, Clone, Serialize)]
pub struct NarrativeRequest {
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub query: ProjectQuery,
    pub tax_and_rebate_rate: Decimal,
    pub stats: PortfolioStats,
    pub prompt: String,
}

impl NarrativeRequest {
    /// Builds the request for the given statistics and active query.
    #[must_use]
    pub fn build(stats: &PortfolioStats, query: &ProjectQuery, config: &AppConfig) -> Self {
        let rate = config.calibration.tax_and_rebate_rate;
        Self {
            generated_at: Utc::now(),
            model: config.narrative.model.clone(),
            query: query.clone(),
            tax_and_rebate_rate: rate,
            stats: stats.clone(),
            prompt: build_prompt(stats, query, rate),
        }
    }
}

fn build_prompt(stats: &PortfolioStats, query: &ProjectQuery, rate: Decimal) -> String {
    let pct = Decimal::ONE_HUNDRED;
    let mut prompt = String::new();

    prompt.push_str(
        "Analyze the financial-sector network equipment bid ledger. Factory outbound \
         discounts have been calibrated as follows:\n",
    );
    prompt.push_str(&format!(
        "factory outbound price = transaction price - channel profit - \
         (transaction price x {:.0}% tax and rebate).\n\n",
        rate * pct
    ));

    prompt.push_str(&format!("Scope: category {}", query.category));
    if !query.term.is_empty() {
        prompt.push_str(&format!(", search \"{}\"", query.term));
    }
    prompt.push_str(".\n");
    prompt.push_str(&format!(
        "Projects: {}, awarded: {}, total budget: {}, average factory discount: {:.2}%, \
         total channel profit: {}.\n",
        stats.project_count,
        stats.winning_bid_count,
        stats.total_budget.round_dp(2),
        (stats.avg_factory_discount * pct).round_dp(2),
        stats.total_profit.round_dp(2),
    ));

    if !stats.vendor_win_count.is_empty() {
        let wins: Vec<String> = stats
            .vendor_win_count
            .iter()
            .map(|(vendor, count)| format!("{vendor} {count}"))
            .collect();
        prompt.push_str(&format!("Wins by vendor: {}.\n", wins.join(", ")));
    }

    prompt.push_str(
        "\nWrite an in-depth report on true factory outbound discounts:\n\
         - Compare the real pricing strategies of Huawei, Cisco and H3C once channel and tax \
         costs are stripped out.\n\
         - Assess whether the lowest prices in six-major-bank projects approach the vendor's \
         cost line, taking the estimated manufacturing margin into account.\n",
    );
    prompt.push_str(&format!(
        "- Discuss how vendors use list-price positioning to stay compliant under the fixed \
         {:.0}% tax and rebate deduction.\n",
        rate * pct
    ));
    prompt.push_str("Use Markdown.");

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use bid_ledger_core::{CategorySelector, CustomerCategory, Vendor};
    use rust_decimal_macros::dec;

    fn stats() -> PortfolioStats {
        let mut stats = PortfolioStats {
            project_count: 3,
            total_budget: dec!(9000000),
            winning_bid_count: 2,
            avg_factory_discount: dec!(0.1234),
            total_profit: dec!(150000),
            ..PortfolioStats::default()
        };
        stats.vendor_win_count.insert(Vendor::Huawei, 2);
        stats
    }

    #[test]
    fn test_prompt_reflects_configured_rate() {
        let mut config = AppConfig::default();
        config.calibration.tax_and_rebate_rate = dec!(0.13);

        let request = NarrativeRequest::build(&stats(), &ProjectQuery::all(), &config);

        assert_eq!(request.tax_and_rebate_rate, dec!(0.13));
        assert!(request.prompt.contains("x 13% tax and rebate"));
        assert!(request.prompt.contains("fixed 13% tax"));
        assert!(request.prompt.contains("average factory discount: 12.34%"));
        assert!(request.prompt.contains("Wins by vendor: Huawei 2."));
    }

    #[test]
    fn test_prompt_includes_scope() {
        let query = ProjectQuery::new(
            CategorySelector::Only(CustomerCategory::SixMajorBanks),
            "ICBC",
        );
        let request = NarrativeRequest::build(&stats(), &query, &AppConfig::default());

        assert!(request
            .prompt
            .contains("Scope: category Six Major Banks, search \"ICBC\"."));
        assert_eq!(request.model, "gemini-3-flash-preview");
    }

    #[test]
    fn test_request_serializes_stats() {
        let request = NarrativeRequest::build(&stats(), &ProjectQuery::all(), &AppConfig::default());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["stats"]["project_count"], 3);
        assert_eq!(json["stats"]["vendor_win_count"]["huawei"], 2);
        assert_eq!(json["query"]["category"], "all");
    }
}
