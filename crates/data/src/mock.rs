//! Seeded synthetic ledger.
//!
//! Reproduces the distribution of the demo dataset the dashboard ships with,
//! but deterministically: the same seed always yields the same projects.

use bid_ledger_core::{
    CustomerCategory, ProjectInput, ProjectStatus, RawBid, Vendor, DEFAULT_TAX_AND_REBATE_RATE,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;
use tracing::info;

pub const MOCK_PROJECT_COUNT: usize = 30;

/// Projects numbered up to this one are closed with a single winner.
const CLOSED_PROJECT_COUNT: usize = 18;

const SIX_MAJOR_BANKS: [&str; 6] = [
    "ICBC",
    "Agricultural Bank of China",
    "Bank of China",
    "China Construction Bank",
    "Bank of Communications",
    "Postal Savings Bank",
];

const JOINT_STOCK_BANKS: [&str; 10] = [
    "China Merchants Bank",
    "SPD Bank",
    "China CITIC Bank",
    "China Everbright Bank",
    "Hua Xia Bank",
    "China Minsheng Bank",
    "China Guangfa Bank",
    "Ping An Bank",
    "Industrial Bank",
    "China Zheshang Bank",
];

const CITY_COMMERCIAL_BANKS: [&str; 10] = [
    "Bank of Beijing",
    "Bank of Shanghai",
    "Bank of Jiangsu",
    "Bank of Nanjing",
    "Bank of Ningbo",
    "Huishang Bank",
    "Bank of Hangzhou",
    "Xiamen Bank",
    "Bank of Chongqing",
    "Bank of Chengdu",
];

const SECURITIES_INSURANCE: [&str; 10] = [
    "Ping An Insurance",
    "China Life",
    "PICC",
    "CPIC",
    "CITIC Securities",
    "CICC",
    "Huatai Securities",
    "Haitong Securities",
    "GF Securities",
    "Guotai Junan",
];

/// Category rotation, indexed by project number modulo 4.
const CATEGORY_CYCLE: [CustomerCategory; 4] = [
    CustomerCategory::SixMajorBanks,
    CustomerCategory::CityCommercialBanks,
    CustomerCategory::JointStockBanks,
    CustomerCategory::SecuritiesInsurance,
];

fn customers(category: CustomerCategory) -> &'static [&'static str] {
    match category {
        CustomerCategory::SixMajorBanks => &SIX_MAJOR_BANKS,
        CustomerCategory::JointStockBanks => &JOINT_STOCK_BANKS,
        CustomerCategory::CityCommercialBanks => &CITY_COMMERCIAL_BANKS,
        CustomerCategory::SecuritiesInsurance => &SECURITIES_INSURANCE,
    }
}

/// Ratio drawn uniformly from `[lo, hi)` basis points.
fn basis_points(rng: &mut ChaCha8Rng, lo: i64, hi: i64) -> Decimal {
    Decimal::new(rng.gen_range(lo..hi), 4)
}

pub struct MockGenerator {
    rng: ChaCha8Rng,
}

impl MockGenerator {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generates the full synthetic ledger.
    pub fn generate(&mut self) -> Vec<ProjectInput> {
        let projects: Vec<ProjectInput> = (1..=MOCK_PROJECT_COUNT)
            .map(|number| self.project(number))
            .collect();
        info!(projects = projects.len(), "Generated mock dataset");
        projects
    }

    fn project(&mut self, number: usize) -> ProjectInput {
        let category = CATEGORY_CYCLE[number % CATEGORY_CYCLE.len()];
        let names = customers(category);
        let customer = names[number % names.len()];
        let closed = number <= CLOSED_PROJECT_COUNT;

        let year = match (closed, self.rng.gen_bool(0.5)) {
            (true, true) => 2023,
            (true, false) => 2024,
            (false, true) => 2025,
            (false, false) => 2026,
        };
        let budget = Decimal::from(self.rng.gen_range(1_000_000_i64..9_000_000));

        let bidder_count = self.rng.gen_range(2..=4);
        let mut vendors = Vendor::ALL.to_vec();
        vendors.shuffle(&mut self.rng);
        vendors.truncate(bidder_count);
        let winner = closed.then(|| self.rng.gen_range(0..bidder_count));

        let bids = vendors
            .into_iter()
            .enumerate()
            .map(|(idx, vendor)| self.bid(vendor, budget, winner == Some(idx)))
            .collect();

        let scope = if number % 3 == 0 {
            "cloud network"
        } else {
            "production center"
        };
        let month = self.rng.gen_range(1..=12);

        ProjectInput {
            id: format!("FIN-{year}-{number:03}"),
            project_name: format!("{customer} {year} {scope} build"),
            customer_name: customer.to_string(),
            category,
            status: if closed {
                ProjectStatus::Closed
            } else {
                ProjectStatus::Planned
            },
            date: format!("{year}-{month:02}"),
            budget,
            landscape: if winner.is_some() {
                "winner decided".to_string()
            } else {
                "multi-vendor contest".to_string()
            },
            bids,
        }
    }

    fn bid(&mut self, vendor: Vendor, budget: Decimal, is_winner: bool) -> RawBid {
        let transaction_price = (budget * basis_points(&mut self.rng, 6_000, 10_000)).round_dp(2);
        let list_price =
            (transaction_price * basis_points(&mut self.rng, 50_000, 100_000)).round_dp(2);
        let channel_margin = basis_points(&mut self.rng, 300, 1_500);
        let sales_margin = basis_points(&mut self.rng, 1_000, 3_500);
        let mfg_margin = sales_margin + basis_points(&mut self.rng, 1_000, 2_500);
        let channel = char::from(b'A' + self.rng.gen_range(0..10_u8));

        RawBid {
            vendor,
            product_model: vendor.flagship_model().to_string(),
            list_price,
            transaction_price,
            channel_margin,
            tax_and_rebate_rate: Some(DEFAULT_TAX_AND_REBATE_RATE),
            channel_name: format!("Integrator-{channel}"),
            mfg_margin,
            sales_margin,
            is_winner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_same_seed_same_ledger() {
        let a = MockGenerator::new(42).generate();
        let b = MockGenerator::new(42).generate();
        let c = MockGenerator::new(7).generate();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_closed_projects_have_one_winner() {
        let projects = MockGenerator::new(42).generate();
        assert_eq!(projects.len(), MOCK_PROJECT_COUNT);

        for (i, project) in projects.iter().enumerate() {
            if i < CLOSED_PROJECT_COUNT {
                assert_eq!(project.status, ProjectStatus::Closed);
                assert_eq!(project.winner_flags(), 1, "{}", project.id);
            } else {
                assert_eq!(project.status, ProjectStatus::Planned);
                assert_eq!(project.winner_flags(), 0, "{}", project.id);
            }
        }
    }

    #[test]
    fn test_value_ranges() {
        for project in MockGenerator::new(1234).generate() {
            assert!(project.budget >= dec!(1000000) && project.budget < dec!(9000000));
            assert!((2..=4).contains(&project.bids.len()));

            let mut vendors: Vec<Vendor> = project.bids.iter().map(|b| b.vendor).collect();
            vendors.sort();
            vendors.dedup();
            assert_eq!(vendors.len(), project.bids.len());

            for bid in &project.bids {
                assert!(bid.transaction_price >= project.budget * dec!(0.6));
                assert!(bid.transaction_price <= project.budget);
                assert!(bid.list_price >= bid.transaction_price * dec!(5));
                assert!(bid.channel_margin >= dec!(0.03) && bid.channel_margin < dec!(0.15));
                assert!(bid.mfg_margin - bid.sales_margin >= dec!(0.10));
                assert_eq!(bid.tax_and_rebate_rate, Some(dec!(0.20)));
            }
        }
    }

    #[test]
    fn test_ids_and_categories() {
        let projects = MockGenerator::new(42).generate();

        assert!(projects[0].id.ends_with("-001"));
        assert_eq!(projects[0].category, CustomerCategory::CityCommercialBanks);
        assert_eq!(projects[0].customer_name, "Bank of Shanghai");
        assert_eq!(projects[3].category, CustomerCategory::SixMajorBanks);
        assert!(projects[2].project_name.contains("cloud network"));
    }
}
