use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use bid_ledger_calibration::Project;
use csv::Writer;
use tracing::info;

const LEDGER_HEADER: [&str; 19] = [
    "project_id",
    "customer_name",
    "category",
    "status",
    "date",
    "vendor",
    "product_model",
    "channel_name",
    "list_price",
    "transaction_price",
    "channel_margin",
    "tax_and_rebate_rate",
    "factory_outbound_price",
    "customer_discount",
    "factory_discount",
    "est_profit",
    "mfg_margin",
    "sales_margin",
    "is_winner",
];

pub struct CsvStorage;

impl CsvStorage {
    /// Writes the bid-level reconciliation statement to a CSV file.
    ///
    /// Format: one row per calibrated bid, raw inputs followed by derived
    /// metrics. Rejected bids carry no metrics and are left out.
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write_ledger(path: impl AsRef<Path>, projects: &[&Project]) -> Result<usize> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        let rows = Self::write_ledger_to(file, projects)?;

        info!(path = %path.display(), rows, "Wrote ledger export");
        Ok(rows)
    }

    /// Writes the reconciliation statement to any writer, returning the row count.
    ///
    /// # Errors
    /// Returns error if writing fails
    pub fn write_ledger_to<W: Write>(out: W, projects: &[&Project]) -> Result<usize> {
        let mut writer = Writer::from_writer(out);
        writer.write_record(LEDGER_HEADER)?;

        let mut rows = 0;
        for project in projects {
            for bid in project.bids() {
                let raw = bid.raw();
                let m = bid.metrics();
                writer.write_record(&[
                    project.id.clone(),
                    project.customer_name.clone(),
                    project.category.tag().to_string(),
                    project.status.as_str().to_string(),
                    project.date.clone(),
                    raw.vendor.tag().to_string(),
                    raw.product_model.clone(),
                    raw.channel_name.clone(),
                    raw.list_price.to_string(),
                    raw.transaction_price.to_string(),
                    raw.channel_margin.to_string(),
                    m.applied_tax_and_rebate_rate.to_string(),
                    m.factory_outbound_price.to_string(),
                    m.customer_discount.to_string(),
                    m.factory_discount.to_string(),
                    m.est_profit.to_string(),
                    raw.mfg_margin.to_string(),
                    raw.sales_margin.to_string(),
                    raw.is_winner.to_string(),
                ])?;
                rows += 1;
            }
        }

        writer.flush()?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bid_ledger_calibration::MetricDeriver;
    use bid_ledger_core::{CustomerCategory, ProjectInput, ProjectStatus, RawBid, Vendor};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn project() -> Project {
        let bid = |vendor: Vendor, list: Decimal, winner: bool| RawBid {
            vendor,
            product_model: vendor.flagship_model().to_string(),
            list_price: list,
            transaction_price: dec!(700000),
            channel_margin: dec!(0.10),
            tax_and_rebate_rate: None,
            channel_name: "Integrator-A".to_string(),
            mfg_margin: dec!(0.45),
            sales_margin: dec!(0.30),
            is_winner: winner,
        };
        MetricDeriver::new().calibrate_project(ProjectInput {
            id: "FIN-2024-001".to_string(),
            project_name: "ICBC 2024 production center build".to_string(),
            customer_name: "ICBC".to_string(),
            category: CustomerCategory::SixMajorBanks,
            status: ProjectStatus::Closed,
            date: "2024-03".to_string(),
            budget: dec!(1000000),
            landscape: "winner decided".to_string(),
            bids: vec![
                bid(Vendor::Huawei, dec!(1000000), true),
                bid(Vendor::Cisco, Decimal::ZERO, false),
            ],
        })
    }

    #[test]
    fn test_ledger_rows_carry_derived_columns() {
        let p = project();
        let mut buffer = Vec::new();
        let rows = CsvStorage::write_ledger_to(&mut buffer, &[&p]).unwrap();
        assert_eq!(rows, 1);

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("project_id,customer_name,category"));

        let fields: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(fields[0], "FIN-2024-001");
        assert_eq!(fields[2], "six_major_banks");
        assert_eq!(fields[5], "huawei");
        assert_eq!(fields[11], "0.20");
        assert_eq!(fields[12].parse::<Decimal>().unwrap(), dec!(490000));
        assert_eq!(fields[14].parse::<Decimal>().unwrap(), dec!(0.49));
        assert_eq!(fields[18], "true");
    }

    #[test]
    fn test_write_ledger_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let p = project();

        let rows = CsvStorage::write_ledger(&path, &[&p]).unwrap();
        assert_eq!(rows, 1);
        assert!(std::fs::read_to_string(&path).unwrap().contains("CE12800/S12700"));
    }
}
