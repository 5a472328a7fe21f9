use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use bid_ledger_core::{CustomerCategory, ProjectInput, ProjectStatus, RawBid, Vendor};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One bid per row, with the owning project's columns repeated.
///
/// Format: project_id,project_name,customer_name,category,status,date,budget,
/// landscape,vendor,product_model,list_price,transaction_price,channel_margin,
/// tax_and_rebate_rate,channel_name,mfg_margin,sales_margin,is_winner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidRow {
    pub project_id: String,
    pub project_name: String,
    pub customer_name: String,
    pub category: CustomerCategory,
    pub status: ProjectStatus,
    pub date: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub budget: Decimal,
    #[serde(default)]
    pub landscape: String,
    pub vendor: Vendor,
    pub product_model: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub list_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub transaction_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub channel_margin: Decimal,
    /// Blank means "use the configured rate".
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub tax_and_rebate_rate: Option<Decimal>,
    pub channel_name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub mfg_margin: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub sales_margin: Decimal,
    #[serde(default)]
    pub is_winner: bool,
}

impl BidRow {
    /// Flattens one bid together with its project's columns.
    #[must_use]
    pub fn from_parts(project: &ProjectInput, bid: &RawBid) -> Self {
        Self {
            project_id: project.id.clone(),
            project_name: project.project_name.clone(),
            customer_name: project.customer_name.clone(),
            category: project.category,
            status: project.status,
            date: project.date.clone(),
            budget: project.budget,
            landscape: project.landscape.clone(),
            vendor: bid.vendor,
            product_model: bid.product_model.clone(),
            list_price: bid.list_price,
            transaction_price: bid.transaction_price,
            channel_margin: bid.channel_margin,
            tax_and_rebate_rate: bid.tax_and_rebate_rate,
            channel_name: bid.channel_name.clone(),
            mfg_margin: bid.mfg_margin,
            sales_margin: bid.sales_margin,
            is_winner: bid.is_winner,
        }
    }

    fn into_parts(self) -> (ProjectInput, RawBid) {
        let bid = RawBid {
            vendor: self.vendor,
            product_model: self.product_model,
            list_price: self.list_price,
            transaction_price: self.transaction_price,
            channel_margin: self.channel_margin,
            tax_and_rebate_rate: self.tax_and_rebate_rate,
            channel_name: self.channel_name,
            mfg_margin: self.mfg_margin,
            sales_margin: self.sales_margin,
            is_winner: self.is_winner,
        };
        let project = ProjectInput {
            id: self.project_id,
            project_name: self.project_name,
            customer_name: self.customer_name,
            category: self.category,
            status: self.status,
            date: self.date,
            budget: self.budget,
            landscape: self.landscape,
            bids: Vec::new(),
        };
        (project, bid)
    }
}

/// Reads flat bid rows and regroups them into projects.
pub struct CsvSource;

impl CsvSource {
    /// Loads projects from a CSV file.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or a row fails to parse
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<ProjectInput>> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open CSV dataset: {}", path.display()))?;
        let projects = Self::from_reader(file)
            .with_context(|| format!("Failed to parse CSV dataset: {}", path.display()))?;

        info!(path = %path.display(), projects = projects.len(), "Loaded CSV dataset");
        Ok(projects)
    }

    /// Parses rows from any reader, grouping them by project id.
    ///
    /// Projects keep the order in which their id first appears. Project
    /// columns are taken from the first row of each group.
    ///
    /// # Errors
    /// Returns error if a row fails to parse
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ProjectInput>> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut projects: Vec<ProjectInput> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (line, row) in reader.deserialize::<BidRow>().enumerate() {
            let row = row.with_context(|| format!("Invalid bid row {}", line + 1))?;
            let (project, bid) = row.into_parts();

            let slot = match index.get(&project.id) {
                Some(&slot) => slot,
                None => {
                    debug!(project = %project.id, "New project in CSV dataset");
                    index.insert(project.id.clone(), projects.len());
                    projects.push(project);
                    projects.len() - 1
                }
            };
            projects[slot].bids.push(bid);
        }

        Ok(projects)
    }

    /// Writes one row per bid. Projects without bids have no rows.
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write(path: impl AsRef<Path>, projects: &[ProjectInput]) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        let mut writer = csv::Writer::from_writer(file);

        for project in projects {
            for bid in &project.bids {
                writer.serialize(BidRow::from_parts(project, bid))?;
            }
        }

        writer.flush()?;
        Ok(())
    }
}
