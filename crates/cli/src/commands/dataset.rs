//! Dataset and query flags shared by every reporting command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bid_ledger_calibration::{MetricDeriver, Project, ProjectQuery};
use bid_ledger_core::{AppConfig, CategorySelector, ConfigLoader};
use bid_ledger_data::DatasetLoader;
use clap::Args;
use tracing::info;

pub const DEFAULT_SEED: u64 = 42;

/// Where the ledger comes from and which slice of it to report on.
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Dataset file (.json or .csv). Mock data is generated when omitted.
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Seed for the mock generator
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Customer category ("all", a tag such as "six_major_banks", or a dashboard label)
    #[arg(short = 'C', long, default_value = "all")]
    pub category: CategorySelector,

    /// Case-sensitive substring of project or customer name
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: PathBuf,

    /// Config profile layered over the base file (e.g. "vat13" reads Config.vat13.toml)
    #[arg(long)]
    pub profile: Option<String>,
}

/// A calibrated ledger and the query selecting from it.
#[derive(Debug)]
pub struct LoadedLedger {
    pub config: AppConfig,
    pub projects: Vec<Project>,
    pub query: ProjectQuery,
}

impl LoadedLedger {
    /// Projects matching the active query, in ledger order.
    #[must_use]
    pub fn selected(&self) -> Vec<&Project> {
        self.query.apply(&self.projects)
    }
}

impl DatasetArgs {
    /// Loads the layered configuration.
    ///
    /// # Errors
    /// Returns error if a config source is malformed.
    pub fn load_config(&self) -> Result<AppConfig> {
        match &self.profile {
            Some(profile) => ConfigLoader::load_profile_from(&self.config, profile),
            None => ConfigLoader::load_from(&self.config),
        }
        .with_context(|| format!("Failed to load config from {}", self.config.display()))
    }

    #[must_use]
    pub fn query(&self) -> ProjectQuery {
        ProjectQuery::new(self.category, self.search.as_str())
    }

    /// Loads config and dataset, then calibrates every project.
    ///
    /// # Errors
    /// Returns error if the config or dataset cannot be loaded.
    pub fn load(&self) -> Result<LoadedLedger> {
        let config = self.load_config()?;
        let inputs = DatasetLoader::load_or_mock(self.data.as_deref(), self.seed)?;

        let deriver = MetricDeriver::with_config(&config.calibration);
        info!(
            projects = inputs.len(),
            tax_and_rebate_rate = %deriver.tax_and_rebate_rate(),
            "Calibrating ledger"
        );
        let projects = deriver.calibrate_all(inputs);

        Ok(LoadedLedger {
            config,
            projects,
            query: self.query(),
        })
    }
}
