//! Mock dataset generation.

use std::path::PathBuf;

use anyhow::Result;
use bid_ledger_data::{DatasetLoader, MockGenerator};
use clap::Args;

use super::dataset::DEFAULT_SEED;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Seed for the generator
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output file (.json or .csv)
    #[arg(short, long, default_value = "data/mock_ledger.json")]
    pub output: PathBuf,
}

/// Writes the seeded mock ledger to a dataset file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn run_generate(args: &GenerateArgs) -> Result<()> {
    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let projects = MockGenerator::new(args.seed).generate();
    DatasetLoader::save(&args.output, &projects)?;

    println!(
        "Generated {} projects (seed {}) to {}",
        projects.len(),
        args.seed,
        args.output.display()
    );
    Ok(())
}
