use std::path::Path;

use anyhow::{bail, Result};
use bid_ledger_core::ProjectInput;
use tracing::info;

use crate::csv_source::CsvSource;
use crate::json_source::JsonSource;
use crate::mock::MockGenerator;

/// Picks a dataset source from the command-line inputs.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Loads a dataset file, choosing the reader by extension.
    ///
    /// # Errors
    /// Returns error for an unsupported extension or if the reader fails
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<ProjectInput>> {
        let path = path.as_ref();
        match Self::extension(path).as_deref() {
            Some("json") => JsonSource::load(path),
            Some("csv") => CsvSource::load(path),
            _ => bail!(
                "Unsupported dataset format: {} (expected .json or .csv)",
                path.display()
            ),
        }
    }

    /// Saves projects to a dataset file, choosing the writer by extension.
    ///
    /// # Errors
    /// Returns error for an unsupported extension or if writing fails
    pub fn save(path: impl AsRef<Path>, projects: &[ProjectInput]) -> Result<()> {
        let path = path.as_ref();
        match Self::extension(path).as_deref() {
            Some("json") => JsonSource::write(path, projects)?,
            Some("csv") => CsvSource::write(path, projects)?,
            _ => bail!(
                "Unsupported dataset format: {} (expected .json or .csv)",
                path.display()
            ),
        }
        info!(path = %path.display(), projects = projects.len(), "Saved dataset");
        Ok(())
    }

    fn extension(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// Loads the given file, or generates the mock ledger when no file is set.
    ///
    /// # Errors
    /// Returns error if the file cannot be loaded
    pub fn load_or_mock(path: Option<&Path>, seed: u64) -> Result<Vec<ProjectInput>> {
        match path {
            Some(path) => Self::load(path),
            None => {
                info!(seed, "No dataset given, using mock data");
                Ok(MockGenerator::new(seed).generate())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MOCK_PROJECT_COUNT;

    #[test]
    fn test_dispatch_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("ledger.JSON");
        std::fs::write(&json, "[]").unwrap();
        assert!(DatasetLoader::load(&json).unwrap().is_empty());

        let csv = dir.path().join("ledger.csv");
        std::fs::write(
            &csv,
            "project_id,project_name,customer_name,category,status,date,budget,landscape,\
             vendor,product_model,list_price,transaction_price,channel_margin,\
             tax_and_rebate_rate,channel_name,mfg_margin,sales_margin,is_winner\n",
        )
        .unwrap();
        assert!(DatasetLoader::load(&csv).unwrap().is_empty());

        let other = dir.path().join("ledger.xlsx");
        std::fs::write(&other, "").unwrap();
        let err = DatasetLoader::load(&other).unwrap_err();
        assert!(err.to_string().contains("Unsupported dataset format"));
    }

    #[test]
    fn test_save_mock_as_csv_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mock.csv");
        let projects = MockGenerator::new(42).generate();

        DatasetLoader::save(&path, &projects).unwrap();
        assert_eq!(DatasetLoader::load(&path).unwrap(), projects);
    }

    #[test]
    fn test_mock_when_no_path() {
        let projects = DatasetLoader::load_or_mock(None, 42).unwrap();
        assert_eq!(projects.len(), MOCK_PROJECT_COUNT);
    }
}
