use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

use anyhow::{Context, Result};
use bid_ledger_core::ProjectInput;
use tracing::info;

/// Reads a JSON array of projects with nested raw bids.
pub struct JsonSource;

impl JsonSource {
    /// Loads projects from a JSON file.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or is not a valid project array
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<ProjectInput>> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open JSON dataset: {}", path.display()))?;
        let projects = Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse JSON dataset: {}", path.display()))?;

        info!(path = %path.display(), projects = projects.len(), "Loaded JSON dataset");
        Ok(projects)
    }

    /// Parses projects from any reader.
    ///
    /// # Errors
    /// Returns error if the content is not a valid project array
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ProjectInput>> {
        let projects: Vec<ProjectInput> = serde_json::from_reader(reader)?;
        Ok(projects)
    }

    /// Writes projects as a pretty-printed JSON array.
    ///
    /// # Errors
    /// Returns error if file cannot be created or serialization fails
    pub fn write(path: impl AsRef<Path>, projects: &[ProjectInput]) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), projects)?;
        Ok(())
    }
}
