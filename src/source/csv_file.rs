//! Local CSV export source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{info, instrument};

use super::{RecipeSource, SourceError, Table};

/// A recipe table exported to a CSV file on disk.
///
/// The file is re-read on every fetch, so edits show up on the next load.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    /// Creates a source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The CSV file this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecipeSource for CsvFileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_table(&self) -> Result<Table, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|error| SourceError::io(&self.path, error))?;

        let table = Table::from_csv(bytes.as_slice())
            .map_err(|error| SourceError::csv(self.path.display().to_string(), error))?;
        info!(rows = table.len(), columns = table.headers.len(), "Read CSV export");
        Ok(table)
    }
}
