//! CSV-backed recommendation corpus

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::corpus::{CorpusSource, Recommendation};
use crate::domain::DomainError;

pub const DEFAULT_TEXT_COLUMN: &str = "Recommendation";
pub const DEFAULT_SOURCE_COLUMN: &str = "Source";

/// Reads recommendations from a headed CSV file; extra columns are ignored.
/// Every data row becomes one record, blank text included.
#[derive(Debug, Clone)]
pub struct CsvCorpus {
    path: PathBuf,
    text_column: String,
    source_column: String,
}

impl CsvCorpus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            source_column: DEFAULT_SOURCE_COLUMN.to_string(),
        }
    }

    pub fn with_columns(
        mut self,
        text_column: impl Into<String>,
        source_column: impl Into<String>,
    ) -> Self {
        self.text_column = text_column.into();
        self.source_column = source_column.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<Recommendation>, DomainError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| {
                DomainError::corpus(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        let headers = reader
            .headers()
            .map_err(|e| DomainError::corpus(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DomainError::corpus(format!("CSV must have '{}' column", name)))
        };
        let text_idx = column(&self.text_column)?;
        let source_idx = column(&self.source_column)?;

        let mut records = Vec::new();
        for (row_num, result) in reader.records().enumerate() {
            // Header is line 1
            let line = row_num + 2;
            let row = result
                .map_err(|e| DomainError::corpus(format!("Malformed CSV row {}: {}", line, e)))?;

            let field = |idx: usize, name: &str| {
                row.get(idx).ok_or_else(|| {
                    DomainError::corpus(format!("Row {} is missing the '{}' column", line, name))
                })
            };
            let text = field(text_idx, &self.text_column)?;
            let source = field(source_idx, &self.source_column)?;

            records.push(Recommendation::new(text, source));
        }

        Ok(records)
    }
}

impl CorpusSource for CsvCorpus {
    fn load(&self) -> Result<Vec<Recommendation>, DomainError> {
        let records = self.read()?;

        debug!(
            path = %self.path.display(),
            records = records.len(),
            "Corpus loaded"
        );

        Ok(records)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
