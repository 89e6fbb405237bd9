use csv::{ReaderBuilder, Trim};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ProcessingError, Result};
use crate::models::{RawTransaction, RAW_COLUMNS};
use crate::readers::encoding::read_source_text;

/// Loads raw resale CSV files into one table
pub struct TransactionReader {
    trim: bool,
}

impl TransactionReader {
    pub fn new() -> Self {
        Self { trim: true }
    }

    pub fn with_trim(trim: bool) -> Self {
        Self { trim }
    }

    /// Read every file in order and concatenate the rows.
    ///
    /// Rows keep file order then line order; no deduplication is done across
    /// files with overlapping date ranges.
    pub fn read_all<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<RawTransaction>> {
        let mut records = Vec::new();

        for path in paths {
            let path = path.as_ref();
            let file_records = self.read_file(path)?;
            info!(
                file = %path.display(),
                rows = file_records.len(),
                "Loaded raw transactions"
            );
            records.extend(file_records);
        }

        Ok(records)
    }

    /// Read a single raw file
    pub fn read_file(&self, path: &Path) -> Result<Vec<RawTransaction>> {
        let text = read_source_text(path)?;

        let mut reader = ReaderBuilder::new()
            .trim(if self.trim { Trim::All } else { Trim::None })
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| ProcessingError::source_read(path, e))?
            .clone();
        debug!(file = %path.display(), columns = headers.len(), "Read header");

        for column in RAW_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(ProcessingError::Schema {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                });
            }
        }

        let mut records = Vec::new();
        for result in reader.deserialize::<RawTransaction>() {
            let record = result.map_err(|e| ProcessingError::source_read(path, e))?;
            records.push(record);
        }

        Ok(records)
    }

    /// Resolve file names against a directory, keeping their order
    pub fn resolve_paths(dir: &Path, files: &[String]) -> Vec<PathBuf> {
        files.iter().map(|f| dir.join(f)).collect()
    }
}

impl Default for TransactionReader {
    fn default() -> Self {
        Self::new()
    }
}
