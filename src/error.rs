use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid month '{value}' in row {row_id}: {source}")]
    DateParse {
        value: String,
        row_id: u64,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Cannot read source {}: {reason}", path.display())]
    SourceRead { path: PathBuf, reason: String },

    #[error("Source {} is missing required column '{column}'", path.display())]
    Schema { path: PathBuf, column: String },

    #[error("Malformed storey range: '{value}'")]
    MalformedRange { value: String },

    #[error("No inflation index for year {year} ({rows} records affected)")]
    MissingYearIndex { year: i32, rows: usize },

    #[error("Town '{town}' has no region mapping")]
    UnmappedRegion { town: String },

    #[error("Parquet write error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration load error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl ProcessingError {
    pub fn source_read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::SourceRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
