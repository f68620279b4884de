//! Errors raised while loading the emissions table.
//!
//! Every variant is fatal: the dashboard never starts on a partial table.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    /// The source file could not be opened or read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// A required column is absent from the header / schema / record.
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// A cell could not be interpreted for its column.
    #[error("row {row}, column '{column}': {detail}")]
    InvalidValue {
        row: usize,
        column: String,
        detail: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

impl LoadError {
    pub(crate) fn invalid(row: usize, column: &str, detail: impl Into<String>) -> Self {
        LoadError::InvalidValue {
            row,
            column: column.to_string(),
            detail: detail.into(),
        }
    }
}
