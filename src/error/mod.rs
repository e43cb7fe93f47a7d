//! Error handling for the MIMIC analyses.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

/// Specialized error type for loading, computing and rendering analyses
#[derive(Debug, Error)]
pub enum InsightsError {
    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error opening a file, with the path that failed
    #[error("IO error on {}: {message}", path.display())]
    IoAt {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<io::Error>,
    },

    /// Error from the Arrow CSV reader or a compute kernel
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error serializing a result to JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error converting between record batches and typed rows
    #[error("Row conversion error in {table}: {message}")]
    Deserialize { table: String, message: String },

    /// A projected column is absent from the input file
    #[error("Column '{column}' not found in table {table}")]
    MissingColumn { table: String, column: String },

    /// No CSV or Parquet file exists for a table
    #[error("No file for table {table} in {}", dir.display())]
    TableNotFound { table: String, dir: PathBuf },

    /// An input table required by an analysis has no rows
    #[error("Table {0} is empty")]
    EmptyTable(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl InsightsError {
    /// Create a row conversion error for a table
    pub fn deserialize(table: &str, err: impl std::fmt::Display) -> Self {
        Self::Deserialize {
            table: table.to_string(),
            message: err.to_string(),
        }
    }

    /// Create a missing column error
    pub fn missing_column(table: &str, column: &str) -> Self {
        Self::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, InsightsError>;
