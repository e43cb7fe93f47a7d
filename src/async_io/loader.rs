//! Async loader bound to one extract directory
//!
//! Shows a spinner per table while it loads and converts the batches into
//! typed rows once reading is done.

use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;

use super::batch_ops::read_table_async;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::TableRecord;
use crate::schema::MimicTable;
use crate::utils::logging::{create_spinner, finish_progress_bar};

/// Loads MIMIC-III tables on the tokio runtime
#[derive(Debug, Clone)]
pub struct AsyncTableLoader {
    data_dir: PathBuf,
    batch_size: usize,
    show_progress: bool,
}

impl AsyncTableLoader {
    /// Create a loader for a data directory
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>, batch_size: usize) -> Self {
        Self {
            data_dir: data_dir.into(),
            batch_size,
            show_progress: false,
        }
    }

    /// Create a loader from the analysis configuration
    #[must_use]
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.data_dir.clone(), config.batch_size).with_progress(config.show_progress)
    }

    /// Show a spinner per table while loading
    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Load a table as record batches
    pub async fn load_batches(&self, table: MimicTable) -> Result<Vec<RecordBatch>> {
        let spinner = create_spinner(&format!("Loading {table}"), self.show_progress);
        let result = read_table_async(&self.data_dir, table, self.batch_size).await;
        match &result {
            Ok(batches) => {
                let rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
                finish_progress_bar(&spinner, Some(&format!("Loaded {rows} rows from {table}")));
            }
            Err(_) => finish_progress_bar(&spinner, None),
        }
        result
    }

    /// Load a table as typed rows, failing when the table has no rows
    pub async fn load<T: TableRecord>(&self) -> Result<Vec<T>> {
        let batches = self.load_batches(T::TABLE).await?;
        T::from_batches_non_empty(&batches)
    }
}
