//! Async file helpers for table loading

use std::path::{Path, PathBuf};

use tokio::fs::File;

use crate::error::{InsightsError, Result};
use crate::reader::{TableFormat, locate_table};
use crate::schema::MimicTable;

/// Open a table file for async reading
///
/// # Errors
/// Returns an error carrying the path if the file cannot be opened
pub async fn open_table_file_async(path: &Path) -> Result<File> {
    File::open(path).await.map_err(|e| InsightsError::IoAt {
        path: path.to_path_buf(),
        message: "Failed to open table file".to_string(),
        source: Some(e),
    })
}

/// Locate a table file without blocking the runtime
pub async fn locate_table_async(data_dir: &Path, table: MimicTable) -> Result<(PathBuf, TableFormat)> {
    let data_dir = data_dir.to_path_buf();
    tokio::task::spawn_blocking(move || locate_table(&data_dir, table))
        .await
        .map_err(|e| InsightsError::Io(std::io::Error::other(e)))?
}
