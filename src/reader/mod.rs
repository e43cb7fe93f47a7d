//! Table loading from a MIMIC-III extract directory.
//!
//! A table is looked up as `<STEM>.parquet` or `<STEM>.csv` (upper or lower
//! case stem) inside the data directory. Whichever format is found, the
//! returned batches conform to the table schema.

pub mod csv;
pub mod parquet;

use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;

use crate::error::{InsightsError, Result};
use crate::models::TableRecord;
use crate::schema::MimicTable;

pub use self::csv::read_csv;
pub use self::parquet::read_parquet;

/// On-disk format of a table file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

/// Find the file holding a table, preferring Parquet over CSV
pub fn locate_table(data_dir: &Path, table: MimicTable) -> Result<(PathBuf, TableFormat)> {
    let stem = table.file_stem();
    let lower = stem.to_ascii_lowercase();

    for format in [TableFormat::Parquet, TableFormat::Csv] {
        for name in [stem, lower.as_str()] {
            let path = data_dir.join(format!("{name}.{}", format.extension()));
            if path.is_file() {
                return Ok((path, format));
            }
        }
    }

    Err(InsightsError::TableNotFound {
        table: stem.to_string(),
        dir: data_dir.to_path_buf(),
    })
}

/// Read a table file in the given format
pub fn read_table_file(
    path: &Path,
    format: TableFormat,
    table: MimicTable,
    batch_size: usize,
) -> Result<Vec<RecordBatch>> {
    match format {
        TableFormat::Csv => read_csv(path, table, batch_size),
        TableFormat::Parquet => read_parquet(path, table, batch_size),
    }
}

/// Synchronous loader bound to one extract directory
#[derive(Debug, Clone)]
pub struct TableLoader {
    data_dir: PathBuf,
    batch_size: usize,
}

impl TableLoader {
    /// Create a loader for a data directory
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>, batch_size: usize) -> Self {
        Self {
            data_dir: data_dir.into(),
            batch_size,
        }
    }

    /// Directory tables are read from
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Rows per record batch
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Load a table as record batches
    pub fn load_batches(&self, table: MimicTable) -> Result<Vec<RecordBatch>> {
        let (path, format) = locate_table(&self.data_dir, table)?;
        read_table_file(&path, format, table, self.batch_size)
    }

    /// Load a table as typed rows, failing when the table has no rows
    pub fn load<T: TableRecord>(&self) -> Result<Vec<T>> {
        let batches = self.load_batches(T::TABLE)?;
        T::from_batches_non_empty(&batches)
    }
}
