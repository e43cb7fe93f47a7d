//! Log lines for table reads and output writes
//!
//! Readers and writers go through these helpers so every file touched by a
//! run shows up in the log in the same shape.

use std::path::Path;
use std::time::Duration;

use crate::schema::MimicTable;

/// Log the start of a table read
pub fn log_table_read_start(table: MimicTable, format: &str, path: &Path) {
    log::info!("Reading {table} ({format}) from {}", path.display());
}

/// Log a finished table read with its row count and duration
pub fn log_table_read(table: MimicTable, path: &Path, rows: usize, elapsed: Duration) {
    if rows == 0 {
        log::warn!("{table} at {} has no rows", path.display());
    } else {
        log::info!("Read {rows} {table} rows from {} in {elapsed:?}", path.display());
    }
}

/// Log a written output file; `rows` is set for tabular outputs
pub fn log_output_written(path: &Path, rows: Option<usize>) {
    match rows {
        Some(rows) => log::info!("Wrote {rows} rows to {}", path.display()),
        None => log::info!("Wrote {}", path.display()),
    }
}
