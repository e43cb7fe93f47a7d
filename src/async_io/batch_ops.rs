//! Async table reading into Arrow record batches
//!
//! Parquet files are streamed with the async reader; CSV files go through the
//! blocking Arrow CSV reader on tokio's blocking pool.

use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;
use futures::TryStreamExt;
use parquet::arrow::ProjectionMask;
use parquet::arrow::async_reader::ParquetRecordBatchStreamBuilder;

use super::file_ops::{locate_table_async, open_table_file_async};
use crate::error::{InsightsError, Result};
use crate::reader::{TableFormat, read_csv};
use crate::schema::{MimicTable, conform_batch, projection_indices};
use crate::utils::logging::{log_table_read, log_table_read_start};

/// Read a Parquet table file asynchronously
///
/// Only the table's columns are decoded and every batch is conformed to the
/// table schema.
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded, or lacks a
/// required column
pub async fn read_parquet_async(
    path: &Path,
    table: MimicTable,
    batch_size: usize,
) -> Result<Vec<RecordBatch>> {
    let start = std::time::Instant::now();
    log_table_read_start(table, "parquet, async", path);

    let file = open_table_file_async(path).await?;
    let builder = ParquetRecordBatchStreamBuilder::new(file).await?;

    let projection = projection_indices(table, builder.schema())?;
    let mask = ProjectionMask::roots(builder.parquet_schema(), projection);

    let stream = builder
        .with_projection(mask)
        .with_batch_size(batch_size)
        .build()?;

    let raw: Vec<RecordBatch> = stream.try_collect().await?;
    let batches = raw
        .iter()
        .map(|batch| conform_batch(table, batch))
        .collect::<Result<Vec<_>>>()?;

    let rows = batches.iter().map(RecordBatch::num_rows).sum();
    log_table_read(table, path, rows, start.elapsed());
    Ok(batches)
}

/// Read a CSV table file on the blocking pool
pub async fn read_csv_async(
    path: PathBuf,
    table: MimicTable,
    batch_size: usize,
) -> Result<Vec<RecordBatch>> {
    tokio::task::spawn_blocking(move || read_csv(&path, table, batch_size))
        .await
        .map_err(|e| InsightsError::Io(std::io::Error::other(e)))?
}

/// Locate a table in the data directory and read it in whichever format exists
pub async fn read_table_async(
    data_dir: &Path,
    table: MimicTable,
    batch_size: usize,
) -> Result<Vec<RecordBatch>> {
    let (path, format) = locate_table_async(data_dir, table).await?;
    match format {
        TableFormat::Parquet => read_parquet_async(&path, table, batch_size).await,
        TableFormat::Csv => read_csv_async(path, table, batch_size).await,
    }
}
