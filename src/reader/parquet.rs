//! Parquet table reading

use std::path::Path;

use arrow::record_batch::RecordBatch;
use parquet::arrow::ProjectionMask;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::Result;
use crate::error::util::safe_open_file;
use crate::schema::{MimicTable, conform_batch, projection_indices};
use crate::utils::logging::{log_table_read, log_table_read_start};

/// Read a Parquet table file into record batches conforming to the table schema
///
/// Only the table's columns are decoded; they are cast to the table types
/// when the file stores them differently.
pub fn read_parquet(path: &Path, table: MimicTable, batch_size: usize) -> Result<Vec<RecordBatch>> {
    let start = std::time::Instant::now();
    log_table_read_start(table, "parquet", path);

    let file = safe_open_file(path, table.file_stem())?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let projection = projection_indices(table, builder.schema())?;
    let mask = ProjectionMask::roots(builder.parquet_schema(), projection);

    let reader = builder
        .with_projection(mask)
        .with_batch_size(batch_size)
        .build()?;

    let batches = reader
        .map(|batch| conform_batch(table, &batch?))
        .collect::<Result<Vec<_>>>()?;

    let rows = batches.iter().map(RecordBatch::num_rows).sum();
    log_table_read(table, path, rows, start.elapsed());
    Ok(batches)
}
