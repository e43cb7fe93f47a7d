//! CSV table reading
//!
//! MIMIC-III ships as comma separated files with a header row and many more
//! columns than any analysis needs. The header is read first to build a file
//! schema in which the projected columns carry their table types and every
//! other column is plain text, then only the projected columns are decoded.

use std::io::{Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::error::util::safe_open_file;
use crate::schema::{MimicTable, conform_batch, projection_indices};
use crate::utils::logging::{log_table_read, log_table_read_start};

/// Build the schema used to decode a CSV file
///
/// Returns the full file schema together with the indices of the projected
/// columns in table order.
pub fn csv_file_schema(table: MimicTable, header: &Schema) -> Result<(Schema, Vec<usize>)> {
    let projection = projection_indices(table, header)?;
    let target = table.schema();

    let fields = header
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| match projection.iter().position(|&p| p == i) {
            Some(k) => Field::new(field.name(), target.field(k).data_type().clone(), true),
            None => Field::new(field.name(), DataType::Utf8, true),
        })
        .collect::<Vec<_>>();

    Ok((Schema::new(fields), projection))
}

/// Read a CSV table file into record batches conforming to the table schema
///
/// # Errors
/// Returns an error if the file cannot be opened, a projected column is
/// missing from the header, or a value cannot be parsed as its column type
pub fn read_csv(path: &Path, table: MimicTable, batch_size: usize) -> Result<Vec<RecordBatch>> {
    let start = std::time::Instant::now();
    log_table_read_start(table, "csv", path);

    let mut file = safe_open_file(path, table.file_stem())?;
    let (header, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut file, Some(0))?;
    file.seek(SeekFrom::Start(0))?;

    let (file_schema, projection) = csv_file_schema(table, &header)?;

    let reader = ReaderBuilder::new(Arc::new(file_schema))
        .with_header(true)
        .with_batch_size(batch_size)
        .with_projection(projection)
        .build(file)?;

    let batches = reader
        .map(|batch| conform_batch(table, &batch?))
        .collect::<Result<Vec<_>>>()?;

    let rows = batches.iter().map(RecordBatch::num_rows).sum();
    log_table_read(table, path, rows, start.elapsed());
    Ok(batches)
}
