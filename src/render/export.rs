//! Writing chart files and machine-readable results

use std::fs;
use std::path::Path;
use std::sync::Arc;

use arrow::datatypes::FieldRef;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::error::{InsightsError, Result};
use crate::utils::log_output_written;

fn write_error(path: &Path, err: std::io::Error) -> InsightsError {
    InsightsError::IoAt {
        path: path.to_path_buf(),
        message: "Failed to write output file".to_string(),
        source: Some(err),
    }
}

/// Write rendered text (SVG or HTML) to a file
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| write_error(path, e))?;
    log_output_written(path, None);
    Ok(())
}

/// Write a result structure as pretty-printed JSON
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_text(path, &json)
}

/// Write rows as a single-batch Parquet file
///
/// The Arrow schema is traced from the row type, so the column names are the
/// field names of `T`.
pub fn write_parquet<T: Serialize + DeserializeOwned>(path: &Path, rows: &[T]) -> Result<()> {
    let fields = Vec::<FieldRef>::from_type::<T>(TracingOptions::default())
        .map_err(|e| InsightsError::deserialize("parquet export", e))?;
    let batch = serde_arrow::to_record_batch(&fields, &rows)
        .map_err(|e| InsightsError::deserialize("parquet export", e))?;

    let file = fs::File::create(path).map_err(|e| write_error(path, e))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, Arc::clone(batch.schema_ref()), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    log_output_written(path, Some(rows.len()));
    Ok(())
}
