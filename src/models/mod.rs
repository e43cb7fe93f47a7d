//! Typed rows for the MIMIC-III tables
//!
//! Each model deserializes from record batches conforming to its table schema
//! using `serde_arrow`. Fields keep the nullability of the source column; rows
//! are never dropped at load time, the analyses decide what a missing value
//! means for them.

pub mod admission;
pub mod icu;
pub mod items;
pub mod lab;
pub mod prescription;

use arrow::record_batch::RecordBatch;
use rayon::prelude::*;
use serde::de::DeserializeOwned;

use crate::error::{InsightsError, Result};
use crate::schema::MimicTable;

pub use admission::{Admission, Patient};
pub use icu::{IcuStay, ServiceEvent, Transfer};
pub use items::{InputEvent, Item, ProcedureEvent};
pub use lab::{LabEvent, LabItem};
pub use prescription::Prescription;

/// A row type backed by one MIMIC-III table
pub trait TableRecord: DeserializeOwned + Send + Sized {
    /// The table rows of this type are read from
    const TABLE: MimicTable;

    /// Convert one record batch into rows
    fn from_batch(batch: &RecordBatch) -> Result<Vec<Self>> {
        serde_arrow::from_record_batch(batch)
            .map_err(|e| InsightsError::deserialize(Self::TABLE.file_stem(), e))
    }

    /// Convert record batches into rows, keeping batch and row order
    fn from_batches(batches: &[RecordBatch]) -> Result<Vec<Self>> {
        let per_batch = batches
            .par_iter()
            .map(Self::from_batch)
            .collect::<Result<Vec<_>>>()?;
        Ok(per_batch.into_iter().flatten().collect())
    }

    /// Convert record batches into rows, failing when there are none
    fn from_batches_non_empty(batches: &[RecordBatch]) -> Result<Vec<Self>> {
        let rows = Self::from_batches(batches)?;
        if rows.is_empty() {
            return Err(InsightsError::EmptyTable(Self::TABLE.file_stem().to_string()));
        }
        log::debug!("Built {} {} rows", rows.len(), Self::TABLE);
        Ok(rows)
    }
}
