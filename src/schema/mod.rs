//! Table definitions and schema conformance.
//!
//! Every input table is described by a [`MimicTable`] variant that knows its
//! file stem and the Arrow schema of the columns the analyses read. Batches
//! coming from CSV or Parquet files are conformed to that schema before rows
//! are built from them, so downstream code sees one set of types regardless
//! of the file format.

pub mod tables;

use std::fmt;
use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::compute::kernels::cast::cast;
use arrow::datatypes::{Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use log::debug;

use crate::error::{InsightsError, Result};

/// The MIMIC-III tables read by the analyses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MimicTable {
    Admissions,
    Patients,
    Prescriptions,
    LabEvents,
    LabItems,
    Transfers,
    IcuStays,
    Services,
    ProcedureEvents,
    InputEvents,
    Items,
}

impl MimicTable {
    /// File stem of the table in a MIMIC-III extract
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Admissions => "ADMISSIONS",
            Self::Patients => "PATIENTS",
            Self::Prescriptions => "PRESCRIPTIONS",
            Self::LabEvents => "LABEVENTS",
            Self::LabItems => "D_LABITEMS",
            Self::Transfers => "TRANSFERS",
            Self::IcuStays => "ICUSTAYS",
            Self::Services => "SERVICES",
            Self::ProcedureEvents => "PROCEDUREEVENTS_MV",
            Self::InputEvents => "INPUTEVENTS_MV",
            Self::Items => "D_ITEMS",
        }
    }

    /// Arrow schema of the projected columns
    #[must_use]
    pub fn schema(self) -> SchemaRef {
        match self {
            Self::Admissions => tables::admissions_schema(),
            Self::Patients => tables::patients_schema(),
            Self::Prescriptions => tables::prescriptions_schema(),
            Self::LabEvents => tables::labevents_schema(),
            Self::LabItems => tables::d_labitems_schema(),
            Self::Transfers => tables::transfers_schema(),
            Self::IcuStays => tables::icustays_schema(),
            Self::Services => tables::services_schema(),
            Self::ProcedureEvents => tables::procedureevents_schema(),
            Self::InputEvents => tables::inputevents_schema(),
            Self::Items => tables::d_items_schema(),
        }
    }
}

impl fmt::Display for MimicTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Find a column by name, ignoring ASCII case
///
/// MIMIC-III extracts use upper-case headers while the demo subset uses
/// lower-case ones; both resolve to the same column.
#[must_use]
pub fn find_column(schema: &Schema, name: &str) -> Option<usize> {
    schema
        .fields()
        .iter()
        .position(|f| f.name().eq_ignore_ascii_case(name))
}

/// Indices of the table's columns within a file schema, in table order
pub fn projection_indices(table: MimicTable, file_schema: &Schema) -> Result<Vec<usize>> {
    table
        .schema()
        .fields()
        .iter()
        .map(|field| {
            find_column(file_schema, field.name())
                .ok_or_else(|| InsightsError::missing_column(table.file_stem(), field.name()))
        })
        .collect()
}

/// Conform a batch to the table schema
///
/// Columns are selected by name, reordered into table order and cast to the
/// declared type when the file stores them differently (for example `Int32`
/// ids or `Timestamp` columns in Parquet files).
pub fn conform_batch(table: MimicTable, batch: &RecordBatch) -> Result<RecordBatch> {
    let target = table.schema();
    let source = batch.schema();

    let columns = target
        .fields()
        .iter()
        .map(|field| {
            let idx = find_column(&source, field.name())
                .ok_or_else(|| InsightsError::missing_column(table.file_stem(), field.name()))?;
            let column = batch.column(idx);
            if column.data_type() == field.data_type() {
                Ok(Arc::clone(column))
            } else {
                debug!(
                    "Casting {table}.{} from {:?} to {:?}",
                    field.name(),
                    column.data_type(),
                    field.data_type()
                );
                Ok(cast(column, field.data_type())?)
            }
        })
        .collect::<Result<Vec<ArrayRef>>>()?;

    Ok(RecordBatch::try_new(target, columns)?)
}
