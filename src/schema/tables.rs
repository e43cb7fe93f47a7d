//! Arrow schema definitions for the MIMIC-III tables
//!
//! Each schema lists only the columns the analyses read. Timestamps are kept
//! as strings and parsed when rows are built.

use arrow_schema::{DataType, Field, Schema};
use std::sync::Arc;

/// Get the Arrow schema for ADMISSIONS data
pub fn admissions_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("SUBJECT_ID", DataType::Int64, false),
        Field::new("HADM_ID", DataType::Int64, false),
        Field::new("ADMITTIME", DataType::Utf8, true),
        Field::new("DISCHTIME", DataType::Utf8, true),
        Field::new("INSURANCE", DataType::Utf8, true),
        Field::new("HOSPITAL_EXPIRE_FLAG", DataType::Int64, true),
    ]))
}

/// Get the Arrow schema for PATIENTS data
pub fn patients_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("SUBJECT_ID", DataType::Int64, false),
        Field::new("DOB", DataType::Utf8, true),
    ]))
}

/// Get the Arrow schema for PRESCRIPTIONS data
pub fn prescriptions_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("SUBJECT_ID", DataType::Int64, false),
        Field::new("HADM_ID", DataType::Int64, true),
        Field::new("DRUG", DataType::Utf8, true),
    ]))
}

/// Get the Arrow schema for LABEVENTS data
///
/// `HADM_ID` is null for outpatient measurements.
pub fn labevents_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("SUBJECT_ID", DataType::Int64, false),
        Field::new("HADM_ID", DataType::Int64, true),
        Field::new("ITEMID", DataType::Int64, false),
        Field::new("VALUENUM", DataType::Float64, true),
        Field::new("FLAG", DataType::Utf8, true),
    ]))
}

/// Get the Arrow schema for D_LABITEMS data
pub fn d_labitems_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("ITEMID", DataType::Int64, false),
        Field::new("LABEL", DataType::Utf8, true),
    ]))
}

/// Get the Arrow schema for TRANSFERS data
pub fn transfers_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("SUBJECT_ID", DataType::Int64, false),
        Field::new("HADM_ID", DataType::Int64, true),
        Field::new("CURR_CAREUNIT", DataType::Utf8, true),
        Field::new("INTIME", DataType::Utf8, true),
        Field::new("OUTTIME", DataType::Utf8, true),
    ]))
}

/// Get the Arrow schema for ICUSTAYS data
pub fn icustays_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("SUBJECT_ID", DataType::Int64, false),
        Field::new("FIRST_CAREUNIT", DataType::Utf8, true),
        Field::new("INTIME", DataType::Utf8, true),
        Field::new("OUTTIME", DataType::Utf8, true),
    ]))
}

/// Get the Arrow schema for SERVICES data
pub fn services_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("SUBJECT_ID", DataType::Int64, false),
        Field::new("CURR_SERVICE", DataType::Utf8, true),
    ]))
}

/// Get the Arrow schema for PROCEDUREEVENTS_MV data
pub fn procedureevents_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("ITEMID", DataType::Int64, false),
        Field::new("VALUE", DataType::Float64, true),
    ]))
}

/// Get the Arrow schema for INPUTEVENTS_MV data
pub fn inputevents_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("ITEMID", DataType::Int64, false),
        Field::new("AMOUNT", DataType::Float64, true),
    ]))
}

/// Get the Arrow schema for D_ITEMS data
pub fn d_items_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("ITEMID", DataType::Int64, false),
        Field::new("CATEGORY", DataType::Utf8, true),
    ]))
}
