//! Medication orders

use serde::Deserialize;

use super::TableRecord;
use crate::schema::MimicTable;

/// One medication order (PRESCRIPTIONS)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prescription {
    #[serde(rename = "SUBJECT_ID")]
    pub subject_id: i64,
    #[serde(rename = "HADM_ID")]
    pub hadm_id: Option<i64>,
    #[serde(rename = "DRUG")]
    pub drug: Option<String>,
}

impl TableRecord for Prescription {
    const TABLE: MimicTable = MimicTable::Prescriptions;
}
