//! Ward transfers, ICU stays and service assignments

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::TableRecord;
use crate::schema::MimicTable;
use crate::utils::time::{deserialize_opt_timestamp, hours_between};

/// A move of a patient into a care unit (TRANSFERS)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transfer {
    #[serde(rename = "SUBJECT_ID")]
    pub subject_id: i64,
    #[serde(rename = "HADM_ID")]
    pub hadm_id: Option<i64>,
    #[serde(rename = "CURR_CAREUNIT")]
    pub care_unit: Option<String>,
    #[serde(rename = "INTIME", deserialize_with = "deserialize_opt_timestamp")]
    pub in_time: Option<NaiveDateTime>,
    #[serde(rename = "OUTTIME", deserialize_with = "deserialize_opt_timestamp")]
    pub out_time: Option<NaiveDateTime>,
}

impl TableRecord for Transfer {
    const TABLE: MimicTable = MimicTable::Transfers;
}

/// One ICU stay (ICUSTAYS)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IcuStay {
    #[serde(rename = "SUBJECT_ID")]
    pub subject_id: i64,
    #[serde(rename = "FIRST_CAREUNIT")]
    pub first_care_unit: Option<String>,
    #[serde(rename = "INTIME", deserialize_with = "deserialize_opt_timestamp")]
    pub in_time: Option<NaiveDateTime>,
    #[serde(rename = "OUTTIME", deserialize_with = "deserialize_opt_timestamp")]
    pub out_time: Option<NaiveDateTime>,
}

impl IcuStay {
    /// Length of the stay in hours, when both timestamps are known
    #[must_use]
    pub fn length_of_stay_hours(&self) -> Option<f64> {
        Some(hours_between(self.in_time?, self.out_time?))
    }
}

impl TableRecord for IcuStay {
    const TABLE: MimicTable = MimicTable::IcuStays;
}

/// A clinical service assignment (SERVICES)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceEvent {
    #[serde(rename = "SUBJECT_ID")]
    pub subject_id: i64,
    #[serde(rename = "CURR_SERVICE")]
    pub service: Option<String>,
}

impl TableRecord for ServiceEvent {
    const TABLE: MimicTable = MimicTable::Services;
}
