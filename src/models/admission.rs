//! Hospital admissions and patients

use chrono::{Datelike, NaiveDateTime};
use serde::Deserialize;

use super::TableRecord;
use crate::schema::MimicTable;
use crate::utils::time::{days_between, deserialize_opt_timestamp};

/// One hospitalization episode (ADMISSIONS)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Admission {
    #[serde(rename = "SUBJECT_ID")]
    pub subject_id: i64,
    #[serde(rename = "HADM_ID")]
    pub hadm_id: i64,
    #[serde(rename = "ADMITTIME", deserialize_with = "deserialize_opt_timestamp")]
    pub admit_time: Option<NaiveDateTime>,
    #[serde(rename = "DISCHTIME", deserialize_with = "deserialize_opt_timestamp")]
    pub discharge_time: Option<NaiveDateTime>,
    #[serde(rename = "INSURANCE")]
    pub insurance: Option<String>,
    /// 1 when the patient died during the admission
    #[serde(rename = "HOSPITAL_EXPIRE_FLAG")]
    pub hospital_expire_flag: Option<i64>,
}

impl Admission {
    /// Length of stay in days, when both timestamps are known
    #[must_use]
    pub fn length_of_stay_days(&self) -> Option<f64> {
        Some(days_between(self.admit_time?, self.discharge_time?))
    }

    /// Age in whole calendar years at admission (admission year minus birth year)
    #[must_use]
    pub fn age_at_admission(&self, patient: &Patient) -> Option<i32> {
        Some(self.admit_time?.year() - patient.date_of_birth?.year())
    }
}

impl TableRecord for Admission {
    const TABLE: MimicTable = MimicTable::Admissions;
}

/// A patient (PATIENTS)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Patient {
    #[serde(rename = "SUBJECT_ID")]
    pub subject_id: i64,
    #[serde(rename = "DOB", deserialize_with = "deserialize_opt_timestamp")]
    pub date_of_birth: Option<NaiveDateTime>,
}

impl TableRecord for Patient {
    const TABLE: MimicTable = MimicTable::Patients;
}
