//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDateTime;
use mimic_insights::models::{
    Admission, IcuStay, InputEvent, Item, LabEvent, LabItem, Patient, Prescription,
    ProcedureEvent, ServiceEvent, Transfer,
};
use mimic_insights::utils::parse_timestamp;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A scratch directory removed when dropped
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Create a fresh directory under the system temp dir
    #[must_use]
    pub fn new(name: &str) -> Self {
        let n = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "mimic_insights_{name}_{}_{n}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).expect("create scratch dir");
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a file into the directory and return its path
    pub fn write(&self, file_name: &str, content: &str) -> PathBuf {
        let path = self.path.join(file_name);
        std::fs::write(&path, content).expect("write fixture file");
        path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Parse a fixture timestamp
#[must_use]
pub fn ts(value: &str) -> NaiveDateTime {
    parse_timestamp(value).expect("valid fixture timestamp")
}

#[must_use]
pub fn lab_event(hadm_id: Option<i64>, item_id: i64, value: Option<f64>, flag: Option<&str>) -> LabEvent {
    LabEvent {
        subject_id: hadm_id.unwrap_or(0) / 10,
        hadm_id,
        item_id,
        value,
        flag: flag.map(str::to_string),
    }
}

#[must_use]
pub fn lab_item(item_id: i64, label: &str) -> LabItem {
    LabItem {
        item_id,
        label: Some(label.to_string()),
    }
}

/// Admission with a known outcome and no stay times
#[must_use]
pub fn outcome(hadm_id: i64, expire_flag: Option<i64>) -> Admission {
    Admission {
        subject_id: hadm_id / 10,
        hadm_id,
        admit_time: None,
        discharge_time: None,
        insurance: None,
        hospital_expire_flag: expire_flag,
    }
}

/// Admission lasting `days` days from an admit time
#[must_use]
pub fn stay(subject_id: i64, hadm_id: i64, admit: &str, days: i64, insurance: &str) -> Admission {
    let admit_time = ts(admit);
    Admission {
        subject_id,
        hadm_id,
        admit_time: Some(admit_time),
        discharge_time: Some(admit_time + chrono::Duration::days(days)),
        insurance: Some(insurance.to_string()),
        hospital_expire_flag: Some(0),
    }
}

#[must_use]
pub fn patient(subject_id: i64, dob: &str) -> Patient {
    Patient {
        subject_id,
        date_of_birth: Some(ts(dob)),
    }
}

#[must_use]
pub fn prescription(subject_id: i64, hadm_id: i64, drug: &str) -> Prescription {
    Prescription {
        subject_id,
        hadm_id: Some(hadm_id),
        drug: Some(drug.to_string()),
    }
}

#[must_use]
pub fn transfer(unit: &str, in_time: Option<&str>, out_time: Option<&str>) -> Transfer {
    Transfer {
        subject_id: 1,
        hadm_id: Some(10),
        care_unit: Some(unit.to_string()),
        in_time: in_time.map(ts),
        out_time: out_time.map(ts),
    }
}

#[must_use]
pub fn icu_stay(unit: Option<&str>, in_time: &str, hours: i64) -> IcuStay {
    let start = ts(in_time);
    IcuStay {
        subject_id: 1,
        first_care_unit: unit.map(str::to_string),
        in_time: Some(start),
        out_time: Some(start + chrono::Duration::hours(hours)),
    }
}

#[must_use]
pub fn service(name: &str) -> ServiceEvent {
    ServiceEvent {
        subject_id: 1,
        service: Some(name.to_string()),
    }
}

#[must_use]
pub fn procedure(item_id: i64, value: Option<f64>) -> ProcedureEvent {
    ProcedureEvent { item_id, value }
}

#[must_use]
pub fn input(item_id: i64, amount: Option<f64>) -> InputEvent {
    InputEvent { item_id, amount }
}

#[must_use]
pub fn item(item_id: i64, category: Option<&str>) -> Item {
    Item {
        item_id,
        category: category.map(str::to_string),
    }
}

/// Assert two floats agree to within `1e-9`
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
