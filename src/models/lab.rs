//! Laboratory measurements and the lab item catalog

use serde::Deserialize;

use super::TableRecord;
use crate::schema::MimicTable;

/// One laboratory measurement (LABEVENTS)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabEvent {
    #[serde(rename = "SUBJECT_ID")]
    pub subject_id: i64,
    /// Hospital admission; `None` for outpatient measurements
    #[serde(rename = "HADM_ID")]
    pub hadm_id: Option<i64>,
    #[serde(rename = "ITEMID")]
    pub item_id: i64,
    /// Numeric value, when the measurement has one
    #[serde(rename = "VALUENUM")]
    pub value: Option<f64>,
    /// Out-of-range marker supplied by the source (usually "abnormal")
    #[serde(rename = "FLAG")]
    pub flag: Option<String>,
}

impl LabEvent {
    /// Whether the source marked this measurement as out of range
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.flag.as_deref().is_some_and(|f| !f.is_empty())
    }

    /// Numeric value with NaN treated as missing
    #[must_use]
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.filter(|v| !v.is_nan())
    }
}

impl TableRecord for LabEvent {
    const TABLE: MimicTable = MimicTable::LabEvents;
}

/// Catalog entry naming a lab item (D_LABITEMS)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabItem {
    #[serde(rename = "ITEMID")]
    pub item_id: i64,
    #[serde(rename = "LABEL")]
    pub label: Option<String>,
}

impl TableRecord for LabItem {
    const TABLE: MimicTable = MimicTable::LabItems;
}
