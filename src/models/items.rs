//! MetaVision procedure and input events with their item catalog

use serde::Deserialize;

use super::TableRecord;
use crate::schema::MimicTable;

/// A procedure event (PROCEDUREEVENTS_MV)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcedureEvent {
    #[serde(rename = "ITEMID")]
    pub item_id: i64,
    #[serde(rename = "VALUE")]
    pub value: Option<f64>,
}

impl TableRecord for ProcedureEvent {
    const TABLE: MimicTable = MimicTable::ProcedureEvents;
}

/// An input event such as a drip or bolus (INPUTEVENTS_MV)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputEvent {
    #[serde(rename = "ITEMID")]
    pub item_id: i64,
    #[serde(rename = "AMOUNT")]
    pub amount: Option<f64>,
}

impl TableRecord for InputEvent {
    const TABLE: MimicTable = MimicTable::InputEvents;
}

/// Catalog entry for charted items (D_ITEMS)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    #[serde(rename = "ITEMID")]
    pub item_id: i64,
    #[serde(rename = "CATEGORY")]
    pub category: Option<String>,
}

impl TableRecord for Item {
    const TABLE: MimicTable = MimicTable::Items;
}
