//! Hospital resource utilization as a tidy table
//!
//! Four resource types are summarized into rows of
//! `(resource_type, category, metric, value, count)`: ICU care by first care
//! unit, services, procedure categories and input categories.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::algorithm::statistics::round_to;
use crate::models::{IcuStay, InputEvent, Item, ProcedureEvent, ServiceEvent};

pub const ICU_CARE: &str = "ICU Care";
pub const MEDICAL_SERVICES: &str = "Medical Services";
pub const PROCEDURES: &str = "Procedures";
pub const MEDICAL_INPUTS: &str = "Medical Inputs";

/// Category assigned to items whose catalog entry has none
pub const UNCATEGORIZED: &str = "Other";

/// One row of the resource table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRow {
    pub resource_type: String,
    pub category: String,
    pub metric: String,
    pub value: f64,
    pub count: u64,
}

impl ResourceRow {
    fn new(resource_type: &str, category: &str, metric: &str, value: f64, count: u64) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            category: category.to_string(),
            metric: metric.to_string(),
            value,
            count,
        }
    }
}

/// The tables feeding the resource summary
#[derive(Debug, Clone, Copy)]
pub struct ResourceInputs<'a> {
    pub icu_stays: &'a [IcuStay],
    pub services: &'a [ServiceEvent],
    pub procedures: &'a [ProcedureEvent],
    pub inputs: &'a [InputEvent],
    pub items: &'a [Item],
}

/// Build the resource table
///
/// Within each resource type rows are ordered by category. Rows whose value
/// is not finite are dropped.
#[must_use]
pub fn resource_utilization(inputs: ResourceInputs<'_>) -> Vec<ResourceRow> {
    let categories = item_categories(inputs.items);

    let mut rows = icu_rows(inputs.icu_stays);
    rows.extend(service_rows(inputs.services));
    rows.extend(category_rows(
        PROCEDURES,
        "Procedure Count",
        &categories,
        inputs.procedures.iter().map(|p| (p.item_id, p.value)),
    ));
    rows.extend(category_rows(
        MEDICAL_INPUTS,
        "Input Amount",
        &categories,
        inputs.inputs.iter().map(|i| (i.item_id, i.amount)),
    ));

    rows.retain(|row| row.value.is_finite());
    log::info!("Built {} resource utilization rows", rows.len());
    rows
}

/// Category per item id; the first catalog entry wins
fn item_categories(items: &[Item]) -> FxHashMap<i64, &str> {
    let mut categories = FxHashMap::default();
    for item in items {
        categories
            .entry(item.item_id)
            .or_insert_with(|| item.category.as_deref().unwrap_or(UNCATEGORIZED));
    }
    categories
}

/// Patient days per first care unit
///
/// Total hours are rounded to two decimals before conversion to days.
fn icu_rows(stays: &[IcuStay]) -> Vec<ResourceRow> {
    let mut units: BTreeMap<&str, (u64, f64)> = BTreeMap::new();
    for stay in stays {
        let Some(unit) = stay.first_care_unit.as_deref() else {
            continue;
        };
        let entry = units.entry(unit).or_insert((0, 0.0));
        entry.0 += 1;
        if let Some(hours) = stay.length_of_stay_hours() {
            entry.1 += hours;
        }
    }

    units
        .into_iter()
        .map(|(unit, (count, hours))| {
            ResourceRow::new(ICU_CARE, unit, "Patient Days", round_to(hours, 2) / 24.0, count)
        })
        .collect()
}

/// Episodes per current service
fn service_rows(services: &[ServiceEvent]) -> Vec<ResourceRow> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for service in services {
        if let Some(name) = service.service.as_deref() {
            *counts.entry(name).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|(name, count)| {
            ResourceRow::new(MEDICAL_SERVICES, name, "Service Episodes", count as f64, count)
        })
        .collect()
}

/// Event count and summed quantity per item category
///
/// Events whose item is not in the catalog are dropped; missing quantities
/// count as events but add nothing to the sum.
fn category_rows(
    resource_type: &str,
    metric: &str,
    categories: &FxHashMap<i64, &str>,
    events: impl Iterator<Item = (i64, Option<f64>)>,
) -> Vec<ResourceRow> {
    let mut groups: BTreeMap<&str, (u64, f64)> = BTreeMap::new();
    for (item_id, quantity) in events {
        let Some(category) = categories.get(&item_id) else {
            continue;
        };
        let entry = groups.entry(*category).or_insert((0, 0.0));
        entry.0 += 1;
        if let Some(quantity) = quantity.filter(|q| !q.is_nan()) {
            entry.1 += quantity;
        }
    }

    groups
        .into_iter()
        .map(|(category, (count, total))| {
            ResourceRow::new(resource_type, category, metric, total, count)
        })
        .collect()
}
