//! Abnormal lab values and in-hospital mortality
//!
//! For the most frequently measured lab items this module decides which
//! measurements are abnormal, computes the in-hospital mortality among
//! abnormal measurements of each lab, and builds a matrix of mortality rates
//! for admissions that were abnormal in two labs at once.
//!
//! Joins are explicit: lab labels come from the first catalog entry per item
//! and the expire flag from the first admission row per admission id, so a
//! repeated id never multiplies events.

pub mod matrix;
pub mod policy;

use std::collections::BTreeSet;

use log::{debug, info};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::algorithm::statistics::{percentage, value_counts};
use crate::config::LabMortalityConfig;
use crate::models::{Admission, LabEvent, LabItem};

pub use matrix::CoMortalityMatrix;
pub use policy::{AbnormalRule, AbnormalityPolicy};

/// A lab item selected for comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopLab {
    pub item_id: i64,
    /// Display label; disambiguated with the item id when two top items share a name
    pub label: String,
    /// Number of measurements of the item
    pub event_count: usize,
}

/// Abnormal-value statistics for one lab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbnormalStats {
    pub item_id: i64,
    pub label: String,
    /// Percentage of abnormal measurements taken in admissions ending in death
    pub mortality_rate: f64,
    pub n_abnormal: usize,
    /// Measurements with a numeric value
    pub n_total: usize,
    pub percent_abnormal: f64,
    /// Percentile policy only
    pub lower_bound: Option<f64>,
    /// Percentile policy only
    pub upper_bound: Option<f64>,
}

/// Everything the co-mortality heatmap needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabMortalityResult {
    pub policy: AbnormalityPolicy,
    pub top_labs: Vec<TopLab>,
    /// One entry per lab kept in the matrix, in matrix order
    pub stats: Vec<AbnormalStats>,
    pub matrix: CoMortalityMatrix,
}

/// Select the `n` most measured lab items that have a catalog entry
///
/// Items are ranked by measurement count, ties by ascending item id. Items
/// missing from the catalog are skipped. When several selected items share a
/// label, each label gets the item id appended.
#[must_use]
pub fn top_lab_items(events: &[LabEvent], catalog: &[LabItem], n: usize) -> Vec<TopLab> {
    let mut labels: FxHashMap<i64, String> = FxHashMap::default();
    for item in catalog {
        labels
            .entry(item.item_id)
            .or_insert_with(|| item.label.clone().unwrap_or_else(|| item.item_id.to_string()));
    }

    let mut top: Vec<TopLab> = value_counts(events.iter().map(|e| e.item_id))
        .into_iter()
        .take(n)
        .filter_map(|(item_id, event_count)| {
            let label = labels.get(&item_id)?.clone();
            Some(TopLab {
                item_id,
                label,
                event_count,
            })
        })
        .collect();

    let label_counts = value_counts(top.iter().map(|t| t.label.clone()));
    let shared: FxHashSet<String> = label_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(label, _)| label)
        .collect();
    for lab in &mut top {
        if shared.contains(&lab.label) {
            lab.label = format!("{} ({})", lab.label, lab.item_id);
        }
    }

    top
}

/// Outcome lookup keyed by admission id
struct ExpireIndex {
    died: FxHashMap<i64, Option<bool>>,
}

impl ExpireIndex {
    fn new(admissions: &[Admission]) -> Self {
        let mut died = FxHashMap::default();
        for admission in admissions {
            died.entry(admission.hadm_id)
                .or_insert(admission.hospital_expire_flag.map(|flag| flag == 1));
        }
        Self { died }
    }

    /// Known outcome of an admission; `None` for unknown admissions or flags
    fn outcome(&self, hadm_id: Option<i64>) -> Option<bool> {
        self.died.get(&hadm_id?).copied().flatten()
    }

    fn died(&self, hadm_id: Option<i64>) -> bool {
        self.outcome(hadm_id) == Some(true)
    }
}

/// A lab that survived filtering, with its abnormal admissions
struct RetainedLab {
    stats: AbnormalStats,
    abnormal_admissions: BTreeSet<i64>,
}

/// Compute per-lab abnormal statistics and the co-mortality matrix
#[must_use]
pub fn compute_lab_mortality(
    events: &[LabEvent],
    catalog: &[LabItem],
    admissions: &[Admission],
    config: &LabMortalityConfig,
) -> LabMortalityResult {
    let policy = config.policy;
    let top_labs = top_lab_items(events, catalog, config.top_n);
    info!(
        "Comparing {} lab items using the {} policy",
        top_labs.len(),
        policy.name()
    );

    let mut events_by_item: FxHashMap<i64, Vec<&LabEvent>> = FxHashMap::default();
    for lab in &top_labs {
        events_by_item.insert(lab.item_id, Vec::new());
    }
    for event in events {
        if let Some(bucket) = events_by_item.get_mut(&event.item_id) {
            bucket.push(event);
        }
    }

    let expire = ExpireIndex::new(admissions);

    let retained: Vec<RetainedLab> = top_labs
        .iter()
        .filter_map(|lab| {
            let lab_events = events_by_item.get(&lab.item_id)?;
            abnormal_stats(lab, lab_events, policy, &expire)
        })
        .collect();

    let matrix = co_mortality_matrix(&retained, &events_by_item, &expire);

    LabMortalityResult {
        policy,
        top_labs,
        stats: retained.into_iter().map(|r| r.stats).collect(),
        matrix,
    }
}

/// Statistics for one lab, or `None` when the lab drops out
fn abnormal_stats(
    lab: &TopLab,
    lab_events: &[&LabEvent],
    policy: AbnormalityPolicy,
    expire: &ExpireIndex,
) -> Option<RetainedLab> {
    let measured: Vec<&LabEvent> = lab_events
        .iter()
        .copied()
        .filter(|e| e.numeric_value().is_some())
        .collect();
    let values: Vec<f64> = measured.iter().filter_map(|e| e.numeric_value()).collect();

    let Some(rule) = policy.rule_for(&values) else {
        debug!("Skipping {}: no numeric values", lab.label);
        return None;
    };

    let abnormal: Vec<&LabEvent> = measured
        .iter()
        .copied()
        .filter(|e| rule.is_abnormal(e))
        .collect();

    if abnormal.is_empty() && policy.excludes_labs_without_abnormal() {
        debug!("Skipping {}: no abnormal values", lab.label);
        return None;
    }

    let deaths = abnormal.iter().filter(|e| expire.died(e.hadm_id)).count();
    let bounds = rule.bounds();

    let stats = AbnormalStats {
        item_id: lab.item_id,
        label: lab.label.clone(),
        mortality_rate: percentage(deaths, abnormal.len()),
        n_abnormal: abnormal.len(),
        n_total: measured.len(),
        percent_abnormal: percentage(abnormal.len(), measured.len()),
        lower_bound: bounds.map(|(lower, _)| lower),
        upper_bound: bounds.map(|(_, upper)| upper),
    };
    debug!(
        "{}: {}/{} abnormal, mortality {:.1}%",
        stats.label, stats.n_abnormal, stats.n_total, stats.mortality_rate
    );

    let abnormal_admissions = abnormal.iter().filter_map(|e| e.hadm_id).collect();

    Some(RetainedLab {
        stats,
        abnormal_admissions,
    })
}

/// Fill the matrix from the retained labs
///
/// Off-diagonal cells weight admissions by how many measurements of the
/// compared items they contributed, counting only admissions with a known
/// outcome.
fn co_mortality_matrix(
    retained: &[RetainedLab],
    events_by_item: &FxHashMap<i64, Vec<&LabEvent>>,
    expire: &ExpireIndex,
) -> CoMortalityMatrix {
    let mut events_per_admission: FxHashMap<i64, usize> = FxHashMap::default();
    for event in events_by_item.values().flatten() {
        if let Some(hadm_id) = event.hadm_id {
            *events_per_admission.entry(hadm_id).or_insert(0) += 1;
        }
    }

    let labels = retained.iter().map(|r| r.stats.label.clone()).collect();
    let mut matrix = CoMortalityMatrix::zeros(labels);

    for (i, lab_i) in retained.iter().enumerate() {
        matrix.set_pair(i, i, lab_i.stats.mortality_rate);

        for (j, lab_j) in retained.iter().enumerate().skip(i + 1) {
            let mut known = 0;
            let mut deaths = 0;
            for &hadm_id in lab_i
                .abnormal_admissions
                .intersection(&lab_j.abnormal_admissions)
            {
                let Some(died) = expire.outcome(Some(hadm_id)) else {
                    continue;
                };
                let weight = events_per_admission.get(&hadm_id).copied().unwrap_or(0);
                known += weight;
                if died {
                    deaths += weight;
                }
            }
            matrix.set_pair(i, j, percentage(deaths, known));
        }
    }

    matrix
}
