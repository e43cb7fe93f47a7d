//! Descriptive statistics shared by the analyses
//!
//! Quantiles use linear interpolation between the closest ranks, the same
//! definition spreadsheet tools and most dataframe libraries default to.

use std::cmp::Ordering;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Quantile of already sorted values
///
/// Returns `None` for an empty slice. `q` is clamped to `[0, 1]`. When both
/// neighbouring ranks hold the same value that value is returned exactly.
#[must_use]
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let idx = q * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    let (a, b) = (sorted[lo], sorted[hi]);
    if lo == hi || a == b {
        Some(a)
    } else {
        Some(a + (b - a) * (idx - lo as f64))
    }
}

/// Sort a copy of the values in ascending order
#[must_use]
pub fn sorted_values(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Quantile of unsorted values
#[must_use]
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    quantile_sorted(&sorted_values(values), q)
}

/// Percentage `100 * part / whole`, or 0 when `whole` is zero
#[must_use]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

/// Round half away from zero to a number of decimals
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Count occurrences of each key
///
/// The result is ordered by descending count, ties by ascending key, so the
/// ranking does not depend on input order.
pub fn value_counts<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts: FxHashMap<K, usize> = FxHashMap::default();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    let mut ranked: Vec<(K, usize)> = counts.into_iter().collect();
    ranked.sort_by(|(ka, ca), (kb, cb)| match cb.cmp(ca) {
        Ordering::Equal => ka.cmp(kb),
        other => other,
    });
    ranked
}

/// Five-number summary plus mean of a sample, as drawn in a box plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

impl DistributionSummary {
    /// Summarize a sample; `None` when it is empty
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted_values(values);
        let count = sorted.len();
        Some(Self {
            count,
            min: *sorted.first()?,
            q1: quantile_sorted(&sorted, 0.25)?,
            median: quantile_sorted(&sorted, 0.5)?,
            q3: quantile_sorted(&sorted, 0.75)?,
            max: *sorted.last()?,
            mean: sorted.iter().sum::<f64>() / count as f64,
        })
    }

    /// Interquartile range
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Whisker ends at 1.5 IQR, clipped to the observed range
    #[must_use]
    pub fn whiskers(&self) -> (f64, f64) {
        let reach = 1.5 * self.iqr();
        (
            (self.q1 - reach).max(self.min),
            (self.q3 + reach).min(self.max),
        )
    }
}
