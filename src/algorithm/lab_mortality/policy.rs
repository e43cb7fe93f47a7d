//! Rules deciding whether a lab measurement is abnormal

use serde::{Deserialize, Serialize};

use crate::algorithm::statistics::{quantile_sorted, sorted_values};
use crate::error::{InsightsError, Result};
use crate::models::LabEvent;

const fn default_lower() -> f64 {
    0.05
}

const fn default_upper() -> f64 {
    0.95
}

/// How abnormal lab values are identified
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AbnormalityPolicy {
    /// Values outside the lab's own `[lower, upper]` percentile range.
    /// The lower bound is floored at zero. Labs with no abnormal values are
    /// left out of the comparison.
    Percentile {
        #[serde(default = "default_lower")]
        lower: f64,
        #[serde(default = "default_upper")]
        upper: f64,
    },
    /// Values carrying the source's out-of-range flag
    Flag,
}

impl Default for AbnormalityPolicy {
    fn default() -> Self {
        Self::Percentile {
            lower: default_lower(),
            upper: default_upper(),
        }
    }
}

impl AbnormalityPolicy {
    /// Whether labs without abnormal values are dropped
    #[must_use]
    pub const fn excludes_labs_without_abnormal(&self) -> bool {
        matches!(self, Self::Percentile { .. })
    }

    /// Short name used in logs and chart titles
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Percentile { .. } => "percentile",
            Self::Flag => "flag",
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Self::Percentile { lower, upper } = *self {
            if !(0.0..=1.0).contains(&lower) || !(0.0..=1.0).contains(&upper) || lower >= upper {
                return Err(InsightsError::InvalidConfig(format!(
                    "percentile bounds must satisfy 0 <= lower < upper <= 1, got {lower} and {upper}"
                )));
            }
        }
        Ok(())
    }

    /// Resolve the policy for one lab given its non-null values
    ///
    /// Returns `None` when there are no values to judge.
    #[must_use]
    pub fn rule_for(&self, values: &[f64]) -> Option<AbnormalRule> {
        if values.is_empty() {
            return None;
        }
        match *self {
            Self::Percentile { lower, upper } => {
                let sorted = sorted_values(values);
                Some(AbnormalRule::Range {
                    lower_bound: quantile_sorted(&sorted, lower)?.max(0.0),
                    upper_bound: quantile_sorted(&sorted, upper)?,
                })
            }
            Self::Flag => Some(AbnormalRule::Flag),
        }
    }
}

/// Abnormality test resolved for a single lab
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbnormalRule {
    /// Abnormal when strictly below `lower_bound` or strictly above `upper_bound`
    Range { lower_bound: f64, upper_bound: f64 },
    /// Abnormal when the source flag is present
    Flag,
}

impl AbnormalRule {
    /// Judge one measurement; measurements without a value (or NaN) are never abnormal
    #[must_use]
    pub fn is_abnormal(&self, event: &LabEvent) -> bool {
        let Some(value) = event.numeric_value() else {
            return false;
        };
        match *self {
            Self::Range {
                lower_bound,
                upper_bound,
            } => value < lower_bound || value > upper_bound,
            Self::Flag => event.is_flagged(),
        }
    }

    /// Accepted normal range, if the rule has one
    #[must_use]
    pub const fn bounds(&self) -> Option<(f64, f64)> {
        match *self {
            Self::Range {
                lower_bound,
                upper_bound,
            } => Some((lower_bound, upper_bound)),
            Self::Flag => None,
        }
    }
}
