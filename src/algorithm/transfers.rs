//! Hour-of-day patterns of ICU transfers

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use crate::models::Transfer;

/// Hours in a day, one bucket each
pub const HOURS: usize = 24;

/// An intensive care unit shown in the transfer chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IcuUnit {
    /// Care unit code as stored in `CURR_CAREUNIT`
    pub code: &'static str,
    pub description: &'static str,
    pub color: &'static str,
}

/// The ICU units of MIMIC-III, in stacking order
pub const ICU_UNITS: [IcuUnit; 6] = [
    IcuUnit {
        code: "MICU",
        description: "Medical ICU",
        color: "#FF9999",
    },
    IcuUnit {
        code: "CCU",
        description: "Cardiac Care Unit",
        color: "#66B2FF",
    },
    IcuUnit {
        code: "CSRU",
        description: "Cardiac Surgery Recovery",
        color: "#99FF99",
    },
    IcuUnit {
        code: "SICU",
        description: "Surgical ICU",
        color: "#FFCC99",
    },
    IcuUnit {
        code: "TSICU",
        description: "Trauma/Surgical ICU",
        color: "#FF99FF",
    },
    IcuUnit {
        code: "NICU",
        description: "Neuro ICU",
        color: "#99FFFF",
    },
];

/// Transfers into and out of one unit, bucketed by hour of day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitTransferCounts {
    pub unit: IcuUnit,
    pub in_counts: [u64; HOURS],
    pub out_counts: [u64; HOURS],
}

impl UnitTransferCounts {
    fn new(unit: IcuUnit) -> Self {
        Self {
            unit,
            in_counts: [0; HOURS],
            out_counts: [0; HOURS],
        }
    }

    /// Total transfers into the unit
    #[must_use]
    pub fn total_in(&self) -> u64 {
        self.in_counts.iter().sum()
    }

    /// Total transfers out of the unit
    #[must_use]
    pub fn total_out(&self) -> u64 {
        self.out_counts.iter().sum()
    }
}

/// Hourly transfer counts for every ICU unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferPattern {
    pub units: Vec<UnitTransferCounts>,
}

impl TransferPattern {
    /// Transfers in per hour summed over units
    #[must_use]
    pub fn in_totals(&self) -> [u64; HOURS] {
        sum_hours(self.units.iter().map(|u| &u.in_counts))
    }

    /// Transfers out per hour summed over units
    #[must_use]
    pub fn out_totals(&self) -> [u64; HOURS] {
        sum_hours(self.units.iter().map(|u| &u.out_counts))
    }

    /// Tallest stacked bar, in or out
    #[must_use]
    pub fn max_stack(&self) -> u64 {
        self.in_totals()
            .into_iter()
            .chain(self.out_totals())
            .max()
            .unwrap_or(0)
    }
}

fn sum_hours<'a>(series: impl Iterator<Item = &'a [u64; HOURS]>) -> [u64; HOURS] {
    let mut totals = [0; HOURS];
    for counts in series {
        for (total, count) in totals.iter_mut().zip(counts) {
            *total += count;
        }
    }
    totals
}

fn hour_of(time: Option<NaiveDateTime>) -> Option<usize> {
    time.map(|t| t.hour() as usize)
}

/// Count ICU transfers by hour of arrival and hour of departure
///
/// Transfers into units that are not ICUs are ignored; a missing time only
/// drops that transfer from the matching series.
#[must_use]
pub fn icu_transfer_pattern(transfers: &[Transfer]) -> TransferPattern {
    let mut units: Vec<UnitTransferCounts> =
        ICU_UNITS.into_iter().map(UnitTransferCounts::new).collect();

    for transfer in transfers {
        let Some(code) = transfer.care_unit.as_deref() else {
            continue;
        };
        let Some(counts) = units.iter_mut().find(|u| u.unit.code == code) else {
            continue;
        };
        if let Some(hour) = hour_of(transfer.in_time) {
            counts.in_counts[hour] += 1;
        }
        if let Some(hour) = hour_of(transfer.out_time) {
            counts.out_counts[hour] += 1;
        }
    }

    for counts in &units {
        log::debug!(
            "{}: {} in, {} out",
            counts.unit.code,
            counts.total_in(),
            counts.total_out()
        );
    }

    TransferPattern { units }
}
