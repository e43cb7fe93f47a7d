//! Length-of-stay distributions
//!
//! Two views of hospital length of stay (LOS): per frequently prescribed
//! drug, and per insurance type split by age group.

use log::{debug, info};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::algorithm::statistics::{DistributionSummary, quantile, value_counts};
use crate::models::{Admission, Patient, Prescription};

/// LOS distribution for the stays in which one drug was prescribed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrugLos {
    pub drug: String,
    /// Prescription rows for the drug across all admissions
    pub prescription_count: usize,
    /// One LOS sample per prescription row that matched an admission
    pub summary: Option<DistributionSummary>,
}

/// LOS by medication, drugs in descending prescription order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicationLos {
    pub drugs: Vec<DrugLos>,
}

/// LOS distribution per top-prescribed drug
///
/// Prescriptions are joined to admissions on subject and admission id. Each
/// prescription row contributes the LOS of its admission, so long stays with
/// many orders weigh more, as they do in the prescription table itself.
#[must_use]
pub fn medication_length_of_stay(
    prescriptions: &[Prescription],
    admissions: &[Admission],
    top_n: usize,
) -> MedicationLos {
    let top_drugs: Vec<(String, usize)> =
        value_counts(prescriptions.iter().filter_map(|p| p.drug.clone()))
            .into_iter()
            .take(top_n)
            .collect();
    info!("Top {} medications: {:?}", top_drugs.len(), top_drugs);

    let mut stay_days: FxHashMap<(i64, i64), Option<f64>> = FxHashMap::default();
    for admission in admissions {
        stay_days
            .entry((admission.subject_id, admission.hadm_id))
            .or_insert_with(|| admission.length_of_stay_days());
    }

    let mut samples: FxHashMap<&str, Vec<f64>> = top_drugs
        .iter()
        .map(|(drug, _)| (drug.as_str(), Vec::new()))
        .collect();

    for prescription in prescriptions {
        let (Some(drug), Some(hadm_id)) = (prescription.drug.as_deref(), prescription.hadm_id)
        else {
            continue;
        };
        let Some(bucket) = samples.get_mut(drug) else {
            continue;
        };
        if let Some(Some(days)) = stay_days.get(&(prescription.subject_id, hadm_id)) {
            bucket.push(*days);
        }
    }

    let drugs = top_drugs
        .iter()
        .map(|(drug, prescription_count)| {
            let values = samples.get(drug.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            debug!("{drug}: {} LOS samples", values.len());
            DrugLos {
                drug: drug.clone(),
                prescription_count: *prescription_count,
                summary: DistributionSummary::from_values(values),
            }
        })
        .collect();

    MedicationLos { drugs }
}

/// Age bands used to split insurance groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AgeGroup {
    #[serde(rename = "0-30")]
    UpTo30,
    #[serde(rename = "31-50")]
    From31To50,
    #[serde(rename = "51-70")]
    From51To70,
    #[serde(rename = "70+")]
    Over70,
}

impl AgeGroup {
    /// All groups in ascending age order
    pub const ALL: [Self; 4] = [Self::UpTo30, Self::From31To50, Self::From51To70, Self::Over70];

    /// Place an age into its band; bands are right-closed and cover 1..=100
    ///
    /// Age 0 and ages above 100 (MIMIC-III shifts the birth dates of the very
    /// old by about 300 years) fall outside every band.
    #[must_use]
    pub const fn from_age(age: i32) -> Option<Self> {
        match age {
            1..=30 => Some(Self::UpTo30),
            31..=50 => Some(Self::From31To50),
            51..=70 => Some(Self::From51To70),
            71..=100 => Some(Self::Over70),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UpTo30 => "0-30",
            Self::From31To50 => "31-50",
            Self::From51To70 => "51-70",
            Self::Over70 => "70+",
        }
    }

    /// Chart color of the group
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::UpTo30 => "#2ecc71",
            Self::From31To50 => "#3498db",
            Self::From51To70 => "#9b59b6",
            Self::Over70 => "#e74c3c",
        }
    }
}

/// LOS distribution for one insurance type and age group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsuranceGroupLos {
    pub insurance: String,
    pub age_group: AgeGroup,
    pub summary: DistributionSummary,
}

/// LOS by insurance type and age group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsuranceLos {
    /// Admissions per insurance type, most common first
    pub insurance_distribution: Vec<(String, usize)>,
    /// Stays longer than this many days were left out
    pub los_cutoff: Option<f64>,
    /// Groups in insurance distribution order, then age order
    pub groups: Vec<InsuranceGroupLos>,
}

impl InsuranceLos {
    /// Insurance types that have at least one group
    #[must_use]
    pub fn insurance_types(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for group in &self.groups {
            if !seen.contains(&group.insurance.as_str()) {
                seen.push(&group.insurance);
            }
        }
        seen
    }
}

/// LOS distribution per insurance type and age group
///
/// Admissions are joined to patients on subject id. Age is the difference of
/// admission and birth years. Stays above the `los_quantile` of all joined
/// stays are dropped before grouping.
#[must_use]
pub fn insurance_length_of_stay(
    admissions: &[Admission],
    patients: &[Patient],
    los_quantile: f64,
) -> InsuranceLos {
    let insurance_distribution = value_counts(admissions.iter().filter_map(|a| a.insurance.clone()));
    info!("Insurance types distribution: {insurance_distribution:?}");

    let mut patients_by_subject: FxHashMap<i64, &Patient> = FxHashMap::default();
    for patient in patients {
        patients_by_subject.entry(patient.subject_id).or_insert(patient);
    }

    // (insurance, age group, LOS) for each joined admission
    let joined: Vec<(Option<&str>, Option<AgeGroup>, Option<f64>)> = admissions
        .iter()
        .filter_map(|admission| {
            let patient = patients_by_subject.get(&admission.subject_id)?;
            let age_group = admission.age_at_admission(patient).and_then(AgeGroup::from_age);
            Some((
                admission.insurance.as_deref(),
                age_group,
                admission.length_of_stay_days(),
            ))
        })
        .collect();

    let stays: Vec<f64> = joined.iter().filter_map(|(_, _, los)| *los).collect();
    let los_cutoff = quantile(&stays, los_quantile);
    debug!("LOS cutoff at quantile {los_quantile}: {los_cutoff:?}");

    let mut samples: FxHashMap<(&str, AgeGroup), Vec<f64>> = FxHashMap::default();
    for (insurance, age_group, los) in &joined {
        let (Some(insurance), Some(age_group), Some(los), Some(cutoff)) =
            (insurance, age_group, los, los_cutoff)
        else {
            continue;
        };
        if *los <= cutoff {
            samples.entry((*insurance, *age_group)).or_default().push(*los);
        }
    }

    let mut groups = Vec::new();
    for (insurance, _) in &insurance_distribution {
        for age_group in AgeGroup::ALL {
            let Some(values) = samples.get(&(insurance.as_str(), age_group)) else {
                continue;
            };
            if let Some(summary) = DistributionSummary::from_values(values) {
                groups.push(InsuranceGroupLos {
                    insurance: insurance.clone(),
                    age_group,
                    summary,
                });
            }
        }
    }

    InsuranceLos {
        insurance_distribution,
        los_cutoff,
        groups,
    }
}
