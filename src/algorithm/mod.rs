//! Analysis computations
//!
//! Every function here is pure: it takes typed rows already loaded in memory
//! and returns a result struct ready for rendering. Nothing in this module
//! touches the filesystem.

pub mod lab_mortality;
pub mod length_of_stay;
pub mod resources;
pub mod statistics;
pub mod transfers;

pub use lab_mortality::{
    AbnormalStats, AbnormalityPolicy, CoMortalityMatrix, LabMortalityResult, TopLab,
    compute_lab_mortality, top_lab_items,
};
pub use length_of_stay::{
    AgeGroup, InsuranceLos, MedicationLos, insurance_length_of_stay, medication_length_of_stay,
};
pub use resources::{ResourceInputs, ResourceRow, resource_utilization};
pub use statistics::DistributionSummary;
pub use transfers::{ICU_UNITS, TransferPattern, icu_transfer_pattern};
