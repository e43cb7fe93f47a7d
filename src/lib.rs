//! Analyses and static visualizations over MIMIC-III clinical database
//! extracts: abnormal-lab co-mortality, length of stay by medication and by
//! insurance, ICU transfer timing and hospital resource utilization.

pub mod algorithm;
pub mod async_io;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod reader;
pub mod render;
pub mod schema;
pub mod utils;

// Core types
pub use config::{AnalysisConfig, DEFAULT_BATCH_SIZE};
pub use error::{InsightsError, Result};
pub use schema::MimicTable;

// Loading
pub use async_io::{AsyncTableLoader, load_tables_parallel};
pub use models::TableRecord;
pub use reader::TableLoader;

// Analyses
pub use algorithm::{
    AbnormalityPolicy, CoMortalityMatrix, LabMortalityResult, compute_lab_mortality,
    icu_transfer_pattern, insurance_length_of_stay, medication_length_of_stay,
    resource_utilization,
};
pub use pipeline::{Analysis, run_analyses, run_analysis};

// Arrow types
pub use arrow::record_batch::RecordBatch;
