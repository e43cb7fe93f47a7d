//! Configuration for the analyses.
//!
//! Every field has a default, so a config file only needs to name the values
//! it changes. Command line flags are applied on top of the loaded file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::algorithm::lab_mortality::AbnormalityPolicy;
use crate::error::{InsightsError, Result};

/// Default number of rows per record batch when reading tables
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Environment variable overriding the batch size
pub const BATCH_SIZE_ENV: &str = "MIMIC_BATCH_SIZE";

/// Helper function to get batch size from environment
#[must_use]
pub fn get_batch_size() -> Option<usize> {
    std::env::var(BATCH_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
}

/// Top-level configuration shared by all analyses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory holding the `<TABLE>.csv` / `<TABLE>.parquet` extracts
    pub data_dir: PathBuf,
    /// Directory the charts and result files are written to
    pub output_dir: PathBuf,
    /// Rows per record batch when reading
    pub batch_size: usize,
    /// Write the computed result next to each chart as JSON
    pub write_json: bool,
    /// Show spinners while tables load
    pub show_progress: bool,
    /// Abnormal-lab co-mortality settings
    pub lab: LabMortalityConfig,
    /// Medication length-of-stay settings
    pub medication: MedicationLosConfig,
    /// Insurance and age-group length-of-stay settings
    pub insurance: InsuranceLosConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("../mimic-iii-clinical-database-1.4"),
            output_dir: PathBuf::from("."),
            batch_size: get_batch_size().unwrap_or(DEFAULT_BATCH_SIZE),
            write_json: true,
            show_progress: true,
            lab: LabMortalityConfig::default(),
            medication: MedicationLosConfig::default(),
            insurance: InsuranceLosConfig::default(),
        }
    }
}

/// Settings for the abnormal-lab co-mortality matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabMortalityConfig {
    /// Number of most frequent lab items to compare
    pub top_n: usize,
    /// How a lab value is judged abnormal
    pub policy: AbnormalityPolicy,
}

impl Default for LabMortalityConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            policy: AbnormalityPolicy::default(),
        }
    }
}

/// Settings for the medication length-of-stay analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicationLosConfig {
    /// Number of most prescribed drugs to include
    pub top_n: usize,
}

impl Default for MedicationLosConfig {
    fn default() -> Self {
        Self { top_n: 5 }
    }
}

/// Settings for the insurance length-of-stay analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsuranceLosConfig {
    /// Stays longer than this LOS quantile are left out of the chart
    pub los_quantile: f64,
}

impl Default for InsuranceLosConfig {
    fn default() -> Self {
        Self { los_quantile: 0.95 }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file, filling gaps with defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = crate::error::util::safe_open_file(path, "configuration")?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check value ranges that the analyses rely on
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(InsightsError::InvalidConfig(
                "batch_size must be positive".to_string(),
            ));
        }
        if self.lab.top_n == 0 || self.medication.top_n == 0 {
            return Err(InsightsError::InvalidConfig(
                "top_n values must be positive".to_string(),
            ));
        }
        let q = self.insurance.los_quantile;
        if !(q > 0.0 && q <= 1.0) {
            return Err(InsightsError::InvalidConfig(format!(
                "los_quantile must be in (0, 1], got {q}"
            )));
        }
        self.lab.policy.validate()
    }
}
