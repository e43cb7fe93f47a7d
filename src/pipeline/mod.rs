//! End-to-end analysis runs
//!
//! Each analysis loads the tables it needs, computes its result, renders the
//! chart into the output directory and optionally writes the result as JSON.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::info;

use crate::algorithm::{
    ResourceInputs, compute_lab_mortality, icu_transfer_pattern, insurance_length_of_stay,
    medication_length_of_stay, resource_utilization,
};
use crate::async_io::{AsyncTableLoader, load_tables_parallel};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::error::util::ensure_directory;
use crate::models::{
    Admission, IcuStay, InputEvent, Item, LabEvent, LabItem, Patient, Prescription,
    ProcedureEvent, ServiceEvent, TableRecord, Transfer,
};
use crate::render::{
    render_insurance_boxplot, render_lab_heatmap, render_medication_boxplot,
    render_resource_sunburst, render_transfer_bars, write_json, write_parquet, write_text,
};
use crate::schema::MimicTable;
use crate::utils::logging::console::print_ranked_counts;

/// The analyses that can be run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analysis {
    MedicationLos,
    InsuranceLos,
    LabMortality,
    IcuTransfers,
    ResourceUtilization,
}

impl Analysis {
    /// Every analysis, in the order `all` runs them
    pub const ALL: [Self; 5] = [
        Self::MedicationLos,
        Self::InsuranceLos,
        Self::LabMortality,
        Self::IcuTransfers,
        Self::ResourceUtilization,
    ];

    /// Base name of the chart file
    #[must_use]
    pub const fn output_stem(self) -> &'static str {
        match self {
            Self::MedicationLos => "medication_los",
            Self::InsuranceLos => "insurance_los",
            Self::LabMortality => "lab_combinations_mortality",
            Self::IcuTransfers => "icu_transfer_patterns",
            Self::ResourceUtilization => "resource_utilization_sunburst",
        }
    }

    /// Extension of the chart file
    #[must_use]
    pub const fn chart_extension(self) -> &'static str {
        match self {
            Self::ResourceUtilization => "html",
            _ => "svg",
        }
    }

    /// Path of the chart inside an output directory
    #[must_use]
    pub fn chart_path(self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.{}", self.output_stem(), self.chart_extension()))
    }

    /// Path of the JSON result inside an output directory
    #[must_use]
    pub fn json_path(self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.json", self.output_stem()))
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MedicationLos => "medication length of stay",
            Self::InsuranceLos => "insurance length of stay",
            Self::LabMortality => "lab co-mortality",
            Self::IcuTransfers => "ICU transfer patterns",
            Self::ResourceUtilization => "resource utilization",
        };
        f.write_str(name)
    }
}

/// Parquet file holding the tidy resource table
pub const RESOURCE_PARQUET: &str = "resource_utilization.parquet";

/// Run one analysis and return the files it wrote
pub async fn run_analysis(analysis: Analysis, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let start = Instant::now();
    info!("Running {analysis} analysis");
    ensure_directory(&config.output_dir, "analysis output", true)?;

    let loader = AsyncTableLoader::from_config(config);
    let written = match analysis {
        Analysis::MedicationLos => run_medication_los(&loader, config).await?,
        Analysis::InsuranceLos => run_insurance_los(&loader, config).await?,
        Analysis::LabMortality => run_lab_mortality(&loader, config).await?,
        Analysis::IcuTransfers => run_icu_transfers(&loader, config).await?,
        Analysis::ResourceUtilization => run_resource_utilization(&loader, config).await?,
    };

    info!(
        "Finished {analysis} analysis in {:?}, wrote {} files",
        start.elapsed(),
        written.len()
    );
    Ok(written)
}

/// Run several analyses one after the other, stopping at the first failure
pub async fn run_analyses(analyses: &[Analysis], config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for &analysis in analyses {
        written.extend(run_analysis(analysis, config).await?);
    }
    Ok(written)
}

/// Write the chart and, when configured, the JSON result
fn write_outputs<T: serde::Serialize>(
    analysis: Analysis,
    config: &AnalysisConfig,
    chart: &str,
    result: &T,
) -> Result<Vec<PathBuf>> {
    let chart_path = analysis.chart_path(&config.output_dir);
    write_text(&chart_path, chart)?;
    let mut written = vec![chart_path];

    if config.write_json {
        let json_path = analysis.json_path(&config.output_dir);
        write_json(&json_path, result)?;
        written.push(json_path);
    }
    Ok(written)
}

async fn run_medication_los(loader: &AsyncTableLoader, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let (prescriptions, admissions) =
        tokio::try_join!(loader.load::<Prescription>(), loader.load::<Admission>())?;

    let result = medication_length_of_stay(&prescriptions, &admissions, config.medication.top_n);
    let ranked: Vec<(String, usize)> = result
        .drugs
        .iter()
        .map(|d| (d.drug.clone(), d.prescription_count))
        .collect();
    print_ranked_counts("Top medications by prescription count:", &ranked);

    let chart = render_medication_boxplot(&result);
    write_outputs(Analysis::MedicationLos, config, &chart, &result)
}

async fn run_insurance_los(loader: &AsyncTableLoader, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let (admissions, patients) =
        tokio::try_join!(loader.load::<Admission>(), loader.load::<Patient>())?;

    let los_quantile = config.insurance.los_quantile;
    let result = insurance_length_of_stay(&admissions, &patients, los_quantile);
    print_ranked_counts("Insurance types distribution:", &result.insurance_distribution);

    let chart = render_insurance_boxplot(&result, los_quantile);
    write_outputs(Analysis::InsuranceLos, config, &chart, &result)
}

async fn run_lab_mortality(loader: &AsyncTableLoader, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let (events, catalog, admissions) = tokio::try_join!(
        loader.load::<LabEvent>(),
        loader.load::<LabItem>(),
        loader.load::<Admission>()
    )?;

    let result = compute_lab_mortality(&events, &catalog, &admissions, &config.lab);
    let ranked: Vec<(String, usize)> = result
        .top_labs
        .iter()
        .map(|lab| (lab.label.clone(), lab.event_count))
        .collect();
    print_ranked_counts("Most frequent lab tests:", &ranked);

    let chart = render_lab_heatmap(&result);
    write_outputs(Analysis::LabMortality, config, &chart, &result)
}

async fn run_icu_transfers(loader: &AsyncTableLoader, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    let transfers = loader.load::<Transfer>().await?;

    let result = icu_transfer_pattern(&transfers);
    let ranked: Vec<(String, usize)> = result
        .units
        .iter()
        .map(|u| (u.unit.description.to_string(), u.total_in() as usize))
        .collect();
    print_ranked_counts("ICU transfers in:", &ranked);

    let chart = render_transfer_bars(&result);
    write_outputs(Analysis::IcuTransfers, config, &chart, &result)
}

async fn run_resource_utilization(
    loader: &AsyncTableLoader,
    config: &AnalysisConfig,
) -> Result<Vec<PathBuf>> {
    let tables = [
        IcuStay::TABLE,
        ServiceEvent::TABLE,
        ProcedureEvent::TABLE,
        InputEvent::TABLE,
        Item::TABLE,
    ];
    let batches = load_tables_parallel(loader, &tables).await?;
    let rows_of = |table: MimicTable| batches.get(&table).map(Vec::as_slice).unwrap_or(&[]);

    let icu_stays = IcuStay::from_batches_non_empty(rows_of(IcuStay::TABLE))?;
    let services = ServiceEvent::from_batches_non_empty(rows_of(ServiceEvent::TABLE))?;
    let procedures = ProcedureEvent::from_batches_non_empty(rows_of(ProcedureEvent::TABLE))?;
    let inputs = InputEvent::from_batches_non_empty(rows_of(InputEvent::TABLE))?;
    let items = Item::from_batches_non_empty(rows_of(Item::TABLE))?;

    let rows = resource_utilization(ResourceInputs {
        icu_stays: &icu_stays,
        services: &services,
        procedures: &procedures,
        inputs: &inputs,
        items: &items,
    });

    let chart = render_resource_sunburst(&rows)?;
    let mut written = write_outputs(Analysis::ResourceUtilization, config, &chart, &rows)?;

    let parquet_path = config.output_dir.join(RESOURCE_PARQUET);
    write_parquet(&parquet_path, &rows)?;
    written.push(parquet_path);
    Ok(written)
}
