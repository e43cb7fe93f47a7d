use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use mimic_insights::{AbnormalityPolicy, Analysis, AnalysisConfig, run_analyses};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

#[derive(Parser, Debug)]
#[command(
    name = "mimic-insights",
    about = "Charts and summaries from a MIMIC-III clinical database extract."
)]
struct Args {
    /// Directory holding the table CSV or Parquet files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory charts and results are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// JSON configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rows per record batch when reading tables
    #[arg(long)]
    batch_size: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Length of stay for the most prescribed drugs
    MedicationLos,
    /// Length of stay by insurance type and age group
    InsuranceLos,
    /// Mortality for combinations of abnormal lab values
    LabMortality {
        /// How a lab value is judged abnormal
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,

        /// Number of most frequent lab items to compare
        #[arg(long)]
        top_labs: Option<usize>,
    },
    /// ICU transfers by hour of day
    IcuTransfers,
    /// Hospital resource utilization sunburst
    ResourceUtilization,
    /// Run every analysis
    All,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    /// Outside the 5th to 95th percentile of the lab's values
    Percentile,
    /// Flagged abnormal in the source data
    Flag,
}

impl PolicyArg {
    /// Policy to use given the one already configured; configured
    /// percentile bounds are kept
    fn resolve(self, configured: AbnormalityPolicy) -> AbnormalityPolicy {
        match (self, configured) {
            (Self::Percentile, AbnormalityPolicy::Percentile { .. }) => configured,
            (Self::Percentile, AbnormalityPolicy::Flag) => AbnormalityPolicy::default(),
            (Self::Flag, _) => AbnormalityPolicy::Flag,
        }
    }
}

fn build_config(args: &Args) -> anyhow::Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("Could not load configuration {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let Some(dir) = &args.data_dir {
        config.data_dir.clone_from(dir);
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir.clone_from(dir);
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Command::LabMortality { policy, top_labs } = &args.command {
        if let Some(policy) = policy {
            config.lab.policy = (*policy).resolve(config.lab.policy);
        }
        if let Some(top_labs) = top_labs {
            config.lab.top_n = *top_labs;
        }
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = build_config(&args)?;

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_cpus::get())
        .build_global()
        .context("Could not start the conversion thread pool")?;

    let analyses: Vec<Analysis> = match args.command {
        Command::MedicationLos => vec![Analysis::MedicationLos],
        Command::InsuranceLos => vec![Analysis::InsuranceLos],
        Command::LabMortality { .. } => vec![Analysis::LabMortality],
        Command::IcuTransfers => vec![Analysis::IcuTransfers],
        Command::ResourceUtilization => vec![Analysis::ResourceUtilization],
        Command::All => Analysis::ALL.to_vec(),
    };

    info!("Reading tables from {}", config.data_dir.display());
    let written = run_analyses(&analyses, &config).await?;
    for path in &written {
        println!("{}", path.display());
    }

    Ok(())
}
