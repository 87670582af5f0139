//! Command argument structures

use clap::Args;
use std::path::PathBuf;

/// Per-feature weight overrides
#[derive(Args, Debug, Clone, Default)]
pub struct WeightArgs {
    /// Weight of the Primary Function feature
    #[arg(long)]
    pub weight_primary_function: Option<f64>,

    /// Weight of the Data Sources feature
    #[arg(long)]
    pub weight_data_sources: Option<f64>,

    /// Weight of the Target User/Client feature
    #[arg(long)]
    pub weight_target_user: Option<f64>,

    /// Weight of the Environment Type feature
    #[arg(long)]
    pub weight_environment_type: Option<f64>,
}

/// Engine overrides for the commands that decide connections
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Minimum similarity for two tools to be connected
    #[arg(long)]
    pub threshold: Option<f64>,

    #[command(flatten)]
    pub weights: WeightArgs,
}

/// Arguments for the process command.
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Catalog CSV file
    pub catalog: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,

    /// Directory for cached results
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Always recompute, ignoring and not writing the cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the cluster command.
#[derive(Args, Debug)]
pub struct ClusterArgs {
    /// Catalog CSV file
    pub catalog: PathBuf,

    #[command(flatten)]
    pub weights: WeightArgs,
}

/// Arguments for the classify command.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Catalog CSV file
    pub catalog: PathBuf,
}

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Catalog CSV file
    pub catalog: PathBuf,

    /// Id of the first tool
    pub first: String,

    /// Id of the second tool
    pub second: String,

    #[command(flatten)]
    pub engine: EngineArgs,
}
