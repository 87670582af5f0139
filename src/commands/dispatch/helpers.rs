//! Helper functions for command dispatch

use std::path::Path;

use tracing::debug;

use crate::cli::{EngineArgs, WeightArgs};
use toolgraph_core::catalog::read_catalog_path;
use toolgraph_core::config::EngineConfig;
use toolgraph_core::error::Result;
use toolgraph_core::pipeline::ProcessOptions;
use toolgraph_core::record::Record;
use toolgraph_core::similarity::Feature;

use super::CommandContext;

/// Apply command-line overrides on top of a loaded configuration
pub fn apply_overrides(mut config: EngineConfig, args: &EngineArgs) -> Result<EngineConfig> {
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    apply_weight_overrides(config, &args.weights)
}

/// Apply only the per-feature weight flags
pub fn apply_weight_overrides(mut config: EngineConfig, args: &WeightArgs) -> Result<EngineConfig> {
    let weights = [
        (Feature::PrimaryFunction, args.weight_primary_function),
        (Feature::DataSources, args.weight_data_sources),
        (Feature::TargetUser, args.weight_target_user),
        (Feature::EnvironmentType, args.weight_environment_type),
    ];
    for (feature, weight) in weights {
        if let Some(weight) = weight {
            config.weights.set_weight(feature, weight);
        }
    }

    config.validate()?;
    Ok(config)
}

/// Resolve engine options: defaults < `--config` < flags
pub fn resolve_options(ctx: &CommandContext, args: &EngineArgs) -> Result<ProcessOptions> {
    let config = apply_overrides(ctx.load_config()?, args)?;
    debug!(
        threshold = config.threshold,
        weights = ?config.weights,
        "engine options"
    );
    Ok(config.to_options())
}

/// Resolve options for commands that take weights but no threshold
pub fn resolve_weight_options(ctx: &CommandContext, args: &WeightArgs) -> Result<ProcessOptions> {
    let config = apply_weight_overrides(ctx.load_config()?, args)?;
    debug!(weights = ?config.weights, "engine options");
    Ok(config.to_options())
}

/// Read a catalog file, logging its size
pub fn load_catalog(ctx: &CommandContext, path: &Path) -> Result<Vec<Record>> {
    let records = read_catalog_path(path)?;
    debug!(
        path = %path.display(),
        records = records.len(),
        elapsed = ?ctx.start.elapsed(),
        "load_catalog"
    );
    Ok(records)
}
