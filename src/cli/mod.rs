//! CLI argument parsing for toolgraph
//!
//! Supports global flags: --format, --quiet, --verbose, --log-level,
//! --log-json, --config

pub mod args;
pub mod format;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{ClassifyArgs, ClusterArgs, CompareArgs, EngineArgs, ProcessArgs, WeightArgs};
pub use toolgraph_core::format::OutputFormat;

/// Toolgraph - similarity graph and clustering for nature-related tool catalogs
#[derive(Parser, Debug)]
#[command(name = "toolgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human or json)
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter (level such as `debug`, or a full directive)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Engine configuration file (TOML)
    #[arg(long, global = true, env = "TOOLGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute categories and similarity connections for every tool
    Process(ProcessArgs),

    /// Build the similarity dendrogram
    Cluster(ClusterArgs),

    /// Assign a category to every tool
    Classify(ClassifyArgs),

    /// Show the per-feature similarity between two tools
    Compare(CompareArgs),
}
