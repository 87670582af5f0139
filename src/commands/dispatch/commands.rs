//! Command implementations for all toolgraph commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{classify, cluster, compare, process};
use toolgraph_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Process(args) => process::execute(ctx, args),
            Commands::Cluster(args) => cluster::execute(ctx, args),
            Commands::Classify(args) => classify::execute(ctx, args),
            Commands::Compare(args) => compare::execute(ctx, args),
        }
    }
}
