//! Command trait and context for dispatching commands

use std::time::Instant;

use crate::cli::Cli;
use toolgraph_core::config::EngineConfig;
use toolgraph_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, start: Instant) -> Self {
        Self { cli, start }
    }

    /// Engine configuration from `--config`, or the defaults
    pub fn load_config(&self) -> Result<EngineConfig> {
        match &self.cli.config {
            Some(path) => EngineConfig::load(path),
            None => Ok(EngineConfig::default()),
        }
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("toolgraph {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Similarity graph, clustering, and categories for tool catalogs.");
        println!();
        println!("Run `toolgraph --help` for usage information.");
        Ok(())
    }
}
