//! Command dispatch logic for toolgraph

use std::time::Instant;

use crate::cli::Cli;
use toolgraph_core::error::Result;
use tracing::debug;

mod command;
mod commands;
pub mod helpers;

pub use command::CommandContext;
use command::{Command, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    debug!(elapsed = ?start.elapsed(), "dispatch");

    let ctx = CommandContext::new(cli, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
