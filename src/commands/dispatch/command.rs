//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Cli;
use cegate_core::config::CeConfig;
use cegate_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Self {
        Self { cli, root, start }
    }

    /// Load the config file (if any), apply global CLI overrides, and make
    /// every path absolute against the root.
    pub fn config(&self) -> Result<CeConfig> {
        let mut config = CeConfig::discover(self.root, self.cli.config.as_deref())?;
        if let Some(history) = &self.cli.history {
            config.history_path = history.clone();
        }
        Ok(config.resolve_paths(self.root))
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
        println!("cegate {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("A continuous-evaluation gate for model releases.");
        println!();
        println!("Run `cegate --help` for usage information.");
        Ok(())
    }
}
