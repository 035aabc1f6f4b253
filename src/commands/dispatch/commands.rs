//! Command implementations for all cegate commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use cegate_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Run(args) => crate::commands::run::execute(ctx, args),
            Commands::History(args) => crate::commands::history::execute(ctx, args),
            Commands::Key(args) => crate::commands::key::execute(ctx, args),
        }
    }
}
