//! `cegate key` command - print the identity key of a manifest

use cegate_core::config::resolve;
use cegate_core::error::Result;
use cegate_core::manifest::ModelDescriptor;

use crate::cli::KeyArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{output_by_format_result, print_json};

/// Execute the key command
pub fn execute(ctx: &CommandContext, args: &KeyArgs) -> Result<()> {
    let path = resolve(ctx.root, &args.manifest);
    let descriptor = ModelDescriptor::load(&path)?;
    let key = descriptor.key();

    output_by_format_result!(ctx.cli.format,
        json => print_json(&serde_json::json!({
            "key": key,
            "model_id": descriptor.model_id,
            "version": descriptor.version,
            "evaluation_profile": descriptor.evaluation_profile,
            "gate": descriptor.gate,
        })),
        human => {
            println!("{}", key);
        }
    )
}
