//! `cegate history` command - inspect recorded verdicts

use cegate_core::error::{CeError, Result};
use cegate_core::history::{HistoryEntry, HistoryStore};
use cegate_core::key::EvalKey;
use serde_json::{Map, Value};

use crate::cli::HistoryArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::format::{output_by_format_result, print_json};

/// Execute the history command
pub fn execute(ctx: &CommandContext, args: &HistoryArgs) -> Result<()> {
    let config = ctx.config()?;
    let history = HistoryStore::new(&config.history_path).load()?;

    if let Some(key) = &args.key {
        let key = EvalKey::from(key.as_str());
        let entry = history
            .get(&key)
            .ok_or_else(|| CeError::not_found("history entry", &key))?;
        return output_by_format_result!(ctx.cli.format,
            json => print_json(&serde_json::json!({ key.as_str(): entry })),
            human => {
                print_entry(&key, entry);
            }
        );
    }

    let entries: Vec<(&EvalKey, &HistoryEntry)> = history
        .iter()
        .filter(|(_, entry)| args.status.is_none_or(|s| entry.status == s))
        .collect();

    output_by_format_result!(ctx.cli.format,
        json => {
            let mut map = Map::new();
            for (key, entry) in &entries {
                map.insert(key.to_string(), serde_json::to_value(entry)?);
            }
            print_json(&Value::Object(map))
        },
        human => {
            if entries.is_empty() {
                if !ctx.cli.quiet {
                    println!("No history entries");
                }
            } else {
                for (key, entry) in &entries {
                    print_entry(key, entry);
                }
            }
        }
    )
}

fn print_entry(key: &EvalKey, entry: &HistoryEntry) {
    println!(
        "{} {} {}",
        key,
        entry.status,
        entry.created_at.format("%Y-%m-%dT%H:%M:%SZ")
    );
    for reason in &entry.reasons {
        println!("  - {}", reason);
    }
}
