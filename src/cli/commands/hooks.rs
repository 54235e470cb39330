//! `stagehand hooks` - hook registry management

use crate::cli::{HooksCommands, Output};
use crate::config::StagehandConfig;
use crate::registry::Registry;
use anyhow::Result;
use std::path::Path;

/// Execute hooks subcommands
pub async fn execute(cmd: HooksCommands, config_path: Option<&Path>, output: &Output) -> Result<i32> {
    match cmd {
        HooksCommands::List => list(config_path, output),
    }
}

fn list(config_path: Option<&Path>, output: &Output) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let config = StagehandConfig::resolve(config_path, &cwd)?;
    let registry = Registry::from_config(&config)?;

    if registry.is_empty() {
        output.info("no hooks configured");
        return Ok(0);
    }

    output.header("Configured hooks");
    for hook in registry.list() {
        let mut details = format!("{} @ {}", hook.source, hook.version);
        if hook.autofix {
            details.push_str(" [autofix]");
        }
        if hook.always_run {
            details.push_str(" [always]");
        }
        output.table_row(&hook.name, &details);
        if output.is_verbose() {
            if !hook.files.is_empty() {
                output.indent(&format!("files: {}", hook.files.join(", ")));
            }
            if !hook.exclude.is_empty() {
                output.indent(&format!("exclude: {}", hook.exclude.join(", ")));
            }
        }
    }

    Ok(0)
}
