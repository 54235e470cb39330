//! `stagehand config` - configuration management

use crate::cli::{ConfigCommands, Output};
use crate::config::{CONFIG_TEMPLATE, StagehandConfig};
use crate::registry::Registry;
use anyhow::Result;
use std::path::Path;

/// Execute config subcommands
pub async fn execute(
    cmd: ConfigCommands,
    config_path: Option<&Path>,
    force: bool,
    output: &Output,
) -> Result<i32> {
    match cmd {
        ConfigCommands::Init => init(force, output),
        ConfigCommands::Validate => validate(config_path, output),
        ConfigCommands::Show => show(config_path, output),
    }
}

fn init(force: bool, output: &Output) -> Result<i32> {
    let path = std::env::current_dir()?.join("stagehand.yml");

    if path.exists() && !force {
        if !output.confirm(&format!("{} already exists, overwrite?", path.display())) {
            output.info("aborted");
            return Ok(0);
        }
    }

    std::fs::write(&path, CONFIG_TEMPLATE)?;
    output.success(&format!("wrote {}", path.display()));
    Ok(0)
}

fn validate(config_path: Option<&Path>, output: &Output) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let config = StagehandConfig::resolve(config_path, &cwd)?;
    let registry = Registry::from_config(&config)?;

    output.success(&format!(
        "configuration valid ({} hooks)",
        registry.len()
    ));
    Ok(0)
}

fn show(config_path: Option<&Path>, output: &Output) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let config = StagehandConfig::resolve(config_path, &cwd)?;

    let rendered = serde_yml::to_string(&config)?;
    output.header("Effective configuration");
    println!("{rendered}");
    Ok(0)
}
