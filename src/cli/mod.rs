//! Command-line interface for stagehand
//!
//! This module provides the main CLI structure and command handling.
//! It uses clap for argument parsing and maps engine outcomes to the
//! documented exit codes: 0 all passed, 1 failures, 2 configuration error.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
mod output;

pub use output::Output;

/// stagehand - declarative hook pipeline runner
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// Force overwrite without prompting
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the hook pipeline over a changeset
    Run {
        /// Read the changeset from a file (one path per line)
        #[arg(long, value_name = "FILE")]
        changeset: Option<PathBuf>,

        /// Build the changeset from every file in the working tree
        #[arg(long)]
        all_files: bool,

        /// Run only the named hooks (repeatable)
        #[arg(long = "hook", value_name = "NAME")]
        hooks: Vec<String>,

        /// Concurrent hook limit (0 = auto-detect)
        #[arg(short, long, env = "STAGEHAND_JOBS")]
        jobs: Option<usize>,

        /// Working-tree path (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        cwd: Option<PathBuf>,

        /// Explicit changeset paths
        paths: Vec<PathBuf>,
    },
    /// Hook registry management
    #[command(subcommand)]
    Hooks(HooksCommands),
    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Show version information
    Version,
}

/// Hook registry subcommands
#[derive(Subcommand)]
pub enum HooksCommands {
    /// List configured hooks in declaration order
    List,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a starter configuration file
    Init,
    /// Validate configuration
    Validate,
    /// Show current configuration
    Show,
}

impl Cli {
    /// Execute the CLI command, returning the process exit code
    pub async fn run(self) -> Result<i32> {
        let output = Output::new(self.verbose, self.quiet);

        match self.command {
            Some(Commands::Run {
                changeset,
                all_files,
                hooks,
                jobs,
                cwd,
                paths,
            }) => {
                let args = commands::run::RunArgs {
                    changeset,
                    all_files,
                    hooks,
                    jobs,
                    cwd,
                    paths,
                };
                commands::run::execute(args, self.config.as_deref(), &self.format, &output).await
            }
            Some(Commands::Hooks(cmd)) => {
                commands::hooks::execute(cmd, self.config.as_deref(), &output).await
            }
            Some(Commands::Config(cmd)) => {
                commands::config::execute(cmd, self.config.as_deref(), self.force, &output).await
            }
            Some(Commands::Version) => commands::version::execute(&output).await,
            None => {
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(0)
            }
        }
    }
}
