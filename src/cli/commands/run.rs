//! `stagehand run` - execute the hook pipeline over a changeset

use crate::aggregator::{self, Outcome};
use crate::changeset::Changeset;
use crate::cli::Output;
use crate::config::StagehandConfig;
use crate::registry::Registry;
use crate::runner::scheduler::{RunReport, Scheduler, resolve_jobs};
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::watch;

/// Arguments for the run command
pub struct RunArgs {
    pub changeset: Option<PathBuf>,
    pub all_files: bool,
    pub hooks: Vec<String>,
    pub jobs: Option<usize>,
    pub cwd: Option<PathBuf>,
    pub paths: Vec<PathBuf>,
}

/// Machine-readable run report for --format json
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    outcome: &'a Outcome,
    #[serde(flatten)]
    report: &'a RunReport,
}

/// Execute the run command
pub async fn execute(
    args: RunArgs,
    config_path: Option<&Path>,
    format: &str,
    output: &Output,
) -> Result<i32> {
    let cwd = match &args.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let config = StagehandConfig::resolve(config_path, &cwd)?;
    let mut registry = Registry::from_config(&config)?;
    if !args.hooks.is_empty() {
        registry = registry.restrict(&args.hooks)?;
    }

    let changeset = build_changeset(&args, &cwd)?;
    output.verbose(&format!(
        "{} hooks over {} files",
        registry.len(),
        changeset.len()
    ));

    let scheduler = Scheduler {
        jobs: resolve_jobs(args.jobs, config.engine.jobs),
        timeout: Duration::from_secs(config.engine.timeout),
        fail_fast: config.engine.fail_fast,
    };

    // Ctrl-C terminates in-flight hooks and discards pending ones
    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("cancellation requested");
            let _ = cancel_tx.send(true);
        }
    });

    let report = scheduler
        .run_pipeline(&registry, &changeset, &cwd, cancel_rx)
        .await;
    let outcome = aggregator::aggregate(&report.results);

    if format == "json" {
        let json = JsonReport {
            outcome: &outcome,
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        render_text(&report, &outcome, output);
    }

    if !report.cancelled.is_empty() {
        return Ok(1);
    }
    Ok(outcome.exit_code())
}

fn build_changeset(args: &RunArgs, cwd: &Path) -> Result<Changeset> {
    if args.all_files {
        return Ok(Changeset::from_working_tree(cwd)?);
    }
    if let Some(file) = &args.changeset {
        return Ok(Changeset::from_file(file)?);
    }
    if !args.paths.is_empty() {
        return Ok(Changeset::from_paths(args.paths.iter().cloned()));
    }
    // Without an explicit changeset the whole working tree is considered
    Ok(Changeset::from_working_tree(cwd)?)
}

fn render_text(report: &RunReport, outcome: &Outcome, output: &Output) {
    for result in &report.results {
        let label = format!("{} ({}ms)", result.hook, result.duration_ms);
        if result.passed() {
            output.status_indicator("PASS", &label, true);
            if output.is_verbose() {
                for line in &result.diagnostics {
                    output.indent(line);
                }
            }
        } else {
            output.status_indicator("FAIL", &label, false);
            for line in &result.diagnostics {
                output.indent(line);
            }
        }
    }

    for name in &report.skipped {
        output.verbose(&format!("skipped {name} (no matching files)"));
    }
    for name in &report.cancelled {
        output.warning(&format!("cancelled {name}"));
    }

    output.blank_line();
    match outcome {
        Outcome::AllPassed => {
            output.success(&format!("All hooks passed ({} run)", report.results.len()));
        }
        Outcome::SomeFailed(names) => {
            output.error(&format!("{} hook(s) failed: {}", names.len(), names.join(", ")));
        }
        Outcome::NeedsRerun(names) => {
            output.warning(&format!(
                "hooks modified files, re-run to verify: {}",
                names.join(", ")
            ));
        }
    }
}
