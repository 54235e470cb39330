//! Hook execution
//!
//! Runs a single hook as an opaque external process: resolves the command,
//! passes the selected files as arguments, captures output as diagnostics,
//! and enforces a timeout. When the hook declares auto-fix, the selected
//! files are snapshotted before the run so rewrites can be detected.

pub mod scheduler;

use crate::error::{Error, Result};
use crate::registry::HookDescriptor;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

/// Per-hook outcome of a single run
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// Hook name
    pub hook: String,
    /// Process exit code; None when the hook never produced one (spawn failure, timeout)
    pub exit_code: Option<i32>,
    /// Ordered diagnostic messages captured from the hook
    pub diagnostics: Vec<String>,
    /// Whether the hook rewrote any of its selected files
    pub modified: bool,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl RunResult {
    /// A hook passes only with a zero exit status
    pub fn passed(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Fold an engine-level error into a failed result so the run can continue
    pub fn from_error(hook: &str, err: &Error, duration: Duration) -> Self {
        Self {
            hook: hook.to_string(),
            exit_code: None,
            diagnostics: vec![err.to_string()],
            modified: false,
            duration_ms: duration.as_millis() as u64,
        }
    }
}

/// Execute a hook against its selected files, blocking until completion or timeout.
/// Engine-level failures (unresolvable command, timeout) are returned as errors;
/// a hook that runs and exits non-zero is a normal, failed result.
pub async fn run(
    descriptor: &HookDescriptor,
    files: &[PathBuf],
    timeout: Duration,
    workdir: &Path,
) -> Result<RunResult> {
    let started = Instant::now();

    let program = resolve_command(descriptor)?;

    let snapshot = if descriptor.autofix {
        Some(snapshot_files(files, workdir))
    } else {
        None
    };

    tracing::debug!(hook = %descriptor.name, program = %program.display(), files = files.len(), "spawning hook");

    let mut command = Command::new(&program);
    command
        .args(&descriptor.args)
        .args(files)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = command.spawn().map_err(|e| Error::Execution {
        hook: descriptor.name.clone(),
        reason: format!("failed to spawn '{}': {e}", descriptor.source),
    })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|e| Error::Execution {
            hook: descriptor.name.clone(),
            reason: format!("failed to collect output: {e}"),
        })?,
        Err(_) => {
            // kill_on_drop terminates the child when the future is dropped
            return Err(Error::Timeout {
                hook: descriptor.name.clone(),
                elapsed: started.elapsed(),
            });
        }
    };

    let mut diagnostics = Vec::new();
    for line in String::from_utf8_lossy(&output.stdout).lines() {
        diagnostics.push(line.to_string());
    }
    for line in String::from_utf8_lossy(&output.stderr).lines() {
        diagnostics.push(line.to_string());
    }

    let modified = snapshot
        .map(|before| before != snapshot_files(files, workdir))
        .unwrap_or(false);

    Ok(RunResult {
        hook: descriptor.name.clone(),
        exit_code: output.status.code(),
        diagnostics,
        modified,
        duration_ms: started.elapsed().as_millis() as u64,
    })
}

/// Resolve the descriptor's source to a runnable program path. Commands with
/// a path component are taken as-is; bare names are looked up on PATH.
fn resolve_command(descriptor: &HookDescriptor) -> Result<PathBuf> {
    let source = Path::new(&descriptor.source);

    if descriptor.source.contains(std::path::MAIN_SEPARATOR) {
        return Ok(source.to_path_buf());
    }

    which::which(&descriptor.source).map_err(|_| Error::Execution {
        hook: descriptor.name.clone(),
        reason: format!("command '{}' not found on PATH", descriptor.source),
    })
}

/// Content snapshot of the selected files. Unreadable or missing files map to
/// None so deletions and creations also register as modifications.
fn snapshot_files(files: &[PathBuf], workdir: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
    files
        .iter()
        .map(|file| {
            let absolute = if file.is_absolute() {
                file.clone()
            } else {
                workdir.join(file)
            };
            (file.clone(), std::fs::read(&absolute).ok())
        })
        .collect()
}
