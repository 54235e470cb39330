//! Pipeline scheduling
//!
//! Hooks are independent units with no shared mutable state beyond the files
//! they select, so hooks with disjoint selections may run concurrently up to
//! the jobs limit. Hooks whose selected files overlap are placed in the same
//! conflict group and run sequentially in declaration order. Cancellation
//! terminates in-flight hook processes and discards pending ones.

use super::{RunResult, run};
use crate::changeset::Changeset;
use crate::error::Error;
use crate::registry::{HookDescriptor, Registry};
use crate::selector::Selector;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::{Semaphore, watch};
use tokio::task::JoinSet;

/// Scheduler settings for one pipeline run
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Maximum number of hooks running concurrently
    pub jobs: usize,
    /// Per-hook timeout
    pub timeout: Duration,
    /// Stop dispatching new hooks after the first failure
    pub fail_fast: bool,
}

/// Everything that happened during a pipeline run
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    /// Per-hook results in declaration order
    pub results: Vec<RunResult>,
    /// Hooks never invoked because nothing matched their filters (or fail-fast kicked in)
    pub skipped: Vec<String>,
    /// Hooks discarded or terminated by cancellation
    pub cancelled: Vec<String>,
}

/// Resolve the effective concurrency limit: CLI flag, then config, then CPU count
pub fn resolve_jobs(cli_jobs: Option<usize>, config_jobs: usize) -> usize {
    match cli_jobs {
        Some(n) if n > 0 => n,
        _ if config_jobs > 0 => config_jobs,
        _ => num_cpus::get(),
    }
}

struct Scheduled {
    index: usize,
    descriptor: HookDescriptor,
    files: Vec<PathBuf>,
}

impl Scheduler {
    /// Run every applicable hook in the registry against the changeset.
    ///
    /// Selection errors are fatal for their hook only and are folded into the
    /// report as failed results. The `cancel` channel aborts the whole run
    /// when it flips to true.
    pub async fn run_pipeline(
        &self,
        registry: &Registry,
        changeset: &Changeset,
        workdir: &Path,
        cancel: watch::Receiver<bool>,
    ) -> RunReport {
        let mut report = RunReport::default();
        let mut scheduled = Vec::new();

        for (index, descriptor) in registry.list().iter().enumerate() {
            let selector = match Selector::for_descriptor(descriptor) {
                Ok(selector) => selector,
                Err(err) => {
                    tracing::warn!(hook = %descriptor.name, error = %err, "selection failed");
                    report
                        .results
                        .push(RunResult::from_error(&descriptor.name, &err, Duration::ZERO));
                    continue;
                }
            };

            let files = selector.select(changeset);
            if files.is_empty() && !descriptor.always_run {
                tracing::debug!(hook = %descriptor.name, "no files matched, skipping");
                report.skipped.push(descriptor.name.clone());
                continue;
            }

            scheduled.push(Scheduled {
                index,
                descriptor: descriptor.clone(),
                files,
            });
        }

        if scheduled.is_empty() {
            return report;
        }

        let groups = conflict_groups(&scheduled);
        let mut by_index: HashMap<usize, Scheduled> =
            scheduled.into_iter().map(|s| (s.index, s)).collect();

        let semaphore = Arc::new(Semaphore::new(self.jobs.max(1)));
        let failed = Arc::new(AtomicBool::new(false));
        let mut tasks = JoinSet::new();

        for group in groups {
            let hooks: Vec<Scheduled> = group
                .into_iter()
                .map(|index| by_index.remove(&index).unwrap())
                .collect();
            let semaphore = semaphore.clone();
            let failed = failed.clone();
            let cancel = cancel.clone();
            let workdir = workdir.to_path_buf();
            let timeout = self.timeout;
            let fail_fast = self.fail_fast;

            tasks.spawn(async move {
                let _permit = semaphore.acquire().await;
                run_group(hooks, &workdir, timeout, fail_fast, failed, cancel).await
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(group_report) => {
                    report.results.extend(group_report.results);
                    report.skipped.extend(group_report.skipped);
                    report.cancelled.extend(group_report.cancelled);
                }
                Err(e) => {
                    tracing::error!(error = %e, "hook group task failed");
                }
            }
        }

        // Deterministic reporting regardless of completion order
        report.results.sort_by_key(|r| {
            registry
                .list()
                .iter()
                .position(|h| h.name == r.hook)
                .unwrap_or(usize::MAX)
        });

        report
    }
}

/// Run one conflict group sequentially, honoring cancellation between and
/// during hooks
async fn run_group(
    hooks: Vec<Scheduled>,
    workdir: &Path,
    timeout: Duration,
    fail_fast: bool,
    failed: Arc<AtomicBool>,
    cancel: watch::Receiver<bool>,
) -> RunReport {
    let mut report = RunReport::default();
    let mut pending = hooks.into_iter();

    while let Some(scheduled) = pending.next() {
        if *cancel.borrow() {
            report.cancelled.push(scheduled.descriptor.name.clone());
            report
                .cancelled
                .extend(pending.map(|s| s.descriptor.name.clone()));
            break;
        }

        if fail_fast && failed.load(Ordering::Relaxed) {
            report.skipped.push(scheduled.descriptor.name.clone());
            continue;
        }

        let started = Instant::now();
        let outcome = tokio::select! {
            result = run(&scheduled.descriptor, &scheduled.files, timeout, workdir) => Some(result),
            _ = cancelled(cancel.clone()) => None,
        };

        match outcome {
            Some(Ok(result)) => {
                if !result.passed() {
                    failed.store(true, Ordering::Relaxed);
                }
                report.results.push(result);
            }
            Some(Err(err)) => {
                if matches!(err, Error::Timeout { .. }) {
                    tracing::warn!(hook = %scheduled.descriptor.name, error = %err, "hook timed out");
                }
                failed.store(true, Ordering::Relaxed);
                report.results.push(RunResult::from_error(
                    &scheduled.descriptor.name,
                    &err,
                    started.elapsed(),
                ));
            }
            None => {
                // In-flight child is killed when its future drops
                report.cancelled.push(scheduled.descriptor.name.clone());
                report
                    .cancelled
                    .extend(pending.map(|s| s.descriptor.name.clone()));
                break;
            }
        }
    }

    report
}

/// Resolves once cancellation is requested; pends forever if the cancel
/// channel closes without firing
async fn cancelled(mut cancel: watch::Receiver<bool>) {
    loop {
        if *cancel.borrow() {
            return;
        }
        if cancel.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Partition scheduled hooks into connected components over shared files.
/// Hooks in the same component must run sequentially; distinct components
/// are independent. Components preserve declaration order internally.
fn conflict_groups(scheduled: &[Scheduled]) -> Vec<Vec<usize>> {
    let n = scheduled.len();
    let mut uf = UnionFind::new(n);
    let mut file_owner: HashMap<&PathBuf, usize> = HashMap::new();

    for (pos, hook) in scheduled.iter().enumerate() {
        for file in &hook.files {
            match file_owner.get(file) {
                Some(&owner) => uf.union(owner, pos),
                None => {
                    file_owner.insert(file, pos);
                }
            }
        }
    }

    let mut groups: HashMap<usize, Vec<usize>> = HashMap::new();
    for pos in 0..n {
        groups
            .entry(uf.find(pos))
            .or_default()
            .push(scheduled[pos].index);
    }

    let mut result: Vec<Vec<usize>> = groups.into_values().collect();
    result.sort_by_key(|group| group[0]);
    result
}

struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}
