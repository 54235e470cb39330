//! Result aggregation
//!
//! Combines per-hook results into a single pipeline outcome. Any non-zero
//! exit is a failure regardless of modification. NeedsRerun is reported only
//! when every exit was zero but at least one hook rewrote files, signaling
//! the caller to re-run for a stable fixed point.

use crate::runner::RunResult;
use serde::Serialize;

/// Overall outcome of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "hooks")]
pub enum Outcome {
    /// Every invoked hook exited zero and nothing was rewritten
    AllPassed,
    /// At least one hook failed; carries the failing hook names
    SomeFailed(Vec<String>),
    /// All hooks passed but some rewrote files; carries the modifying hook names
    NeedsRerun(Vec<String>),
}

impl Outcome {
    /// CLI exit code: 0 only for a fully clean run
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::AllPassed => 0,
            Outcome::SomeFailed(_) | Outcome::NeedsRerun(_) => 1,
        }
    }
}

/// Aggregate per-hook results into one outcome. Order-independent: names are
/// reported sorted, so permuting the input yields the same outcome.
pub fn aggregate(results: &[RunResult]) -> Outcome {
    let mut failed: Vec<String> = results
        .iter()
        .filter(|r| !r.passed())
        .map(|r| r.hook.clone())
        .collect();

    if !failed.is_empty() {
        failed.sort();
        return Outcome::SomeFailed(failed);
    }

    let mut modified: Vec<String> = results
        .iter()
        .filter(|r| r.modified)
        .map(|r| r.hook.clone())
        .collect();

    if !modified.is_empty() {
        modified.sort();
        return Outcome::NeedsRerun(modified);
    }

    Outcome::AllPassed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(hook: &str, exit_code: Option<i32>, modified: bool) -> RunResult {
        RunResult {
            hook: hook.to_string(),
            exit_code,
            diagnostics: vec![],
            modified,
            duration_ms: 1,
        }
    }

    #[test]
    fn empty_results_are_all_passed() {
        assert_eq!(aggregate(&[]), Outcome::AllPassed);
    }

    #[test]
    fn zero_exits_without_modification_pass() {
        let results = vec![result("a", Some(0), false), result("b", Some(0), false)];
        assert_eq!(aggregate(&results), Outcome::AllPassed);
    }

    #[test]
    fn autofix_rewrite_with_zero_exit_needs_rerun() {
        let results = vec![result("fmt", Some(0), true)];
        assert_eq!(
            aggregate(&results),
            Outcome::NeedsRerun(vec!["fmt".to_string()])
        );
    }

    #[test]
    fn nonzero_exit_fails_even_with_modification() {
        let results = vec![result("fmt", Some(1), true), result("lint", Some(0), false)];
        assert_eq!(
            aggregate(&results),
            Outcome::SomeFailed(vec!["fmt".to_string()])
        );
    }

    #[test]
    fn missing_exit_status_counts_as_failure() {
        let results = vec![result("slow", None, false)];
        assert_eq!(
            aggregate(&results),
            Outcome::SomeFailed(vec!["slow".to_string()])
        );
    }

    #[test]
    fn aggregation_is_order_independent() {
        let a = vec![
            result("x", Some(1), false),
            result("y", Some(0), true),
            result("z", Some(1), false),
        ];
        let mut b = a.clone();
        b.reverse();

        assert_eq!(aggregate(&a), aggregate(&b));
        assert_eq!(
            aggregate(&a),
            Outcome::SomeFailed(vec!["x".to_string(), "z".to_string()])
        );
    }
}
