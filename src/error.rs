//! Error taxonomy for the stagehand engine
//!
//! Only configuration errors abort a run before any hook executes; selection,
//! execution, and timeout errors are scoped to a single hook and accumulated
//! into the final report.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for stagehand operations
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing descriptor fields. Fatal: aborts before any hook runs.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Malformed selection pattern. Fatal for the named hook only.
    #[error("selection error in hook '{hook}': {reason}")]
    Selection { hook: String, reason: String },

    /// Hook process failed to start or was otherwise unrunnable.
    #[error("execution error in hook '{hook}': {reason}")]
    Execution { hook: String, reason: String },

    /// Hook exceeded its allotted time.
    #[error("hook '{hook}' timed out after {elapsed:?}")]
    Timeout { hook: String, elapsed: Duration },

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Exit code the CLI maps this error to (configuration errors are 2, everything else 1).
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Configuration(_) => 2,
            _ => 1,
        }
    }
}
