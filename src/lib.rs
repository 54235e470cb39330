//! # stagehand - Declarative Hook Pipeline Runner
//!
//! stagehand runs an ordered list of named, versioned checks over a changeset
//! and aggregates pass/fail results with auto-fix support. Hooks are external,
//! opaque processes; the engine handles selection, scheduling, timeouts, and
//! reporting.
//!
//! ## Quick Start
//!
//! ```bash
//! # Install stagehand
//! cargo install stagehand
//!
//! # Write a starter configuration
//! stagehand config init
//!
//! # Run the pipeline over the working tree
//! stagehand run --all-files
//! ```

pub mod aggregator;
pub mod changeset;
pub mod cli;
pub mod config;
pub mod error;
pub mod registry;
pub mod runner;
pub mod selector;
pub mod shared;

pub use cli::{Cli, Output};
pub use config::StagehandConfig;
pub use error::{Error, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
