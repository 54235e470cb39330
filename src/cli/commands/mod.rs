//! Command implementations for the stagehand CLI
//!
//! Each command is organized into its own module for better maintainability.

pub mod config;
pub mod hooks;
pub mod run;
pub mod version;
