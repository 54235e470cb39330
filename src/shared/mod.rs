//! Shared utilities used across engine components

pub mod glob;
