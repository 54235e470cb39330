//! Glob pattern utilities
//!
//! Unified globset construction used by hook file filters.

use globset::{Glob, GlobSet, GlobSetBuilder};

/// Create a GlobSet from a list of patterns for efficient batch matching.
/// Directory patterns like "target/" are widened to match everything below them.
pub fn build_globset(patterns: &[String]) -> Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let processed = if pattern.ends_with('/') {
            format!("{pattern}**")
        } else {
            pattern.clone()
        };
        builder.add(Glob::new(&processed)?);
    }

    builder.build()
}
