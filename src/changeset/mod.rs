//! Changeset construction
//!
//! A changeset is the ordered set of file paths a run considers. It is always
//! supplied from outside the engine: explicit paths on the command line, a
//! changeset file (one path per line), or a gitignore-aware walk of the
//! working tree.

use crate::error::{Error, Result};
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Ordered, de-duplicated sequence of file paths under consideration
#[derive(Debug, Clone, Default)]
pub struct Changeset {
    files: Vec<PathBuf>,
}

impl Changeset {
    /// Build a changeset from caller-supplied paths, preserving order and
    /// dropping duplicates
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for path in paths {
            let path = path.into();
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }

        Self { files }
    }

    /// Read a changeset file: one path per line, blank lines and `#` comments skipped
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!(
                "failed to read changeset file {}: {e}",
                path.display()
            ))
        })?;

        let paths = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(PathBuf::from);

        Ok(Self::from_paths(paths))
    }

    /// Walk the working tree, honoring gitignore rules, and collect every file
    pub fn from_working_tree(root: &Path) -> Result<Self> {
        let mut files = Vec::new();

        for entry in WalkBuilder::new(root).hidden(true).build() {
            let entry = entry.map_err(|e| Error::Io(std::io::Error::other(e)))?;

            if entry.file_type().is_some_and(|ft| ft.is_file()) {
                let path = entry
                    .path()
                    .strip_prefix(root)
                    .unwrap_or(entry.path())
                    .to_path_buf();
                files.push(path);
            }
        }

        // Walk order is platform-dependent; sort for a stable changeset
        files.sort();

        Ok(Self::from_paths(files))
    }

    /// Files in changeset order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}
