//! File selection for hooks
//!
//! Given a changeset and a hook descriptor, the selector computes which files
//! the hook applies to. Inclusion patterns are applied first, then exclusion
//! patterns; a file matching any exclude pattern is removed regardless of
//! inclusion matches. An empty selection is not an error.

use crate::changeset::Changeset;
use crate::error::{Error, Result};
use crate::registry::HookDescriptor;
use crate::shared::glob::build_globset;
use globset::GlobSet;
use std::path::PathBuf;

/// Compiled include/exclude filter for a single hook
#[derive(Debug)]
pub struct Selector {
    hook: String,
    include: Option<GlobSet>,
    exclude: GlobSet,
}

impl Selector {
    /// Compile the descriptor's patterns. A malformed pattern is fatal for
    /// this hook only; other hooks proceed.
    pub fn for_descriptor(descriptor: &HookDescriptor) -> Result<Self> {
        let include = if descriptor.files.is_empty() {
            // No inclusion patterns: the hook matches every file
            None
        } else {
            Some(build_globset(&descriptor.files).map_err(|e| Error::Selection {
                hook: descriptor.name.clone(),
                reason: format!("invalid include pattern: {e}"),
            })?)
        };

        let exclude = build_globset(&descriptor.exclude).map_err(|e| Error::Selection {
            hook: descriptor.name.clone(),
            reason: format!("invalid exclude pattern: {e}"),
        })?;

        Ok(Self {
            hook: descriptor.name.clone(),
            include,
            exclude,
        })
    }

    /// Subset of the changeset this hook applies to, in changeset order
    pub fn select(&self, changeset: &Changeset) -> Vec<PathBuf> {
        let selected: Vec<PathBuf> = changeset
            .files()
            .iter()
            .filter(|path| {
                let included = match &self.include {
                    Some(set) => set.is_match(path),
                    None => true,
                };
                included && !self.exclude.is_match(path)
            })
            .cloned()
            .collect();

        tracing::debug!(
            hook = %self.hook,
            selected = selected.len(),
            changeset = changeset.len(),
            "selected files"
        );

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(files: &[&str], exclude: &[&str]) -> HookDescriptor {
        HookDescriptor {
            name: "fmt".to_string(),
            source: "true".to_string(),
            version: "1.0".to_string(),
            args: vec![],
            files: files.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
            autofix: false,
            always_run: false,
        }
    }

    fn changeset(paths: &[&str]) -> Changeset {
        Changeset::from_paths(paths.iter().map(|s| s.to_string()))
    }

    #[test]
    fn selection_is_subset_in_changeset_order() {
        let selector = Selector::for_descriptor(&descriptor(&["**/*.py"], &[])).unwrap();
        let cs = changeset(&["z.py", "a.rs", "b.py"]);

        let selected = selector.select(&cs);
        assert_eq!(selected, vec![PathBuf::from("z.py"), PathBuf::from("b.py")]);
        for path in &selected {
            assert!(cs.files().contains(path));
        }
    }

    #[test]
    fn exclusion_wins_over_inclusion() {
        let selector =
            Selector::for_descriptor(&descriptor(&["**/*.py"], &["vendor/**"])).unwrap();
        let cs = changeset(&["vendor/dep.py", "app.py"]);

        assert_eq!(selector.select(&cs), vec![PathBuf::from("app.py")]);
    }

    #[test]
    fn empty_include_matches_everything() {
        let selector = Selector::for_descriptor(&descriptor(&[], &["*.lock"])).unwrap();
        let cs = changeset(&["a.py", "Cargo.lock"]);

        assert_eq!(selector.select(&cs), vec![PathBuf::from("a.py")]);
    }

    #[test]
    fn no_match_returns_empty_not_error() {
        let selector = Selector::for_descriptor(&descriptor(&["**/*.go"], &[])).unwrap();
        let cs = changeset(&["a.py"]);

        assert!(selector.select(&cs).is_empty());
    }

    #[test]
    fn malformed_pattern_is_selection_error() {
        let err = Selector::for_descriptor(&descriptor(&["["], &[])).unwrap_err();
        assert!(matches!(err, Error::Selection { .. }));

        let err = Selector::for_descriptor(&descriptor(&[], &["["])).unwrap_err();
        assert!(matches!(err, Error::Selection { .. }));
    }
}
