//! Hook registry
//!
//! The registry holds the ordered, validated sequence of hook descriptors
//! built from the declarative configuration. Descriptors are immutable once
//! constructed; every later stage (selection, execution, aggregation) works
//! against this list.

use crate::config::{HookConfig, StagehandConfig};
use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Version pins accept a semver-ish tag (optional leading 'v') or a 7-40 char hex revision.
static VERSION_PIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(v?\d+(\.\d+)*([.-][0-9A-Za-z.]+)?|[0-9a-f]{7,40})$").unwrap()
});

/// Immutable description of a single hook
#[derive(Debug, Clone)]
pub struct HookDescriptor {
    /// Unique hook name
    pub name: String,
    /// Command or location the hook is invoked as
    pub source: String,
    /// Version pin
    pub version: String,
    /// Arguments passed before the selected files
    pub args: Vec<String>,
    /// Inclusion glob patterns (empty matches everything)
    pub files: Vec<String>,
    /// Exclusion glob patterns
    pub exclude: Vec<String>,
    /// Whether the hook may rewrite files in place
    pub autofix: bool,
    /// Run even when no files match
    pub always_run: bool,
}

impl HookDescriptor {
    fn from_config(hook: &HookConfig) -> Result<Self> {
        if hook.name.trim().is_empty() {
            return Err(Error::Configuration(
                "hook name cannot be empty".to_string(),
            ));
        }
        if hook.source.trim().is_empty() {
            return Err(Error::Configuration(format!(
                "hook '{}' has an empty source",
                hook.name
            )));
        }
        if !VERSION_PIN.is_match(&hook.version) {
            return Err(Error::Configuration(format!(
                "hook '{}' has a malformed version pin '{}'",
                hook.name, hook.version
            )));
        }

        Ok(Self {
            name: hook.name.clone(),
            source: hook.source.clone(),
            version: hook.version.clone(),
            args: hook.args.clone(),
            files: hook.files.clone(),
            exclude: hook.exclude.clone(),
            autofix: hook.autofix,
            always_run: hook.always_run,
        })
    }
}

/// Ordered collection of validated hook descriptors
#[derive(Debug, Clone, Default)]
pub struct Registry {
    hooks: Vec<HookDescriptor>,
}

impl Registry {
    /// Build a registry from configuration, enforcing the unique-name invariant
    pub fn from_config(config: &StagehandConfig) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut hooks = Vec::with_capacity(config.hooks.len());

        for hook in &config.hooks {
            let descriptor = HookDescriptor::from_config(hook)?;
            if !seen.insert(descriptor.name.clone()) {
                return Err(Error::Configuration(format!(
                    "duplicate hook name '{}'",
                    descriptor.name
                )));
            }
            hooks.push(descriptor);
        }

        Ok(Self { hooks })
    }

    /// Descriptors in declaration order
    pub fn list(&self) -> &[HookDescriptor] {
        &self.hooks
    }

    /// Look up a descriptor by name
    pub fn get(&self, name: &str) -> Option<&HookDescriptor> {
        self.hooks.iter().find(|h| h.name == name)
    }

    /// Restrict the registry to the named hooks, keeping declaration order.
    /// Unknown names are a configuration error.
    pub fn restrict(&self, names: &[String]) -> Result<Self> {
        for name in names {
            if self.get(name).is_none() {
                return Err(Error::Configuration(format!("unknown hook '{name}'")));
            }
        }

        let hooks = self
            .hooks
            .iter()
            .filter(|h| names.contains(&h.name))
            .cloned()
            .collect();

        Ok(Self { hooks })
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }
}
