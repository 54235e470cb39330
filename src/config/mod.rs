//! Configuration management for stagehand
//!
//! This module handles loading, parsing, and validating the declarative hook
//! pipeline configuration. Files may be YAML, TOML, or JSON; values can be
//! overridden through `STAGEHAND_`-prefixed environment variables.

use crate::error::{Error, Result};
use figment::Figment;
use figment::providers::Env;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod smart_load;


/// Main configuration structure for stagehand
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StagehandConfig {
    /// Engine-wide settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Ordered hook declarations
    #[serde(default)]
    pub hooks: Vec<HookConfig>,
}

/// Engine-wide execution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Timeout for a single hook invocation (seconds)
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Maximum number of hooks run concurrently (0 = auto-detect from CPU count)
    #[serde(default)]
    pub jobs: usize,

    /// Stop dispatching new hooks after the first failure
    #[serde(default)]
    pub fail_fast: bool,
}

fn default_timeout() -> u64 {
    300
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            jobs: 0,
            fail_fast: false,
        }
    }
}

/// A single hook declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookConfig {
    /// Hook name, unique within the pipeline
    pub name: String,

    /// Command or location the hook is invoked as
    pub source: String,

    /// Version pin (a tag like "24.3.0" or a hex revision)
    pub version: String,

    /// Extra arguments passed before the selected files
    #[serde(default)]
    pub args: Vec<String>,

    /// Inclusion glob patterns; empty means the hook matches every file
    #[serde(default)]
    pub files: Vec<String>,

    /// Exclusion glob patterns; a match here removes the file regardless of inclusion
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether the hook may rewrite files in place
    #[serde(default)]
    pub autofix: bool,

    /// Run the hook even when no files match its filters
    #[serde(default)]
    pub always_run: bool,
}

/// File names probed during config discovery, in priority order
const CONFIG_FILE_NAMES: &[&str] = &[
    "stagehand.yml",
    ".stagehand.yml",
    "stagehand.yaml",
    "stagehand.toml",
    "stagehand.json",
];

impl StagehandConfig {
    /// Load configuration from an explicit file path
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Configuration(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let figment = Figment::new()
            .merge(smart_load::auto(path))
            .merge(Env::prefixed("STAGEHAND_").split("__"));

        let config: StagehandConfig = figment.extract().map_err(|e| {
            Error::Configuration(format!("failed to parse {}: {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Find a configuration file in the given directory or any of its parents
    pub fn find_config_file(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.exists() {
                    return Some(candidate);
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve and load configuration: explicit path if given, otherwise discovery
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => {
                let found = Self::find_config_file(cwd).ok_or_else(|| {
                    Error::Configuration(format!(
                        "no stagehand config file found from {}",
                        cwd.display()
                    ))
                })?;
                tracing::debug!(config = %found.display(), "discovered config file");
                Self::load_from_file(&found)
            }
        }
    }

    /// Validate engine-level settings
    pub fn validate(&self) -> Result<()> {
        if self.engine.timeout == 0 {
            return Err(Error::Configuration(
                "engine timeout cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Starter configuration written by `stagehand config init`
pub const CONFIG_TEMPLATE: &str = r#"# stagehand pipeline configuration
#
# Hooks run in declaration order. Hooks whose selected files overlap are
# serialized; independent hooks may run in parallel.

engine:
  # Per-hook timeout in seconds
  timeout: 300
  # Concurrent hooks (0 = auto-detect)
  jobs: 0
  fail_fast: false

hooks:
  - name: fmt
    source: rustfmt
    version: "1.7.0"
    args: ["--edition", "2021"]
    files: ["**/*.rs"]
    exclude: ["target/**"]
    autofix: true

  - name: trailing-whitespace
    source: whitespace-check
    version: "0.3.1"
    files: ["**/*"]
    exclude: ["**/*.bin"]
"#;
