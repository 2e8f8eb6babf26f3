//! Configuration loading
//!
//! Settings come from a `javagadget.toml` next to the analyzed project
//! (or `--config`), with CLI flags layered on top by the caller.

use crate::inspections::MethodMayBeStaticOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "javagadget.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Tool configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Glob patterns excluded from discovery
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub method_may_be_static: MethodMayBeStaticConfig,
}

/// The two toggles of the method-may-be-static inspection
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodMayBeStaticConfig {
    #[serde(default = "default_true")]
    pub ignore_empty_methods: bool,

    #[serde(default)]
    pub only_private_or_final: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MethodMayBeStaticConfig {
    fn default() -> Self {
        Self {
            ignore_empty_methods: true,
            only_private_or_final: false,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Look for a config file in the analyzed root, then the current
    /// directory. Absence is not an error.
    pub fn from_default_locations(root: &Path) -> Result<Self, ConfigError> {
        let mut candidates = vec![root.join(CONFIG_FILE_NAME)];
        candidates.push(PathBuf::from(CONFIG_FILE_NAME));
        for candidate in candidates {
            if candidate.is_file() {
                debug!("loading config from {}", candidate.display());
                return Self::from_file(&candidate);
            }
        }
        Ok(Self::default())
    }

    pub fn method_may_be_static_options(&self) -> MethodMayBeStaticOptions {
        MethodMayBeStaticOptions {
            ignore_empty_methods: self.method_may_be_static.ignore_empty_methods,
            only_private_or_final: self.method_may_be_static.only_private_or_final,
        }
    }
}
