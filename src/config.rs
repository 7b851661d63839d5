//! Daemon configuration.
//!
//! Resolution order:
//! 1. FGP_WRAPPED_CONFIG environment variable
//! 2. $XDG_CONFIG_HOME/fgp/wrapped.yml
//! 3. ~/.config/fgp/wrapped.yml
//!
//! A missing file means defaults. Missing keys fall back to their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::stats::DEFAULT_LANGUAGE_LIMIT;

const CONFIG_ENV: &str = "FGP_WRAPPED_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrappedConfig {
    /// Maximum languages in the breakdown.
    pub language_limit: usize,
    /// Maximum repositories in the summary's top list.
    pub top_repositories: usize,
    /// tracing-subscriber EnvFilter directive.
    pub log_filter: String,
}

impl Default for WrappedConfig {
    fn default() -> Self {
        Self {
            language_limit: DEFAULT_LANGUAGE_LIMIT,
            top_repositories: 5,
            log_filter: "fgp_wrapped=debug,fgp_daemon=debug".to_string(),
        }
    }
}

impl WrappedConfig {
    /// Load from the resolved config path.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Resolve the config file path.
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(shellexpand::tilde(&path).into_owned()));
            }
        }

        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg).join("fgp").join("wrapped.yml"));
        }

        let home = dirs::home_dir().context("Could not determine home directory")?;

        Ok(home.join(".config").join("fgp").join("wrapped.yml"))
    }
}
