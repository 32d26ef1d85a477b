//! Configuration data model.
//!
//! This module holds struct/enum definitions plus default values. Loading and
//! source resolution live in `config::loader` and `config::sources`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::defaults::{default_install_steps, DEFAULT_PROGRESS_LABEL, DEFAULT_READY_MESSAGE};
use super::sources::ConfigSource;

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub display: DisplayConfig,
    pub install: InstallConfig,
}

/// Terminal presentation settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub color: bool,
    /// Show a spinner while commands run.
    pub progress: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

/// Settings for `elebee init`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct InstallConfig {
    /// Theme checkout root; the current directory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_dir: Option<PathBuf>,
    pub progress_label: String,
    pub ready_message: String,
    /// Treat any failed step as a failed `init`.
    pub strict: bool,
    pub steps: Vec<InstallStep>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            theme_dir: None,
            progress_label: DEFAULT_PROGRESS_LABEL.to_string(),
            ready_message: DEFAULT_READY_MESSAGE.to_string(),
            strict: false,
            steps: default_install_steps(),
        }
    }
}

/// One dependency installer launched by `elebee init`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InstallStep {
    pub command: String,
    /// Working directory relative to the theme root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// Configuration payload plus where it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// Result of writing a theme-local `elebee.toml` (`elebee config`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeConfigWrite {
    Created { path: PathBuf },
    /// A file was already there and `force` was not set.
    Kept { path: PathBuf },
    Replaced { path: PathBuf },
}
