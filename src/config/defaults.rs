//! Default configuration constants and install steps.
//!
//! The default steps mirror a fresh theme checkout: front-end packages at
//! the root and PHP packages under `src/`.

use std::collections::BTreeMap;

use super::InstallStep;

/// Config file name used for local and per-user lookups.
pub(super) const CONFIG_FILE_NAME: &str = "elebee.toml";
/// Per-user config directory name under the config root.
pub(super) const CONFIG_DIR_NAME: &str = "elebee";
/// Spinner label shown while the install batch runs.
pub(super) const DEFAULT_PROGRESS_LABEL: &str = "Installing dependencies...";
/// Message printed once every install step has finished.
pub(super) const DEFAULT_READY_MESSAGE: &str = "Theme initialized! You are ready to go.";

/// npm, bower and composer installs; composer lives under `src/`.
pub(super) fn default_install_steps() -> Vec<InstallStep> {
    vec![
        InstallStep {
            command: "npm install".to_string(),
            cwd: None,
            env: BTreeMap::new(),
        },
        InstallStep {
            command: "bower install".to_string(),
            cwd: None,
            env: BTreeMap::new(),
        },
        InstallStep {
            command: "composer install".to_string(),
            cwd: Some("src".into()),
            env: BTreeMap::new(),
        },
    ]
}
