//! Writing a theme-local `elebee.toml` from the resolved configuration.
//!
//! `theme_dir` is never written: the file lives in the theme directory, and
//! `./elebee.toml` is found by the loader when run from there.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::ConfigError;

use super::defaults::CONFIG_FILE_NAME;
use super::loader::validate_config;
use super::{Config, ThemeConfigWrite};

const HEADER: &str = "\
# elebee configuration for this theme.
# Steps run concurrently; `cwd` is relative to this directory.

";

/// Serialize `config` as the contents of a theme-local `elebee.toml`.
pub fn render_theme_config(config: &Config) -> Result<String, ConfigError> {
    let mut local = config.clone();
    local.install.theme_dir = None;
    validate_config(&local)?;
    Ok(format!("{HEADER}{}", toml::to_string_pretty(&local)?))
}

/// Write `config` to `<theme_root>/elebee.toml`.
///
/// An existing file is left alone unless `force` is set.
pub fn write_theme_config(
    theme_root: &Path,
    config: &Config,
    force: bool,
) -> Result<ThemeConfigWrite, ConfigError> {
    let path = theme_root.join(CONFIG_FILE_NAME);
    let text = render_theme_config(config)?;

    if force {
        let existed = path.exists();
        std::fs::write(&path, text)?;
        return Ok(if existed {
            ThemeConfigWrite::Replaced { path }
        } else {
            ThemeConfigWrite::Created { path }
        });
    }

    match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(mut file) => {
            file.write_all(text.as_bytes())?;
            Ok(ThemeConfigWrite::Created { path })
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Ok(ThemeConfigWrite::Kept { path })
        }
        Err(e) => Err(e.into()),
    }
}
