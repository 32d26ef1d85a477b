//! Top-level config loading pipeline.

use std::path::{Component, Path, PathBuf};

use crate::error::ConfigError;
use crate::runner::{Invocation, RunOptions};

use super::env::apply_runtime_env_overrides;
use super::sources::{config_root_dir, read_config_text_with_sources};
use super::{Config, LoadedConfig};

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    Ok(load_config_with_source(path_override)?.config)
}

/// Load configuration and report which source it came from.
pub fn load_config_with_source(path_override: Option<&str>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

pub(super) fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    let mut config: Config = toml::from_str(&config_text)?;
    apply_runtime_env_overrides(&mut config, &env_lookup);
    validate_config(&config)?;
    tracing::debug!(%source, steps = config.install.steps.len(), "loaded config");
    Ok(LoadedConfig { config, source })
}

/// Reject install steps that could never produce a valid invocation.
pub(super) fn validate_config(config: &Config) -> Result<(), ConfigError> {
    for (index, step) in config.install.steps.iter().enumerate() {
        let label = format!("install.steps[{index}]");
        if let Some(cwd) = &step.cwd {
            validate_step_cwd(&label, cwd)?;
        }
        let options = RunOptions {
            env: step.env.clone(),
            ..RunOptions::default()
        };
        Invocation::new(step.command.as_str(), options)
            .map_err(|e| ConfigError::Invalid(format!("{label}: {e}")))?;
    }
    Ok(())
}

fn validate_step_cwd(label: &str, cwd: &Path) -> Result<(), ConfigError> {
    let escapes = cwd.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(ConfigError::Invalid(format!(
            "{label}: cwd `{}` must stay inside the theme directory",
            cwd.display()
        )));
    }
    Ok(())
}
