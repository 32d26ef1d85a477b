//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`ELEBEE_THEME_DIR`, `ELEBEE_NO_PROGRESS`, `NO_COLOR`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./elebee.toml in the current directory
//! 4. $XDG_CONFIG_HOME/elebee/elebee.toml (or ~/.config/elebee/elebee.toml)
//! 5. Built-in defaults

mod defaults;
mod env;
mod loader;
mod sources;
mod types;
mod write;

pub use loader::{load_config, load_config_with_source};
pub use sources::ConfigSource;
pub use types::{
    Config, DisplayConfig, InstallConfig, InstallStep, LoadedConfig, ThemeConfigWrite,
};
pub use write::{render_theme_config, write_theme_config};

#[cfg(test)]
mod tests {
    use super::loader::load_config_from_sources;
    use super::*;
    use crate::error::ConfigError;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    fn load_with(
        path_override: Option<&str>,
        files: &[(&str, &str)],
        env: &[(&str, &str)],
    ) -> Result<LoadedConfig, ConfigError> {
        let files: HashMap<PathBuf, String> = files
            .iter()
            .map(|(p, t)| (PathBuf::from(p), t.to_string()))
            .collect();
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_config_from_sources(
            path_override,
            |path: &Path| {
                files.get(path).cloned().ok_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::NotFound, "missing")
                })
            },
            |name: &str| env.get(name).cloned(),
            || Some(PathBuf::from("/home/dev/.config")),
        )
    }

    #[test]
    fn defaults_are_sensible() {
        let c = Config::default();
        assert!(c.display.color);
        assert!(c.display.progress);
        assert!(!c.install.strict);
        assert_eq!(c.install.theme_dir, None);
        assert_eq!(
            c.install.ready_message,
            "Theme initialized! You are ready to go."
        );
        let commands: Vec<_> = c.install.steps.iter().map(|s| s.command.as_str()).collect();
        assert_eq!(
            commands,
            vec!["npm install", "bower install", "composer install"]
        );
        assert_eq!(c.install.steps[2].cwd, Some(PathBuf::from("src")));
    }

    #[test]
    fn written_theme_config_is_picked_up_as_local_file() {
        let mut config = Config::default();
        config.install.ready_message = "Theme ready.".into();
        let text = render_theme_config(&config).unwrap();
        let loaded = load_with(None, &[("elebee.toml", text.as_str())], &[]).unwrap();
        assert_eq!(loaded.source, ConfigSource::Local);
        assert_eq!(loaded.config, config);
    }

    #[test]
    fn missing_files_fall_back_to_builtin_defaults() {
        let loaded = load_with(None, &[], &[]).unwrap();
        assert_eq!(loaded.source, ConfigSource::BuiltInDefaults);
        assert_eq!(loaded.config, Config::default());
    }

    #[test]
    fn local_file_wins_over_global() {
        let loaded = load_with(
            None,
            &[
                ("elebee.toml", "[install]\nstrict = true\n"),
                (
                    "/home/dev/.config/elebee/elebee.toml",
                    "[display]\ncolor = false\n",
                ),
            ],
            &[],
        )
        .unwrap();
        assert_eq!(loaded.source, ConfigSource::Local);
        assert!(loaded.config.install.strict);
        assert!(loaded.config.display.color);
    }

    #[test]
    fn global_file_is_used_when_no_local_file() {
        let loaded = load_with(
            None,
            &[(
                "/home/dev/.config/elebee/elebee.toml",
                "[display]\ncolor = false\n",
            )],
            &[],
        )
        .unwrap();
        assert_eq!(
            loaded.source,
            ConfigSource::Global(PathBuf::from("/home/dev/.config/elebee/elebee.toml"))
        );
        assert!(!loaded.config.display.color);
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_with(Some("custom.toml"), &[], &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)), "got: {err}");
    }

    #[test]
    fn custom_steps_replace_defaults() {
        let toml = r#"
            [[install.steps]]
            command = "yarn install --frozen-lockfile"

            [[install.steps]]
            command = "composer install"
            cwd = "src"
            env = { COMPOSER_NO_INTERACTION = "1" }
        "#;
        let loaded = load_with(Some("custom.toml"), &[("custom.toml", toml)], &[]).unwrap();
        let steps = &loaded.config.install.steps;
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].command, "yarn install --frozen-lockfile");
        assert_eq!(
            steps[1].env.get("COMPOSER_NO_INTERACTION").map(String::as_str),
            Some("1")
        );
        assert_eq!(
            loaded.config.install.ready_message,
            "Theme initialized! You are ready to go."
        );
    }

    #[test]
    fn env_overrides_apply_after_file() {
        let loaded = load_with(
            None,
            &[("elebee.toml", "[install]\ntheme_dir = \"from-file\"\n")],
            &[("ELEBEE_THEME_DIR", "from-env"), ("NO_COLOR", "1")],
        )
        .unwrap();
        assert_eq!(loaded.config.install.theme_dir, Some("from-env".into()));
        assert!(!loaded.config.display.color);
    }

    #[test]
    fn blank_step_command_is_rejected() {
        let toml = "[[install.steps]]\ncommand = \"  \"\n";
        let err = load_with(None, &[("elebee.toml", toml)], &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid config: install.steps[0]: command must not be empty"
        );
    }

    #[test]
    fn escaping_step_cwd_is_rejected() {
        for cwd in ["../outside", "/abs/path"] {
            let toml = format!("[[install.steps]]\ncommand = \"npm install\"\ncwd = \"{cwd}\"\n");
            let err = load_with(None, &[("elebee.toml", toml.as_str())], &[]).unwrap_err();
            assert!(
                err.to_string().contains("must stay inside the theme directory"),
                "cwd {cwd}: {err}"
            );
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = load_with(None, &[("elebee.toml", "[display]\ncolour = true\n")], &[])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "got: {err}");
    }
}
