//! Environment overrides applied after file parsing.
//!
//! - `ELEBEE_THEME_DIR` sets `install.theme_dir`.
//! - `ELEBEE_NO_PROGRESS` disables the spinner when truthy.
//! - `NO_COLOR` disables color when set to any non-empty value.

use super::Config;

pub(super) fn apply_runtime_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv)
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(dir) = non_empty(env_lookup("ELEBEE_THEME_DIR")) {
        config.install.theme_dir = Some(dir.into());
    }
    if non_empty(env_lookup("ELEBEE_NO_PROGRESS")).is_some_and(|v| is_truthy(&v)) {
        config.display.progress = false;
    }
    if non_empty(env_lookup("NO_COLOR")).is_some() {
        config.display.color = false;
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_truthy(value: &str) -> bool {
    !matches!(
        value.to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn apply(vars: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut config = Config::default();
        apply_runtime_env_overrides(&mut config, &|name: &str| env.get(name).cloned());
        config
    }

    #[test]
    fn no_overrides_keeps_defaults() {
        assert_eq!(apply(&[]), Config::default());
    }

    #[test]
    fn theme_dir_override_is_trimmed() {
        let config = apply(&[("ELEBEE_THEME_DIR", "  themes/elebee  ")]);
        assert_eq!(config.install.theme_dir, Some("themes/elebee".into()));
        assert_eq!(apply(&[("ELEBEE_THEME_DIR", "   ")]).install.theme_dir, None);
    }

    #[test]
    fn progress_override_respects_falsy_values() {
        assert!(!apply(&[("ELEBEE_NO_PROGRESS", "1")]).display.progress);
        assert!(!apply(&[("ELEBEE_NO_PROGRESS", "yes")]).display.progress);
        assert!(apply(&[("ELEBEE_NO_PROGRESS", "0")]).display.progress);
        assert!(apply(&[("ELEBEE_NO_PROGRESS", "off")]).display.progress);
    }

    #[test]
    fn no_color_disables_color() {
        assert!(!apply(&[("NO_COLOR", "1")]).display.color);
        assert!(apply(&[("NO_COLOR", "")]).display.color);
    }
}
