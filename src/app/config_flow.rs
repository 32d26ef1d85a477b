//! `elebee config`: pin the resolved install settings into the theme directory.

use elebee::config::{write_theme_config, Config, ThemeConfigWrite};
use elebee::install::resolve_theme_root;
use elebee::ui::render::RenderSink;
use std::path::PathBuf;

/// Write `<theme>/elebee.toml` from `config`. Returns the exit code.
pub(crate) fn run_config_flow(
    renderer: &dyn RenderSink,
    config: &Config,
    dir: Option<PathBuf>,
    force: bool,
) -> Result<i32, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("failed to read current directory: {e}"))?;
    let root = resolve_theme_root(dir.as_deref(), &config.install, &cwd);
    if !root.is_dir() {
        return Err(format!(
            "theme directory `{}` does not exist",
            root.display()
        ));
    }
    let result = write_theme_config(&root, config, force)
        .map_err(|e| format!("failed to write theme config: {e}"))?;
    render_write_result(renderer, config, &result);
    Ok(0)
}

fn render_write_result(renderer: &dyn RenderSink, config: &Config, result: &ThemeConfigWrite) {
    let (title, path) = match result {
        ThemeConfigWrite::Created { path } => ("wrote theme config", path),
        ThemeConfigWrite::Replaced { path } => ("replaced theme config", path),
        ThemeConfigWrite::Kept { path } => {
            renderer.section("theme config already present");
            renderer.field("path", &path.display().to_string());
            renderer.detail("Re-run with --force to overwrite it.");
            return;
        }
    };
    renderer.section(title);
    renderer.field("path", &path.display().to_string());
    for step in &config.install.steps {
        let cwd = step
            .cwd
            .as_ref()
            .map(|cwd| format!(" (in {})", cwd.display()))
            .unwrap_or_default();
        renderer.field("step", &format!("{}{cwd}", step.command));
    }
}
