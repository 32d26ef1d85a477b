//! Application entry orchestration for the elebee CLI.

use crate::app::config_flow::run_config_flow;
use crate::app::exec_mode::{run_exec_mode, ExecRequest};
use crate::app::install_flow::{run_install_flow, InstallRequest};
use crate::cli::{Args, Command};
use elebee::config::{load_config_with_source, Config};
use elebee::logging::init_tracing;
use elebee::ui::render::{RenderSink, Renderer};
use std::sync::Arc;

/// Top-level CLI entrypoint. Returns the process exit code.
pub(crate) async fn run(args: Args) -> i32 {
    let bootstrap_renderer = Renderer::new(!args.no_color);
    if let Err(e) = init_tracing(args.verbose) {
        bootstrap_renderer.warn(&format!("failed to initialize logging: {e}"));
    }

    let config = match load_runtime_config(args.config.as_deref(), args.no_color) {
        Ok(config) => config,
        Err(msg) => {
            bootstrap_renderer.error(&msg);
            return 1;
        }
    };
    let renderer = Renderer::new(config.display.color);
    Renderer::set_progress_enabled(config.display.progress);
    let sink: Arc<dyn RenderSink> = Arc::new(renderer);

    let result = match args.command {
        Command::Init { dir, strict, json } => {
            let request = InstallRequest { dir, strict, json };
            run_install_flow(Arc::clone(&sink), &config.install, request).await
        }
        Command::Exec { cwd, env, command } => {
            let request = ExecRequest { cwd, env, command };
            run_exec_mode(Arc::clone(&sink), request).await
        }
        Command::Config { dir, force } => run_config_flow(&renderer, &config, dir, force),
    };
    exit_code(&renderer, result)
}

/// Load config and apply CLI overrides.
fn load_runtime_config(path_override: Option<&str>, no_color: bool) -> Result<Config, String> {
    let loaded = load_config_with_source(path_override)
        .map_err(|e| format!("failed to load config: {e}"))?;
    tracing::debug!(source = %loaded.source, "config resolved");
    let mut config = loaded.config;
    if no_color {
        config.display.color = false;
    }
    Ok(config)
}

fn exit_code(renderer: &dyn RenderSink, result: Result<i32, String>) -> i32 {
    match result {
        Ok(code) => code,
        Err(msg) => {
            renderer.error(&msg);
            1
        }
    }
}
