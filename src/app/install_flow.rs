//! `elebee init`: run every install step at once, then announce readiness.
//!
//! The busy indicator is owned by the flow, not by any one run. Every run
//! writes through the same [`IndicatorSink`], and the batch action stops the
//! indicator before printing the ready message.

use elebee::batch::{self, BatchReport};
use elebee::config::InstallConfig;
use elebee::install::{resolve_theme_root, InstallPlan};
use elebee::runner::{
    CommandRunner, IndicatorSink, ProcessBackend, RendererSink, RunSink, ShellBackend,
};
use elebee::ui::render::{ProgressMetrics, RenderSink};
use std::path::PathBuf;
use std::sync::Arc;

/// Flags from `elebee init`.
#[derive(Debug, Clone, Default)]
pub(crate) struct InstallRequest {
    pub(crate) dir: Option<PathBuf>,
    pub(crate) strict: bool,
    pub(crate) json: bool,
}

/// Resolve the theme root and run the install batch. Returns the exit code.
pub(crate) async fn run_install_flow(
    renderer: Arc<dyn RenderSink>,
    install: &InstallConfig,
    request: InstallRequest,
) -> Result<i32, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("failed to read current directory: {e}"))?;
    let root = resolve_theme_root(request.dir.as_deref(), install, &cwd);
    if !root.is_dir() {
        return Err(format!(
            "theme directory `{}` does not exist",
            root.display()
        ));
    }
    let plan = InstallPlan::new(install, &root).map_err(|e| format!("invalid install step: {e}"))?;

    let report = run_install_plan(Arc::clone(&renderer), Arc::new(ShellBackend), plan, install).await;

    if request.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("failed to serialize install report: {e}"))?;
        println!("{json}");
    }

    let failed = report.failures().count();
    if failed > 0 {
        renderer.warn(&format!(
            "{failed} of {} install steps did not succeed",
            report.completions.len()
        ));
    }
    let strict = request.strict || install.strict;
    Ok(if strict && failed > 0 { 1 } else { 0 })
}

/// Launch the plan as one batch and wait for every run.
pub(crate) async fn run_install_plan(
    renderer: Arc<dyn RenderSink>,
    backend: Arc<dyn ProcessBackend>,
    plan: InstallPlan,
    install: &InstallConfig,
) -> BatchReport {
    renderer.section("installing dependencies");
    renderer.field("theme", &plan.root().display().to_string());
    for invocation in plan.invocations() {
        renderer.field("step", invocation.command());
    }

    let metrics = ProgressMetrics::default().with_entry("steps", plan.invocations().len().to_string());
    let progress = renderer.progress_with_metrics(&install.progress_label, metrics);
    let sink = Arc::new(IndicatorSink::new(
        RendererSink::new(Arc::clone(&renderer)),
        progress,
    ));
    let runner = CommandRunner::with_backend(backend, Arc::clone(&sink) as Arc<dyn RunSink>);

    let ready_message = install.ready_message.clone();
    let ready_renderer = Arc::clone(&renderer);
    let ready_sink = Arc::clone(&sink);
    // The action runs on a runtime worker, so it only stops painting. The
    // spinner thread is joined after the batch has been awaited.
    let handle = batch::launch(&runner, plan.into_invocations(), move || {
        ready_sink.progress().stop();
        ready_renderer.ready(&ready_message);
    });
    let report = handle.wait().await;
    sink.finish();
    report
}
