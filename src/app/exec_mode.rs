//! `elebee exec`: run one command with stderr streaming.

use elebee::runner::{
    parse_env_assignment, CommandRunner, Completion, IndicatorSink, Invocation, Outcome,
    ProcessBackend, RendererSink, RunOptions, RunSink, ShellBackend,
};
use elebee::ui::render::RenderSink;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments from `elebee exec`.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExecRequest {
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) env: Vec<String>,
    pub(crate) command: Vec<String>,
}

/// Run the requested command and return the exit code to propagate.
pub(crate) async fn run_exec_mode(
    renderer: Arc<dyn RenderSink>,
    request: ExecRequest,
) -> Result<i32, String> {
    let invocation = build_invocation(request)?;
    let completion = run_single(renderer, Arc::new(ShellBackend), invocation).await;
    Ok(exit_code_for(&completion.outcome))
}

fn build_invocation(request: ExecRequest) -> Result<Invocation, String> {
    let mut options = RunOptions::default();
    if let Some(cwd) = request.cwd {
        options = options.with_working_dir(cwd);
    }
    for raw in &request.env {
        let (key, value) = parse_env_assignment(raw).map_err(|e| format!("--env: {e}"))?;
        options = options.with_env(key, value);
    }
    Invocation::new(command_line(&request.command), options).map_err(|e| e.to_string())
}

/// One word is taken as a full shell command line; several are an argv and
/// each word is quoted so the shell sees it unchanged.
fn command_line(words: &[String]) -> String {
    match words {
        [line] => line.clone(),
        words => shell_words::join(words),
    }
}

/// Run one invocation under its own busy indicator.
pub(crate) async fn run_single(
    renderer: Arc<dyn RenderSink>,
    backend: Arc<dyn ProcessBackend>,
    invocation: Invocation,
) -> Completion {
    let progress = renderer.progress(invocation.command());
    let sink = Arc::new(IndicatorSink::new(
        RendererSink::new(Arc::clone(&renderer)),
        progress,
    ));
    let runner = CommandRunner::with_backend(backend, Arc::clone(&sink) as Arc<dyn RunSink>);
    let completion = runner.run(invocation, None).wait().await;
    sink.finish();
    completion
}

/// Child exit code, or 1 when the child produced none.
fn exit_code_for(outcome: &Outcome) -> i32 {
    outcome.code().unwrap_or(1)
}
