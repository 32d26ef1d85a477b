//! Command runner: executes one shell command as a child process and reports
//! its lifecycle.
//!
//! `CommandRunner::run` returns immediately with a [`RunHandle`]. The child is
//! driven on a tokio task: stderr lines reach the [`RunSink`] as they arrive,
//! stdout is drained and suppressed, and once the process has exited the sink
//! receives one completion line before the optional callback fires, exactly
//! once and whatever the exit code.
//!
//! State machine per run: `Idle -> Running -> Completed(outcome)`. There is no
//! cancelled state; dropping a [`RunHandle`] detaches from the run without
//! killing the child.

mod process;
mod sink;

use crate::error::InvocationError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub use process::{Execution, ProcessBackend, ShellBackend, StderrForwarder};
pub use sink::{IndicatorSink, RendererSink, RunSink, SilentSink};

/// Callback invoked exactly once when a run completes.
pub type CompletionCallback = Box<dyn FnOnce(&Completion) + Send + 'static>;

/// Working-directory and environment settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Directory the child starts in; the caller's cwd when `None`.
    pub working_dir: Option<PathBuf>,
    /// Variables set on top of (or instead of) the inherited environment.
    pub env: BTreeMap<String, String>,
    /// Whether the child inherits the parent environment before `env` applies.
    pub inherit_env: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            working_dir: None,
            env: BTreeMap::new(),
            inherit_env: true,
        }
    }
}

impl RunOptions {
    /// Run the child in `dir`.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Set one environment variable for the child.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Start the child from an empty environment (plus `env`).
    pub fn without_inherited_env(mut self) -> Self {
        self.inherit_env = false;
        self
    }
}

/// One validated external-process execution request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    command: String,
    options: RunOptions,
}

impl Invocation {
    /// Validate and build an invocation for a shell command line.
    pub fn new(command: impl Into<String>, options: RunOptions) -> Result<Self, InvocationError> {
        let command = command.into();
        if command.trim().is_empty() {
            return Err(InvocationError::EmptyCommand);
        }
        for (key, value) in &options.env {
            validate_env_entry(key, value)?;
        }
        Ok(Self { command, options })
    }

    /// The shell command line.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Working-directory/environment settings.
    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// The configured working directory, if any.
    pub fn working_dir(&self) -> Option<&Path> {
        self.options.working_dir.as_deref()
    }
}

fn validate_env_entry(key: &str, value: &str) -> Result<(), InvocationError> {
    if key.is_empty() {
        return Err(InvocationError::InvalidEnv("empty variable name".into()));
    }
    if key.contains('=') {
        return Err(InvocationError::InvalidEnv(format!(
            "variable name `{key}` contains `=`"
        )));
    }
    if key.contains('\0') || value.contains('\0') {
        return Err(InvocationError::InvalidEnv(format!(
            "variable `{key}` contains a NUL byte"
        )));
    }
    Ok(())
}

/// Parse a `KEY=VALUE` assignment as given on the command line.
pub fn parse_env_assignment(raw: &str) -> Result<(String, String), InvocationError> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(InvocationError::InvalidEnv(format!("missing `=` in `{raw}`")));
    };
    let key = key.trim();
    validate_env_entry(key, value)?;
    Ok((key.to_string(), value.to_string()))
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    /// The process exited with a status code.
    Exited(i32),
    /// The process ended without a status code (for example, killed by a signal).
    Terminated,
    /// The process could not be started.
    SpawnFailed(String),
    /// The process started but its exit could not be observed.
    WaitFailed(String),
}

impl Outcome {
    /// Exit code, when the process reported one.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Exited(code) => Some(*code),
            _ => None,
        }
    }

    /// True only for a zero exit code.
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Exited(0))
    }
}

/// Final report of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub command: String,
    pub outcome: Outcome,
    /// Bytes of stdout drained and suppressed.
    pub stdout_bytes: u64,
}

impl Completion {
    /// Human-readable completion line printed once per run.
    pub fn summary_line(&self) -> String {
        match &self.outcome {
            Outcome::Exited(code) => format!("Finished \"{}\" with code {code}", self.command),
            Outcome::Terminated => {
                format!("Finished \"{}\" without an exit code", self.command)
            }
            Outcome::SpawnFailed(err) => format!("Failed to start \"{}\": {err}", self.command),
            Outcome::WaitFailed(err) => format!("Lost track of \"{}\": {err}", self.command),
        }
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary_line())
    }
}

/// Lifecycle of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed(Outcome),
}

/// Launches invocations through a [`ProcessBackend`] and reports to a [`RunSink`].
#[derive(Clone)]
pub struct CommandRunner {
    backend: Arc<dyn ProcessBackend>,
    sink: Arc<dyn RunSink>,
}

impl CommandRunner {
    /// Runner that executes through the platform shell.
    pub fn new(sink: Arc<dyn RunSink>) -> Self {
        Self::with_backend(Arc::new(ShellBackend), sink)
    }

    /// Runner with an explicit process backend.
    pub fn with_backend(backend: Arc<dyn ProcessBackend>, sink: Arc<dyn RunSink>) -> Self {
        Self { backend, sink }
    }

    /// Start `invocation` without blocking the caller.
    ///
    /// Must be called from within a tokio runtime. `on_complete` fires exactly
    /// once, after the process has exited and its stderr has been drained.
    pub fn run(&self, invocation: Invocation, on_complete: Option<CompletionCallback>) -> RunHandle {
        let (state_tx, state_rx) = watch::channel(RunState::Idle);
        state_tx.send_replace(RunState::Running);

        let backend = Arc::clone(&self.backend);
        let sink = Arc::clone(&self.sink);
        let command = invocation.command().to_string();

        let task = tokio::spawn(async move {
            tracing::debug!(
                command = invocation.command(),
                cwd = ?invocation.working_dir(),
                "spawning command"
            );
            sink.started(&invocation);
            let forwarder = StderrForwarder::new(sink.as_ref(), invocation.command());
            let execution = backend.execute(&invocation, &forwarder).await;
            let completion = Completion {
                command: invocation.command().to_string(),
                outcome: execution.outcome,
                stdout_bytes: execution.stdout_bytes,
            };
            log_completion(&completion);

            sink.finished(&completion);
            state_tx.send_replace(RunState::Completed(completion.outcome.clone()));
            if let Some(callback) = on_complete {
                callback(&completion);
            }
            completion
        });

        RunHandle {
            command,
            state: state_rx,
            task,
        }
    }
}

fn log_completion(completion: &Completion) {
    match &completion.outcome {
        Outcome::Exited(code) => {
            tracing::info!(command = %completion.command, code, "command finished");
        }
        Outcome::Terminated => {
            tracing::info!(command = %completion.command, "command ended without exit code");
        }
        Outcome::SpawnFailed(err) | Outcome::WaitFailed(err) => {
            tracing::warn!(command = %completion.command, error = %err, "command failed");
        }
    }
    tracing::trace!(
        command = %completion.command,
        bytes = completion.stdout_bytes,
        "suppressed stdout"
    );
}

/// Handle to one in-flight run.
pub struct RunHandle {
    command: String,
    state: watch::Receiver<RunState>,
    task: JoinHandle<Completion>,
}

impl RunHandle {
    /// Command line of this run.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        self.state.borrow().clone()
    }

    /// Wait for the run to complete.
    ///
    /// If the run task itself panicked (for example inside the completion
    /// callback), the result is reported as [`Outcome::WaitFailed`].
    pub async fn wait(self) -> Completion {
        match self.task.await {
            Ok(completion) => completion,
            Err(err) => Completion {
                command: self.command,
                outcome: Outcome::WaitFailed(format!("run task aborted: {err}")),
                stdout_bytes: 0,
            },
        }
    }
}
