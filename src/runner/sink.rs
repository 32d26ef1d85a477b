//! Destinations for run output.

use super::{Completion, Invocation};
use crate::tui::progress::ProgressHandle;
use crate::ui::render::RenderSink;
use std::sync::Arc;

/// Receives the observable lifecycle of runs.
///
/// One sink may serve several concurrent runs, so implementations must
/// tolerate calls from different tasks in any order.
pub trait RunSink: Send + Sync {
    /// Called on the run task before the process is spawned.
    fn started(&self, _invocation: &Invocation) {}
    /// One stderr line, delivered as soon as it is read.
    fn stderr_line(&self, command: &str, line: &str);
    /// Exactly once per run, after the process has exited.
    fn finished(&self, completion: &Completion);
}

/// Sink that discards everything; the runner's tracing events still fire.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl RunSink for SilentSink {
    fn stderr_line(&self, _command: &str, _line: &str) {}

    fn finished(&self, _completion: &Completion) {}
}

/// Sink that renders run output through a [`RenderSink`].
#[derive(Clone)]
pub struct RendererSink {
    renderer: Arc<dyn RenderSink>,
}

impl RendererSink {
    pub fn new(renderer: Arc<dyn RenderSink>) -> Self {
        Self { renderer }
    }
}

impl RunSink for RendererSink {
    fn stderr_line(&self, _command: &str, line: &str) {
        self.renderer.command_stderr(line);
    }

    fn finished(&self, completion: &Completion) {
        self.renderer.command_finished(completion);
    }
}

/// Sink that owns a busy indicator and writes every line through it.
///
/// Each forwarded line is written inside a suspension of the indicator, so
/// error text stays visible and the spinner resumes afterwards. The indicator
/// stays live until [`IndicatorSink::finish`] or drop.
pub struct IndicatorSink<S> {
    inner: S,
    progress: ProgressHandle,
}

impl<S: RunSink> IndicatorSink<S> {
    pub fn new(inner: S, progress: ProgressHandle) -> Self {
        Self { inner, progress }
    }

    /// The owned indicator.
    pub fn progress(&self) -> &ProgressHandle {
        &self.progress
    }

    /// Stop the indicator and clear its row.
    pub fn finish(&self) {
        self.progress.finish();
    }
}

impl<S: RunSink> RunSink for IndicatorSink<S> {
    fn started(&self, invocation: &Invocation) {
        self.inner.started(invocation);
    }

    fn stderr_line(&self, command: &str, line: &str) {
        let _pause = self.progress.suspend();
        self.inner.stderr_line(command, line);
    }

    fn finished(&self, completion: &Completion) {
        let _pause = self.progress.suspend();
        self.inner.finished(completion);
    }
}
