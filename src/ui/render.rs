//! Rendering contracts and default terminal renderer bindings.
//!
//! `RenderSink` is the UI contract consumed by the app flows. Keeping it under
//! `ui` decouples orchestration from a specific renderer module path.

use crate::runner::Completion;

pub use crate::tui::progress::{ProgressHandle, ProgressMetrics};
pub use crate::tui::renderer::Renderer;

/// Injectable rendering interface used by orchestration code.
///
/// `Renderer` remains the default terminal implementation, but tests can
/// substitute a recording sink without coupling to stderr output.
pub trait RenderSink: Send + Sync {
    /// Start a progress indicator for a long-running task.
    fn progress(&self, label: &str) -> ProgressHandle;
    /// Start a progress indicator enriched with metrics.
    fn progress_with_metrics(&self, label: &str, metrics: ProgressMetrics) -> ProgressHandle;
    /// Render a warning line.
    fn warn(&self, msg: &str);
    /// Render a titled section divider.
    fn section(&self, title: &str);
    /// Render one key/value field row.
    fn field(&self, key: &str, value: &str);
    /// Render additional detail text.
    fn detail(&self, text: &str);
    /// Render an error line.
    fn error(&self, msg: &str);
    /// Render one stderr line emitted by a child process.
    fn command_stderr(&self, line: &str);
    /// Render the completion line of one command run.
    fn command_finished(&self, completion: &Completion);
    /// Render the batch-completion message.
    fn ready(&self, message: &str);
}

impl RenderSink for Renderer {
    fn progress(&self, label: &str) -> ProgressHandle {
        self.progress(label)
    }

    fn progress_with_metrics(&self, label: &str, metrics: ProgressMetrics) -> ProgressHandle {
        self.progress_with_metrics(label, metrics)
    }

    fn warn(&self, msg: &str) {
        self.warn(msg);
    }

    fn section(&self, title: &str) {
        self.section(title);
    }

    fn field(&self, key: &str, value: &str) {
        self.field(key, value);
    }

    fn detail(&self, text: &str) {
        self.detail(text);
    }

    fn error(&self, msg: &str) {
        self.error(msg);
    }

    fn command_stderr(&self, line: &str) {
        self.command_stderr(line);
    }

    fn command_finished(&self, completion: &Completion) {
        self.command_finished(completion);
    }

    fn ready(&self, message: &str) {
        self.ready(message);
    }
}
