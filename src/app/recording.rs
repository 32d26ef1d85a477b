//! Recording render sink shared by the flow tests.

use elebee::runner::Completion;
use elebee::ui::render::{ProgressHandle, ProgressMetrics, RenderSink};
use std::sync::Mutex;

/// Captures every rendered event as a `kind: text` line.
#[derive(Default)]
pub(crate) struct RecordingRenderer {
    events: Mutex<Vec<String>>,
}

impl RecordingRenderer {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, kind: &str, text: impl AsRef<str>) {
        self.events
            .lock()
            .unwrap()
            .push(format!("{kind}: {}", text.as_ref()));
    }
}

impl RenderSink for RecordingRenderer {
    fn progress(&self, label: &str) -> ProgressHandle {
        self.push("progress", label);
        ProgressHandle::disabled()
    }

    fn progress_with_metrics(&self, label: &str, metrics: ProgressMetrics) -> ProgressHandle {
        self.push("progress", format!("{label}{}", metrics.render_suffix()));
        ProgressHandle::disabled()
    }

    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }

    fn section(&self, title: &str) {
        self.push("section", title);
    }

    fn field(&self, key: &str, value: &str) {
        self.push("field", format!("{key}={value}"));
    }

    fn detail(&self, text: &str) {
        self.push("detail", text);
    }

    fn error(&self, msg: &str) {
        self.push("error", msg);
    }

    fn command_stderr(&self, line: &str) {
        self.push("stderr", line);
    }

    fn command_finished(&self, completion: &Completion) {
        self.push("finished", completion.summary_line());
    }

    fn ready(&self, message: &str) {
        self.push("ready", message);
    }
}
