//! Terminal output renderer for status and command-lifecycle messages.
//!
//! Everything here writes to stderr. Stdout is reserved for machine-readable
//! output such as `elebee init --json`.

use crate::runner::{Completion, Outcome};
use crate::tui::progress::{set_progress_enabled, start_progress, ProgressHandle, ProgressMetrics};
use crate::tui::settings;
use crossterm::style::Stylize;

/// Handles all terminal output formatting.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Whether ANSI color/style output is enabled.
    color: bool,
}

impl Renderer {
    /// Create a renderer with optional color output.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Whether this renderer emits ANSI styling.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Globally enable/disable live progress spinners.
    pub fn set_progress_enabled(enabled: bool) {
        set_progress_enabled(enabled);
    }

    /// Start a spinner with a status label on stderr.
    pub fn progress(&self, label: &str) -> ProgressHandle {
        self.progress_with_metrics(label, ProgressMetrics::default())
    }

    /// Start a spinner with optional metric key/value pairs.
    pub fn progress_with_metrics(&self, label: &str, metrics: ProgressMetrics) -> ProgressHandle {
        start_progress(label.to_string(), self.color, Some(metrics))
    }

    /// Print a warning (to stderr).
    pub fn warn(&self, msg: &str) {
        if self.color {
            eprintln!(
                "\r{} {msg}",
                settings::LABEL_WARNING.with(settings::COLOR_WARNING).bold()
            );
        } else {
            eprintln!("\r{} {msg}", settings::LABEL_WARNING);
        }
    }

    /// Print a small section header in status-style output.
    pub fn section(&self, title: &str) {
        if self.color {
            eprintln!(
                "\r{} {}",
                settings::GLYPH_SECTION_BULLET.with(settings::COLOR_SECTION_BULLET),
                title.with(settings::COLOR_SECTION_TITLE).bold()
            );
        } else {
            eprintln!("\r{title}:");
        }
    }

    /// Print a key/value line under a status section.
    pub fn field(&self, key: &str, value: &str) {
        if self.color {
            eprintln!(
                "\r{}{} {}",
                settings::INDENT_1,
                format!("{key}:").with(settings::COLOR_FIELD_KEY),
                value.with(settings::COLOR_FIELD_VALUE),
            );
        } else {
            eprintln!("\r{}{key}: {value}", settings::INDENT_1);
        }
    }

    /// Print a simple indented detail line.
    pub fn detail(&self, text: &str) {
        if self.color {
            eprintln!(
                "\r{}{}",
                settings::INDENT_1,
                text.with(settings::COLOR_FIELD_VALUE)
            );
        } else {
            eprintln!("\r{}{text}", settings::INDENT_1);
        }
    }

    /// Print an error (to stderr).
    pub fn error(&self, msg: &str) {
        if self.color {
            eprintln!(
                "\r{} {msg}",
                settings::LABEL_ERROR.with(settings::COLOR_ERROR).bold()
            );
        } else {
            eprintln!("\r{} {msg}", settings::LABEL_ERROR);
        }
    }

    /// Forward one stderr line from a child process verbatim.
    pub fn command_stderr(&self, line: &str) {
        if self.color {
            eprintln!("\r{}", line.with(settings::COLOR_COMMAND_STDERR));
        } else {
            eprintln!("\r{line}");
        }
    }

    /// Print the single completion line of one command run.
    pub fn command_finished(&self, completion: &Completion) {
        let line = completion.summary_line();
        if !self.color {
            eprintln!("\r{line}");
            return;
        }
        let (glyph, tone) = match completion.outcome {
            Outcome::Exited(0) => (settings::GLYPH_FINISHED_OK, settings::COLOR_FINISHED_OK),
            _ => (
                settings::GLYPH_FINISHED_FAILED,
                settings::COLOR_FINISHED_FAILED,
            ),
        };
        eprintln!("\r{} {line}", glyph.with(tone));
    }

    /// Print the batch-completion message.
    pub fn ready(&self, message: &str) {
        if self.color {
            eprintln!("\r\n{}", message.with(settings::COLOR_READY).bold());
        } else {
            eprintln!("\r\n{message}");
        }
    }
}
