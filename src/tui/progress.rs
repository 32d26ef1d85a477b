//! Spinner/progress primitives for terminal liveness indicators.
//!
//! A [`ProgressHandle`] owns one spinner thread. Text that must appear while the
//! spinner is live is written inside a [`ProgressPause`] guard: the guard clears
//! the spinner row and holds the draw lock so no frame is painted over the
//! text. The spinner repaints on its next tick after the guard drops.

use crate::tui::settings;
use crossterm::style::Stylize;
use std::io::{self, IsTerminal, Write};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};
use std::thread;
use std::time::{Duration, Instant};

static PROGRESS_ENABLED: AtomicBool = AtomicBool::new(true);

/// Destination for spinner frames (stderr outside of tests).
pub(crate) type ProgressWriter = Box<dyn Write + Send>;

/// Optional key/value metrics displayed next to a spinner label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressMetrics {
    /// Ordered key/value metrics appended to the spinner label.
    entries: Vec<(String, String)>,
}

impl ProgressMetrics {
    /// Append one metric key/value pair.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Render metrics as `[k:v ...]` suffix text.
    pub fn render_suffix(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let pairs = self
            .entries
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join(" ");
        format!(" [{pairs}]")
    }
}

struct SpinnerShared {
    /// Stop signal observed by the spinner thread.
    stop: AtomicBool,
    /// Serializes frame painting with suspended writers.
    draw: Mutex<ProgressWriter>,
}

impl SpinnerShared {
    fn lock_draw(&self) -> MutexGuard<'_, ProgressWriter> {
        self.draw.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// RAII handle for an active spinner/progress indicator.
///
/// The handle is the single owner of the spinner. Dropping it (or calling
/// [`ProgressHandle::finish`]) stops the thread and clears the spinner row.
pub struct ProgressHandle {
    shared: Arc<SpinnerShared>,
    /// Background writer thread, present only while the spinner is active.
    thread: Mutex<Option<thread::JoinHandle<()>>>,
}

/// Scoped suspension of a spinner; see [`ProgressHandle::suspend`].
pub struct ProgressPause<'a> {
    _draw: MutexGuard<'a, ProgressWriter>,
}

impl ProgressHandle {
    /// Construct a no-op handle used when progress output is disabled.
    pub fn disabled() -> Self {
        Self {
            shared: Arc::new(SpinnerShared {
                stop: AtomicBool::new(true),
                draw: Mutex::new(Box::new(io::sink())),
            }),
            thread: Mutex::new(None),
        }
    }

    /// True while the spinner thread is painting frames.
    pub fn is_active(&self) -> bool {
        !self.shared.stop.load(Ordering::Acquire)
    }

    /// Clear the spinner row and hold painting off until the guard drops.
    ///
    /// Concurrent callers are serialized, so interleaved writers never tear
    /// each other's lines.
    pub fn suspend(&self) -> ProgressPause<'_> {
        let mut draw = self.shared.lock_draw();
        if self.is_active() {
            let _ = write!(draw, "{}", settings::PROGRESS_CLEAR_LINE);
            let _ = draw.flush();
        }
        ProgressPause { _draw: draw }
    }

    /// Stop painting and clear the spinner row without joining the thread.
    ///
    /// Safe to call from async tasks. No frame is painted once this returns;
    /// [`ProgressHandle::finish`] still reaps the thread.
    pub fn stop(&self) {
        let mut draw = self.shared.lock_draw();
        if self.shared.stop.swap(true, Ordering::AcqRel) {
            return;
        }
        let _ = write!(draw, "{}", settings::PROGRESS_CLEAR_LINE);
        let _ = draw.flush();
    }

    /// Stop and clean up the spinner thread. Idempotent.
    pub fn finish(&self) {
        self.shared.stop.store(true, Ordering::Release);
        let thread = self
            .thread
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(thread) = thread {
            let _ = thread.join();
        }
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Globally enable/disable live progress rendering.
pub fn set_progress_enabled(enabled: bool) {
    PROGRESS_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Start a spinner on stderr with an optional metric suffix.
pub fn start_progress(
    label: impl Into<String>,
    color: bool,
    metrics: Option<ProgressMetrics>,
) -> ProgressHandle {
    if !PROGRESS_ENABLED.load(Ordering::Relaxed) {
        return ProgressHandle::disabled();
    }
    if !io::stderr().is_terminal() {
        return ProgressHandle::disabled();
    }
    spawn_spinner(
        label.into(),
        color,
        metrics.unwrap_or_default(),
        Box::new(io::stderr()),
        Duration::from_millis(settings::PROGRESS_TICK_MS),
    )
}

pub(crate) fn spawn_spinner(
    label: String,
    color: bool,
    metrics: ProgressMetrics,
    writer: ProgressWriter,
    tick: Duration,
) -> ProgressHandle {
    let shared = Arc::new(SpinnerShared {
        stop: AtomicBool::new(false),
        draw: Mutex::new(writer),
    });
    let worker = Arc::clone(&shared);

    let thread = thread::spawn(move || {
        let start = Instant::now();
        let mut idx = 0usize;

        loop {
            {
                let mut out = worker.lock_draw();
                if worker.stop.load(Ordering::Acquire) {
                    break;
                }
                let line = progress_line(
                    settings::PROGRESS_FRAMES[idx % settings::PROGRESS_FRAMES.len()],
                    &label,
                    start.elapsed(),
                    color,
                    &metrics,
                );
                let _ = write!(out, "{line}");
                let _ = out.flush();
            }
            idx += 1;
            thread::sleep(tick);
        }

        let mut out = worker.lock_draw();
        let _ = write!(out, "{}", settings::PROGRESS_CLEAR_LINE);
        let _ = out.flush();
    });

    ProgressHandle {
        shared,
        thread: Mutex::new(Some(thread)),
    }
}

fn progress_line(
    frame: char,
    label: &str,
    elapsed: Duration,
    color: bool,
    metrics: &ProgressMetrics,
) -> String {
    let elapsed_s = elapsed.as_millis() as f64 / 1000.0;
    let suffix = metrics.render_suffix();
    if color {
        format!(
            "{}{} {} {}{}",
            settings::PROGRESS_CLEAR_LINE,
            format!("[{frame}]").with(settings::COLOR_PROGRESS_FRAME),
            label.with(settings::COLOR_PROGRESS_LABEL),
            format!("({elapsed_s:.1}s)").with(settings::COLOR_PROGRESS_ELAPSED),
            suffix,
        )
    } else {
        format!(
            "{}[{frame}] {label} ({elapsed_s:.1}s){suffix}",
            settings::PROGRESS_CLEAR_LINE
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn len(&self) -> usize {
            self.0.lock().unwrap().len()
        }

        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn spinner_into(buf: &SharedBuf) -> ProgressHandle {
        spawn_spinner(
            "installing".into(),
            false,
            ProgressMetrics::default(),
            Box::new(buf.clone()),
            Duration::from_millis(2),
        )
    }

    #[test]
    fn progress_line_plain_contains_label() {
        let out = progress_line(
            '|',
            "Installing elebee...",
            Duration::from_millis(1500),
            false,
            &ProgressMetrics::default(),
        );
        assert!(out.contains("[|] Installing elebee... (1.5s)"));
    }

    #[test]
    fn progress_line_includes_metrics_suffix() {
        let metrics = ProgressMetrics::default()
            .with_entry("steps", "3")
            .with_entry("done", "1");
        let out = progress_line('|', "install", Duration::from_millis(200), false, &metrics);
        assert!(out.contains("[steps:3 done:1]"));
    }

    #[test]
    fn disabled_handle_is_inert() {
        let handle = ProgressHandle::disabled();
        assert!(!handle.is_active());
        drop(handle.suspend());
        handle.finish();
        handle.finish();
    }

    #[test]
    fn suspend_blocks_frames_until_guard_drops() {
        let buf = SharedBuf::default();
        let handle = spinner_into(&buf);
        thread::sleep(Duration::from_millis(20));
        assert!(buf.text().contains("installing"));

        let pause = handle.suspend();
        let frozen = buf.len();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(buf.len(), frozen, "spinner painted while suspended");
        assert!(buf.text().ends_with(settings::PROGRESS_CLEAR_LINE));
        drop(pause);

        thread::sleep(Duration::from_millis(20));
        assert!(buf.len() > frozen, "spinner did not resume after suspension");
        assert!(handle.is_active());
        handle.finish();
    }

    #[test]
    fn stop_halts_frames_without_joining() {
        let buf = SharedBuf::default();
        let handle = spinner_into(&buf);
        thread::sleep(Duration::from_millis(10));
        handle.stop();
        assert!(!handle.is_active());
        let stopped = buf.len();
        assert!(buf.text().ends_with(settings::PROGRESS_CLEAR_LINE));

        thread::sleep(Duration::from_millis(10));
        let text = buf.text();
        assert!(
            !text[stopped..].contains("installing"),
            "spinner painted after stop"
        );
        handle.stop();
        handle.finish();
        assert!(buf.text().ends_with(settings::PROGRESS_CLEAR_LINE));
    }

    #[test]
    fn finish_clears_row_and_stops_painting() {
        let buf = SharedBuf::default();
        let handle = spinner_into(&buf);
        thread::sleep(Duration::from_millis(10));
        handle.finish();
        assert!(!handle.is_active());
        assert!(buf.text().ends_with(settings::PROGRESS_CLEAR_LINE));
        let settled = buf.len();
        thread::sleep(Duration::from_millis(10));
        assert_eq!(buf.len(), settled);
    }
}
