//! Terminal user-interface building blocks.
//!
//! Spinner lifecycle, styling constants, and the stderr renderer live here so
//! the runner and batch layers never touch the terminal directly.

pub mod progress;
pub mod renderer;
pub mod settings;

pub use progress::{ProgressHandle, ProgressMetrics, ProgressPause};
pub use renderer::Renderer;
