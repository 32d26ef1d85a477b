//! Elebee: a theme bootstrapper that runs dependency installers in parallel.
//!
//! The crate is built from two small pieces. [`runner`] spawns one shell
//! command, streams its stderr to a sink and reports a [`runner::Completion`]
//! exactly once. [`batch`] launches several runs at once and fires a single
//! action after every one of them has completed, whatever their order.
//!
//! # Quick start
//!
//! ```no_run
//! use elebee::batch;
//! use elebee::runner::{CommandRunner, Invocation, RunOptions, SilentSink};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), elebee::error::InvocationError> {
//! let runner = CommandRunner::new(Arc::new(SilentSink));
//! let invocations = vec![
//!     Invocation::new("npm install", RunOptions::default())?,
//!     Invocation::new("composer install", RunOptions::default().with_working_dir("src"))?,
//! ];
//! let report = batch::launch(&runner, invocations, || println!("ready")).wait().await;
//! println!("{} failed", report.failures().count());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod install;
pub mod logging;
pub mod runner;
#[cfg(test)]
pub mod testsupport;
pub mod tui;
pub mod ui;
