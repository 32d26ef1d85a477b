//! Fan-out of independent runs joined into one downstream action.
//!
//! A batch declares its size up front, launches every invocation without
//! waiting on its siblings, and arrives at a [`CompletionBarrier`] from each
//! run's completion callback. The downstream action therefore fires exactly
//! once, after the last run to finish, whichever that is.
//!
//! Exit codes do not gate the barrier: a batch is complete when every run has
//! finished, not when every run has succeeded. Callers that care inspect the
//! [`BatchReport`].

mod barrier;

pub use barrier::{Arrival, CompletionBarrier};

use crate::runner::{CommandRunner, Completion, Invocation, RunHandle};
use serde::Serialize;
use std::sync::Arc;

/// Handle to a launched batch.
pub struct BatchHandle {
    runs: Vec<RunHandle>,
    barrier: Arc<CompletionBarrier>,
}

/// Launch every invocation concurrently; `on_all_done` runs once all finish.
///
/// Must be called from within a tokio runtime.
pub fn launch(
    runner: &CommandRunner,
    invocations: Vec<Invocation>,
    on_all_done: impl FnOnce() + Send + 'static,
) -> BatchHandle {
    let barrier = Arc::new(CompletionBarrier::new(invocations.len(), on_all_done));
    tracing::debug!(runs = invocations.len(), "launching batch");

    let runs = invocations
        .into_iter()
        .map(|invocation| {
            let barrier = Arc::clone(&barrier);
            runner.run(
                invocation,
                Some(Box::new(move |completion: &Completion| {
                    let arrival = barrier.arrive();
                    tracing::debug!(
                        command = %completion.command,
                        ?arrival,
                        "batch member finished"
                    );
                })),
            )
        })
        .collect();

    BatchHandle { runs, barrier }
}

impl BatchHandle {
    /// Number of runs in the batch.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// True for a batch launched with no invocations.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// True once every run has reported completion.
    pub fn is_complete(&self) -> bool {
        self.barrier.is_complete()
    }

    /// Wait for every run; completions are returned in launch order.
    pub async fn wait(self) -> BatchReport {
        let mut completions = Vec::with_capacity(self.runs.len());
        for run in self.runs {
            completions.push(run.wait().await);
        }
        BatchReport { completions }
    }
}

/// Completions of one batch, in launch order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub completions: Vec<Completion>,
}

impl BatchReport {
    /// Runs that did not exit with code zero.
    pub fn failures(&self) -> impl Iterator<Item = &Completion> {
        self.completions
            .iter()
            .filter(|completion| !completion.outcome.succeeded())
    }

    /// True when every run exited with code zero.
    pub fn all_succeeded(&self) -> bool {
        self.failures().next().is_none()
    }
}
