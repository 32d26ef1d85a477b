//! One-shot "N of N done" join primitive.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

type Continuation = Box<dyn FnOnce() + Send + 'static>;

/// Result of one [`CompletionBarrier::arrive`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// More arrivals are needed.
    Pending { remaining: usize },
    /// This arrival reached the target and ran the continuation.
    Completed,
    /// The target had already been reached; nothing ran.
    Overflow,
}

/// Counts arrivals toward a fixed target and runs a continuation exactly once,
/// on the arrival that reaches it.
///
/// Arrivals may come from any thread in any order. The count is an atomic, so
/// exactly one caller observes the target value; that caller takes the
/// continuation out of its slot and runs it.
pub struct CompletionBarrier {
    target: usize,
    arrived: AtomicUsize,
    continuation: Mutex<Option<Continuation>>,
}

impl CompletionBarrier {
    /// Create a barrier for `target` arrivals.
    ///
    /// With `target == 0` the continuation runs immediately, before this
    /// returns.
    pub fn new(target: usize, continuation: impl FnOnce() + Send + 'static) -> Self {
        if target == 0 {
            continuation();
            return Self {
                target,
                arrived: AtomicUsize::new(0),
                continuation: Mutex::new(None),
            };
        }
        Self {
            target,
            arrived: AtomicUsize::new(0),
            continuation: Mutex::new(Some(Box::new(continuation))),
        }
    }

    /// Record one completion.
    pub fn arrive(&self) -> Arrival {
        let previous = self
            .arrived
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.target).then_some(n + 1)
            });
        let Ok(previous) = previous else {
            return Arrival::Overflow;
        };
        let now = previous + 1;
        if now < self.target {
            return Arrival::Pending {
                remaining: self.target - now,
            };
        }

        let continuation = self
            .continuation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(continuation) = continuation {
            continuation();
        }
        Arrival::Completed
    }

    /// Declared number of arrivals.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Arrivals recorded so far (never exceeds the target).
    pub fn arrived(&self) -> usize {
        self.arrived.load(Ordering::Acquire)
    }

    /// True once the target has been reached.
    pub fn is_complete(&self) -> bool {
        self.arrived() >= self.target
    }
}

impl fmt::Debug for CompletionBarrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionBarrier")
            .field("target", &self.target)
            .field("arrived", &self.arrived())
            .finish()
    }
}
