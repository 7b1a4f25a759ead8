//! The search's exterior interface: progress/solution callbacks and the
//! running statistics they're fed.
//!
//! Following the teacher's posture of keeping logging singletons out of
//! algorithmic crates, `sidon-engine` never initializes a `tracing`
//! subscriber itself; it only emits `trace!`/`debug!` events at a handful
//! of natural seams and otherwise reports through these callbacks.

use std::time::Instant;

/// Snapshot of search progress, handed to a [`ProgressCallback`].
#[derive(Debug, Clone)]
pub struct Stats {
    pub nodes_explored: u64,
    pub current_depth: usize,
    pub best_max: Option<u64>,
    pub solutions_found: u64,
    pub start_time: Instant,
    pub last_log_time: Instant,
}

impl Stats {
    pub fn new() -> Self {
        let now = Instant::now();
        Stats {
            nodes_explored: 0,
            current_depth: 0,
            best_max: None,
            solutions_found: 0,
            start_time: now,
            last_log_time: now,
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

/// Called whenever the search finds a complete, valid N-element set.
/// `set` is given in increasing order.
pub type SolutionCallback<'a> = dyn FnMut(&[u64]) + 'a;

/// Called periodically (see [`crate::config::ProgressInterval`]) with the
/// running stats.
pub type ProgressCallback<'a> = dyn FnMut(&Stats) + 'a;

/// Sink for the handful of structured log events the search emits. The
/// default implementation is a no-op; `sidon-cli` supplies a `tracing`-
/// backed one at the application edge.
pub trait Logger {
    fn bound_improved(&self, _old: Option<u64>, _new: u64) {}
    fn search_completed(&self, _nodes_explored: u64, _solutions_found: u64) {}
}

/// A [`Logger`] that does nothing, used when the caller doesn't care.
pub struct NullLogger;

impl Logger for NullLogger {}

/// A [`Logger`] that forwards to `tracing` at natural seams, without ever
/// installing a subscriber itself.
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn bound_improved(&self, old: Option<u64>, new: u64) {
        tracing::debug!(old_bound = ?old, new_bound = new, "search tightened its bound");
    }

    fn search_completed(&self, nodes_explored: u64, solutions_found: u64) {
        tracing::trace!(nodes_explored, solutions_found, "search completed");
    }
}
