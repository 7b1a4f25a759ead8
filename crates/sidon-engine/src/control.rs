//! Cooperative cancellation for a running search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Wraps the shared stop flag a search checks during its recursion. A
/// caller flips the flag from another thread (e.g. a Ctrl-C handler) to
/// ask a long-running search to unwind early; the search notices on its
/// next node and returns with `Status::Interrupted`.
#[derive(Clone)]
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
}

impl SearchControl {
    /// A control surface that never reports stopped until explicitly told
    /// to, sharing `stopped` with whoever else holds a clone.
    pub fn new(stopped: Arc<AtomicBool>) -> Self {
        SearchControl { stopped }
    }

    /// A fresh, unshared control surface, for a search with no external
    /// cancellation source.
    pub fn unbounded() -> Self {
        SearchControl::new(Arc::new(AtomicBool::new(false)))
    }

    /// Whether the search should stop. Checked at every node; the writer
    /// side uses `Release` so everything it did before stopping is visible
    /// to whichever thread observes this `Acquire` load and unwinds.
    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Requests that the search stop.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    /// The underlying flag, for a caller that wants to share it with other
    /// machinery (e.g. a signal handler) rather than go through `stop()`.
    pub fn stop_flag(&self) -> &Arc<AtomicBool> {
        &self.stopped
    }
}

impl Default for SearchControl {
    fn default() -> Self {
        SearchControl::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_observed() {
        let control = SearchControl::unbounded();
        assert!(!control.should_stop());
        control.stop();
        assert!(control.should_stop());
    }

    #[test]
    fn shared_flag_stops_a_clone() {
        let control = SearchControl::unbounded();
        let clone = control.clone();
        clone.stop();
        assert!(control.should_stop());
    }
}
