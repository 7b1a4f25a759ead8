//! Search configuration.

use sidon_core::ManagerKind;

/// Whether the search stops at the first complete assignment it finds, or
/// keeps searching until it has proven the minimal max and collected every
/// set that achieves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Return as soon as any valid N-element set is found. Fast, but the
    /// max it returns is not proven minimal.
    FirstImprovement,
    /// Exhaust the bounded search space, tightening the bound on every
    /// improvement, and collect every set achieving the final minimal max.
    EnumerateAll,
}

/// How often the progress callback fires, in nodes explored. Chosen to stay
/// cheap relative to node expansion cost while still giving a caller
/// regular updates on a long search.
#[derive(Debug, Clone, Copy)]
pub struct ProgressInterval {
    /// Callback cadence while `nodes_explored` is below this threshold.
    pub dense_until: u64,
    /// Cadence while below `dense_until`.
    pub dense_interval: u64,
    /// Cadence once `nodes_explored >= dense_until`.
    pub sparse_interval: u64,
}

impl Default for ProgressInterval {
    fn default() -> Self {
        ProgressInterval {
            dense_until: 100_000,
            dense_interval: 1024,
            sparse_interval: 65_536,
        }
    }
}

impl ProgressInterval {
    pub fn should_fire(&self, nodes_explored: u64) -> bool {
        let interval = if nodes_explored < self.dense_until {
            self.dense_interval
        } else {
            self.sparse_interval
        };
        nodes_explored % interval == 0
    }
}

/// Parameters for a single `Search::run` call.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Target set size.
    pub n: u32,
    /// A known achievable max to seed the bound with, e.g. from a prior run
    /// recorded in persistence. `None` means "compute the default bound",
    /// `2^(n-1) + 1` (or 1 when `n == 0`).
    pub initial_bound: Option<u64>,
    pub mode: SearchMode,
    pub manager_kind: ManagerKind,
    pub progress_interval: ProgressInterval,
    /// Required to run with `manager_kind == ManagerKind::Iterative` when
    /// `n` is large enough that the search could plausibly push past the
    /// manager's 62-element ceiling before completing.
    pub acknowledge_iterative_limit: bool,
    /// In first-improvement mode, return as soon as any solution is found
    /// instead of continuing to tighten the bound. Ignored in enumerate-all
    /// mode, which always exhausts the bounded space.
    pub early_exit: bool,
}

impl SearchConfig {
    pub fn new(n: u32, mode: SearchMode) -> Self {
        SearchConfig {
            n,
            initial_bound: None,
            mode,
            manager_kind: ManagerKind::Fast,
            progress_interval: ProgressInterval::default(),
            acknowledge_iterative_limit: false,
            early_exit: false,
        }
    }

    /// Whether the search should stop unwinding as soon as it has any
    /// solution, per spec's `early_exit` flag — only meaningful outside
    /// enumerate-all mode, which must keep searching to prove optimality.
    pub fn early_exit(&self) -> bool {
        self.early_exit && self.mode == SearchMode::FirstImprovement
    }

    /// The bound the search starts from: the caller's `initial_bound` if
    /// set, otherwise `2^(n-1) + 1` (or 1 for `n == 0`), a loose bound any
    /// greedy construction (e.g. a Sidon set built from a perfect
    /// difference set) comfortably beats.
    pub fn starting_bound(&self) -> u64 {
        self.initial_bound.unwrap_or_else(|| default_bound(self.n))
    }
}

fn default_bound(n: u32) -> u64 {
    if n == 0 {
        1
    } else {
        (1u64 << (n - 1)) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bound_matches_spec_formula() {
        assert_eq!(default_bound(0), 1);
        assert_eq!(default_bound(1), 2);
        assert_eq!(default_bound(5), 17);
    }

    #[test]
    fn progress_interval_switches_cadence() {
        let interval = ProgressInterval::default();
        assert!(interval.should_fire(1024));
        assert!(!interval.should_fire(1025));
        assert!(interval.should_fire(100_000));
        assert!(!interval.should_fire(101_000));
        assert!(interval.should_fire(131_072));
    }
}
