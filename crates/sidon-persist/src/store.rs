//! The persistence contract the search layer is built against.
//!
//! `sidon-engine` never sees a database handle directly (per spec's design
//! note that the core should not couple to one); a caller wanting to skip
//! already-solved sizes or seed a tighter starting bound goes through this
//! trait instead.

use sidon_engine::SearchResult;

use crate::error::PersistError;

/// Durable storage of solved `(n -> best set)` results.
pub trait ResultStore {
    /// Whether `n` already has a proven-optimal result on record.
    fn has_optimal(&self, n: u32) -> Result<bool, PersistError>;

    /// The tightest previously-achieved max for `n`, if any. A caller can
    /// pass this as `SearchConfig::initial_bound` when it's smaller than the
    /// default `2^(n-1) + 1`.
    fn best_bound(&self, n: u32) -> Result<Option<u64>, PersistError>;

    /// Records a completed search's result. Called exactly once per
    /// completed search.
    fn save_result(&self, result: &SearchResult) -> Result<(), PersistError>;

    /// Records every optimal set found for `n` (enumerate-all mode only).
    /// Called exactly once per completed search, after `save_result`.
    fn save_optimal_sets(&self, n: u32, sets: &[Vec<u64>]) -> Result<(), PersistError>;
}
