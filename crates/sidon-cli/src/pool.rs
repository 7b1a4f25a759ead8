//! Worker pool that farms independent `n` values across threads for `batch`.
//!
//! Grounded on the teacher's `cesso_engine::search::pool::ThreadPool`, which
//! spawns scoped helper threads and joins them before returning — but unlike
//! Lazy SMP, these searches share no state at all beyond the persistence
//! handle (which serialises its own writes) and the stop flag: each worker
//! claims the next unclaimed `n` and builds its own `SumManager`/`Search`.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use sidon_engine::{Search, SearchConfig, SearchControl, SearchMode, SearchResult};
use sidon_persist::ResultStore;

use crate::error::CliError;

/// Runs a search for every `n` in `from..=to` not already solved, using up
/// to `threads` concurrent workers. Returns the result of every `n` that was
/// actually run, in no particular order (spec's "no ordering guaranteed
/// across searches").
pub fn run_batch<S: ResultStore + Sync>(
    from: u32,
    to: u32,
    threads: usize,
    mode: SearchMode,
    store: &S,
    control: &SearchControl,
) -> Result<Vec<SearchResult>, CliError> {
    if from > to {
        return Err(CliError::EmptyBatchRange { from, to });
    }

    let threads = threads.max(1);
    let next = AtomicU32::new(from);
    let results = Mutex::new(Vec::new());

    std::thread::scope(|scope| {
        for _ in 0..threads {
            let next = &next;
            let results = &results;
            let control = control.clone();
            scope.spawn(move || loop {
                if control.should_stop() {
                    return;
                }
                let n = next.fetch_add(1, Ordering::Relaxed);
                if n > to {
                    return;
                }
                match run_one(n, mode, store, &control) {
                    Ok(Some(result)) => results.lock().expect("results mutex poisoned").push(result),
                    Ok(None) => {}
                    Err(err) => tracing::warn!(n, %err, "batch search failed, skipping"),
                }
            });
        }
    });

    Ok(results.into_inner().expect("results mutex poisoned"))
}

fn run_one<S: ResultStore>(
    n: u32,
    mode: SearchMode,
    store: &S,
    control: &SearchControl,
) -> Result<Option<SearchResult>, CliError> {
    if store.has_optimal(n)? {
        tracing::debug!(n, "already solved, skipping");
        return Ok(None);
    }

    let mut config = SearchConfig::new(n, mode);
    if let Some(bound) = store.best_bound(n)? {
        config.initial_bound = Some(bound);
    }

    let search = Search::new(config)?.with_control(control.clone());
    tracing::info!(n, "search started");
    let result = search.run(None, None)?;
    tracing::info!(n, status = ?result.status, max_value = result.max_value, "search finished");

    store.save_result(&result)?;
    if mode == SearchMode::EnumerateAll && !result.all_optimal_sets.is_empty() {
        store.save_optimal_sets(n, &result.all_optimal_sets)?;
    }

    Ok(Some(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidon_persist::SqliteStore;

    #[test]
    fn runs_every_n_in_range_once() {
        let store = SqliteStore::open_in_memory().unwrap();
        let control = SearchControl::unbounded();
        let results = run_batch(1, 4, 2, SearchMode::FirstImprovement, &store, &control).unwrap();

        let mut ns: Vec<u32> = results.iter().map(|r| r.n).collect();
        ns.sort_unstable();
        assert_eq!(ns, vec![1, 2, 3, 4]);
        for n in 1..=4u32 {
            assert!(store.has_optimal(n).unwrap());
        }
    }

    #[test]
    fn skips_already_solved_sizes() {
        let store = SqliteStore::open_in_memory().unwrap();
        let control = SearchControl::unbounded();
        run_batch(1, 2, 1, SearchMode::FirstImprovement, &store, &control).unwrap();
        let second = run_batch(1, 2, 1, SearchMode::FirstImprovement, &store, &control).unwrap();
        assert!(second.is_empty(), "already-solved sizes should be skipped");
    }

    #[test]
    fn rejects_empty_range() {
        let store = SqliteStore::open_in_memory().unwrap();
        let control = SearchControl::unbounded();
        let err = run_batch(5, 1, 1, SearchMode::FirstImprovement, &store, &control).unwrap_err();
        assert!(matches!(err, CliError::EmptyBatchRange { from: 5, to: 1 }));
    }
}
