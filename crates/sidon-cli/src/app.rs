//! Wires parsed commands to `sidon-engine`/`sidon-persist`, the way the
//! teacher's `UciEngine` wires parsed UCI commands to `cesso-engine`.

use sidon_core::ManagerKind;
use sidon_engine::{Search, SearchConfig, SearchControl, SearchMode, SearchResult, Stats, TracingLogger};
use sidon_persist::{ResultStore, SqliteStore};

use crate::command::Command;
use crate::error::CliError;
use crate::pool::run_batch;

/// Runs the given parsed command to completion, logging along the way and
/// printing a human-readable summary to stdout.
pub fn dispatch(command: Command, control: SearchControl) -> Result<(), CliError> {
    match command {
        Command::Solve {
            n,
            bound,
            enumerate_all,
            iterative,
            early_exit,
            db_path,
        } => {
            let store = SqliteStore::open(&db_path)?;
            let result = run_solve(
                n,
                bound,
                enumerate_all,
                iterative,
                early_exit,
                &store,
                &control,
            )?;
            print_result(&result);
        }
        Command::Batch {
            from,
            to,
            threads,
            db_path,
        } => {
            let store = SqliteStore::open(&db_path)?;
            let results = run_batch(
                from,
                to,
                threads,
                SearchMode::FirstImprovement,
                &store,
                &control,
            )?;
            for result in &results {
                print_result(result);
            }
        }
    }
    Ok(())
}

/// Runs a single `solve` request, persisting the outcome before returning
/// it.
pub fn run_solve<S: ResultStore>(
    n: u32,
    bound: Option<u64>,
    enumerate_all: bool,
    iterative: bool,
    early_exit: bool,
    store: &S,
    control: &SearchControl,
) -> Result<SearchResult, CliError> {
    let mode = if enumerate_all {
        SearchMode::EnumerateAll
    } else {
        SearchMode::FirstImprovement
    };

    let mut config = SearchConfig::new(n, mode);
    config.manager_kind = if iterative {
        ManagerKind::Iterative
    } else {
        ManagerKind::Fast
    };
    // Requesting `--iterative` explicitly is the acknowledgement the config
    // requires before exceeding the manager's bitmask ceiling.
    config.acknowledge_iterative_limit = iterative;
    config.early_exit = early_exit;
    config.initial_bound = bound.or(store.best_bound(n)?);

    let search = Search::new(config)?
        .with_control(control.clone())
        .with_logger(Box::new(TracingLogger));

    let mut on_solution = |set: &[u64]| {
        tracing::info!(?set, max = set.last().copied().unwrap_or(0), "candidate solution");
    };
    let mut on_progress = |stats: &Stats| {
        tracing::debug!(
            nodes = stats.nodes_explored,
            depth = stats.current_depth,
            best_max = ?stats.best_max,
            "search progress"
        );
    };

    let result = search.run(Some(&mut on_solution), Some(&mut on_progress))?;

    store.save_result(&result)?;
    if mode == SearchMode::EnumerateAll && !result.all_optimal_sets.is_empty() {
        store.save_optimal_sets(n, &result.all_optimal_sets)?;
    }

    Ok(result)
}

fn print_result(result: &SearchResult) {
    println!(
        "n={} status={:?} max={} nodes={} elapsed={:?} set={:?}",
        result.n, result.status, result.max_value, result.nodes_explored, result.elapsed, result.set
    );
}
