//! Depth-first branch-and-bound search for a minimal-max Sidon set of a
//! given size.

use std::time::{Duration, Instant, SystemTime};

use sidon_core::{ManagerKind, SumManager};

use crate::callbacks::{Logger, NullLogger, ProgressCallback, SolutionCallback, Stats};
use crate::config::{SearchConfig, SearchMode};
use crate::control::SearchControl;
use crate::error::SearchError;

/// How a completed search fared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// `set` (and, in enumerate-all mode, every set in `all_optimal_sets`)
    /// is a minimal-max Sidon set of the requested size.
    Optimal,
    /// Cancelled via the stop flag before completing; `set` is empty.
    Interrupted,
    /// The search space was exhausted (within the given bound) without
    /// finding any valid set; `set` is empty.
    NoSolution,
}

/// The outcome of a [`Search::run`] call.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub n: u32,
    /// `0` unless `status == Optimal`.
    pub max_value: u64,
    /// Empty unless `status == Optimal`.
    pub set: Vec<u64>,
    /// Every set achieving `max_value`, if the search ran in enumerate-all
    /// mode. Empty in first-improvement mode (it doesn't prove anything
    /// about ties) or when there is no solution.
    pub all_optimal_sets: Vec<Vec<u64>>,
    pub elapsed: Duration,
    pub status: Status,
    pub nodes_explored: u64,
    pub timestamp: SystemTime,
}

/// A single branch-and-bound search run. Cheap to build; all the mutable
/// search state lives in the (single) call to [`Search::run`].
pub struct Search {
    config: SearchConfig,
    control: SearchControl,
    logger: Box<dyn Logger>,
}

impl Search {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        validate(&config)?;
        Ok(Search {
            config,
            control: SearchControl::unbounded(),
            logger: Box::new(NullLogger),
        })
    }

    pub fn with_control(mut self, control: SearchControl) -> Self {
        self.control = control;
        self
    }

    pub fn with_logger(mut self, logger: Box<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn control(&self) -> &SearchControl {
        &self.control
    }

    /// Runs the search to completion (or interruption), invoking the given
    /// callbacks along the way. Either callback may be `None`.
    pub fn run(
        &self,
        mut on_solution: Option<&mut SolutionCallback>,
        mut on_progress: Option<&mut ProgressCallback>,
    ) -> Result<SearchResult, SearchError> {
        let start = Instant::now();
        let n = self.config.n as usize;

        if n == 0 {
            return Ok(self.trivial_result(start, 0, Vec::new()));
        }
        if n == 1 {
            let set = vec![1u64];
            if let Some(cb) = on_solution.as_deref_mut() {
                cb(&set);
            }
            return Ok(SearchResult {
                n: self.config.n,
                max_value: 1,
                set: set.clone(),
                all_optimal_sets: vec![set],
                elapsed: start.elapsed(),
                status: Status::Optimal,
                nodes_explored: 0,
                timestamp: SystemTime::now(),
            });
        }

        let mut runner = Runner {
            config: &self.config,
            control: &self.control,
            logger: self.logger.as_ref(),
            manager: SumManager::new(self.config.manager_kind),
            stats: Stats::new(),
            best_max: self.config.starting_bound(),
            has_solution: false,
            best_set: Vec::new(),
            optimal: Vec::new(),
            interrupted: false,
            on_solution: on_solution.as_deref_mut(),
            on_progress: on_progress.as_deref_mut(),
        };

        runner.expand(0, 1)?;
        self.logger
            .search_completed(runner.stats.nodes_explored, runner.stats.solutions_found);

        let status = if runner.interrupted {
            Status::Interrupted
        } else if runner.has_solution {
            Status::Optimal
        } else {
            Status::NoSolution
        };

        let (max_value, set, all_optimal_sets) = match status {
            Status::Optimal => (runner.best_max, runner.best_set, runner.optimal),
            _ => (0, Vec::new(), Vec::new()),
        };

        Ok(SearchResult {
            n: self.config.n,
            max_value,
            set,
            all_optimal_sets,
            elapsed: start.elapsed(),
            status,
            nodes_explored: runner.stats.nodes_explored,
            timestamp: SystemTime::now(),
        })
    }

    /// Convenience wrapper that forces enumerate-all mode and splits the
    /// result into the representative result record and the full list of
    /// optimal sets, matching the `run_all` entry of the manager contract.
    pub fn run_all(
        config: SearchConfig,
        on_solution: Option<&mut SolutionCallback>,
        on_progress: Option<&mut ProgressCallback>,
    ) -> Result<(SearchResult, Vec<Vec<u64>>), SearchError> {
        let config = SearchConfig {
            mode: SearchMode::EnumerateAll,
            ..config
        };
        let search = Search::new(config)?;
        let result = search.run(on_solution, on_progress)?;
        let all = result.all_optimal_sets.clone();
        Ok((result, all))
    }

    fn trivial_result(&self, start: Instant, max_value: u64, set: Vec<u64>) -> SearchResult {
        SearchResult {
            n: self.config.n,
            max_value,
            all_optimal_sets: if set.is_empty() { Vec::new() } else { vec![set.clone()] },
            set,
            elapsed: start.elapsed(),
            status: Status::Optimal,
            nodes_explored: 0,
            timestamp: SystemTime::now(),
        }
    }
}

fn validate(config: &SearchConfig) -> Result<(), SearchError> {
    if config.n == 0 && config.mode == SearchMode::EnumerateAll {
        return Err(SearchError::EmptyEnumeration);
    }
    if config.manager_kind == ManagerKind::Iterative
        && config.n > sidon_core::ITERATIVE_MAX_ELEMENTS as u32
        && !config.acknowledge_iterative_limit
    {
        return Err(SearchError::IterativeLimitUnacknowledged { n: config.n });
    }
    Ok(())
}

/// Mutable state threaded through one `run` call's recursion. Split out of
/// `Search` so `run` can hold borrows of the caller's callbacks without
/// fighting the borrow checker over `&self`.
struct Runner<'a> {
    config: &'a SearchConfig,
    control: &'a SearchControl,
    logger: &'a dyn Logger,
    manager: SumManager,
    stats: Stats,
    best_max: u64,
    has_solution: bool,
    best_set: Vec<u64>,
    optimal: Vec<Vec<u64>>,
    interrupted: bool,
    on_solution: Option<&'a mut SolutionCallback<'a>>,
    on_progress: Option<&'a mut ProgressCallback<'a>>,
}

impl<'a> Runner<'a> {
    fn expand(&mut self, depth: usize, min_next: u64) -> Result<(), SearchError> {
        if self.control.should_stop() {
            self.interrupted = true;
            return Ok(());
        }

        self.stats.nodes_explored += 1;
        self.stats.current_depth = depth;
        if self.config.progress_interval.should_fire(self.stats.nodes_explored) {
            self.stats.last_log_time = Instant::now();
            if let Some(cb) = self.on_progress.as_deref_mut() {
                cb(&self.stats);
            }
        }

        let n = self.config.n as usize;

        if depth == n {
            let mut snapshot = Vec::with_capacity(n);
            self.manager.snapshot(&mut snapshot);
            let current_max = *snapshot.last().expect("depth == n implies a non-empty set");

            match self.config.mode {
                SearchMode::FirstImprovement => {
                    if current_max < self.best_max {
                        self.logger.bound_improved(
                            self.has_solution.then_some(self.best_max),
                            current_max,
                        );
                        self.best_max = current_max;
                        self.has_solution = true;
                        self.stats.best_max = Some(current_max);
                        self.stats.solutions_found += 1;
                        self.best_set = snapshot.clone();
                        if let Some(cb) = self.on_solution.as_deref_mut() {
                            cb(&snapshot);
                        }
                    }
                }
                SearchMode::EnumerateAll => {
                    if !self.has_solution || current_max < self.best_max {
                        self.logger.bound_improved(
                            self.has_solution.then_some(self.best_max),
                            current_max,
                        );
                        self.best_max = current_max;
                        self.has_solution = true;
                        self.stats.best_max = Some(current_max);
                        self.optimal.clear();
                        self.optimal.push(snapshot.clone());
                        self.best_set = snapshot.clone();
                        self.stats.solutions_found += 1;
                        if let Some(cb) = self.on_solution.as_deref_mut() {
                            cb(&snapshot);
                        }
                    } else if current_max == self.best_max {
                        self.optimal.push(snapshot.clone());
                        self.stats.solutions_found += 1;
                        if let Some(cb) = self.on_solution.as_deref_mut() {
                            cb(&snapshot);
                        }
                    }
                }
            }
            return Ok(());
        }

        let remaining = (n - depth - 1) as u64;

        if self.has_solution && min_next + remaining >= self.best_max {
            return Ok(());
        }

        let mut candidate = min_next;
        loop {
            if self.control.should_stop() {
                self.interrupted = true;
                return Ok(());
            }

            let ceiling = if self.has_solution {
                self.best_max
            } else {
                self.config.starting_bound()
            };
            if candidate >= ceiling {
                break;
            }

            if self.has_solution && candidate + remaining >= self.best_max {
                break;
            }

            if self.manager.try_push(candidate)? {
                self.expand(depth + 1, candidate + 1)?;
                self.manager.pop();
                if self.interrupted {
                    return Ok(());
                }
                if self.config.early_exit() && self.has_solution {
                    return Ok(());
                }
            }

            candidate += 1;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration as StdDuration;

    fn is_sidon(set: &[u64]) -> bool {
        use std::collections::HashSet;
        let mut sums = HashSet::new();
        let n = set.len();
        for mask in 1u32..(1 << n) {
            let mut sum = 0u64;
            for i in 0..n {
                if mask & (1 << i) != 0 {
                    sum += set[i];
                }
            }
            if !sums.insert(sum) {
                return false;
            }
        }
        true
    }

    #[test]
    fn n_equals_1_is_trivial() {
        let search = Search::new(SearchConfig::new(1, SearchMode::FirstImprovement)).unwrap();
        let result = search.run(None, None).unwrap();
        assert_eq!(result.status, Status::Optimal);
        assert_eq!(result.max_value, 1);
        assert_eq!(result.set, vec![1]);
        assert_eq!(result.nodes_explored, 0);
    }

    #[test]
    fn n_equals_2() {
        let search = Search::new(SearchConfig::new(2, SearchMode::FirstImprovement)).unwrap();
        let result = search.run(None, None).unwrap();
        assert_eq!(result.status, Status::Optimal);
        assert_eq!(result.max_value, 2);
        assert_eq!(result.set, vec![1, 2]);
    }

    #[test]
    fn n_equals_3() {
        let search = Search::new(SearchConfig::new(3, SearchMode::FirstImprovement)).unwrap();
        let result = search.run(None, None).unwrap();
        assert_eq!(result.status, Status::Optimal);
        assert_eq!(result.max_value, 4);
        assert_eq!(result.set, vec![1, 2, 4]);
    }

    #[test]
    fn n_equals_4() {
        let search = Search::new(SearchConfig::new(4, SearchMode::FirstImprovement)).unwrap();
        let result = search.run(None, None).unwrap();
        assert_eq!(result.status, Status::Optimal);
        assert_eq!(result.max_value, 8);
        assert_eq!(result.set, vec![1, 2, 4, 8]);
    }

    #[test]
    fn n_equals_5_enumerate_all_lists_every_optimum() {
        let search = Search::new(SearchConfig::new(5, SearchMode::EnumerateAll)).unwrap();
        let result = search.run(None, None).unwrap();
        assert_eq!(result.status, Status::Optimal);
        assert_eq!(result.max_value, 13);
        assert!(!result.all_optimal_sets.is_empty());
        for set in &result.all_optimal_sets {
            assert_eq!(set.len(), 5);
            assert_eq!(*set.last().unwrap(), 13);
            assert!(is_sidon(set), "{set:?} is not a Sidon set");
            assert!(set.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn interrupt_scenario_returns_empty_result() {
        let stop = Arc::new(AtomicBool::new(false));
        let control = SearchControl::new(stop.clone());
        let search = Search::new(SearchConfig::new(20, SearchMode::FirstImprovement))
            .unwrap()
            .with_control(control);

        let handle = thread::spawn(move || {
            thread::sleep(StdDuration::from_millis(1));
            stop.store(true, Ordering::Release);
        });

        let result = search.run(None, None).unwrap();
        handle.join().unwrap();

        assert_eq!(result.status, Status::Interrupted);
        assert!(result.set.is_empty());
        assert_eq!(result.max_value, 0);
    }

    #[test]
    fn empty_enumeration_is_rejected() {
        let err = Search::new(SearchConfig::new(0, SearchMode::EnumerateAll)).unwrap_err();
        assert!(matches!(err, SearchError::EmptyEnumeration));
    }

    #[test]
    fn unacknowledged_iterative_limit_is_rejected() {
        let mut config = SearchConfig::new(70, SearchMode::FirstImprovement);
        config.manager_kind = ManagerKind::Iterative;
        let err = Search::new(config).unwrap_err();
        assert!(matches!(
            err,
            SearchError::IterativeLimitUnacknowledged { n: 70 }
        ));
    }

    #[test]
    fn nodes_explored_is_nondecreasing_and_positive_for_n3() {
        let search = Search::new(SearchConfig::new(3, SearchMode::FirstImprovement)).unwrap();
        let result = search.run(None, None).unwrap();
        assert!(result.nodes_explored > 0);
    }
}
