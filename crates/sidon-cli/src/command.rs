//! Command-line argument parsing for the `sidon` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

const DEFAULT_DB_PATH: &str = "sidon.db";

/// Search for minimal-max Sidon (B1) sets.
#[derive(Debug, Parser)]
#[command(name = "sidon", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve for a single set size.
    Solve {
        /// Target set size.
        n: u32,

        /// Override the default starting bound (2^(n-1) + 1). Smaller values
        /// prune harder but can rule out the true optimum if set too low.
        #[arg(long)]
        bound: Option<u64>,

        /// Enumerate every optimal set instead of stopping at the first one
        /// found.
        #[arg(long)]
        enumerate_all: bool,

        /// Use the iterative (memory-free) collision check instead of the
        /// fast hash-set-backed one.
        #[arg(long)]
        iterative: bool,

        /// Stop unwinding as soon as any solution is found, without trying
        /// to tighten the bound further. Has no effect with `--enumerate-all`.
        #[arg(long)]
        early_exit: bool,

        /// Path to the SQLite result store.
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db_path: PathBuf,
    },
    /// Solve a range of set sizes, farmed across a worker pool.
    Batch {
        /// Smallest set size to solve (inclusive).
        from: u32,
        /// Largest set size to solve (inclusive).
        to: u32,
        /// Number of concurrent searches to run.
        #[arg(long, default_value_t = 1)]
        threads: usize,
        /// Path to the SQLite result store.
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db_path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_solve_with_defaults() {
        let cli = Cli::parse_from(["sidon", "solve", "5"]);
        match cli.command {
            Command::Solve {
                n,
                bound,
                enumerate_all,
                iterative,
                early_exit,
                db_path,
            } => {
                assert_eq!(n, 5);
                assert_eq!(bound, None);
                assert!(!enumerate_all);
                assert!(!iterative);
                assert!(!early_exit);
                assert_eq!(db_path, PathBuf::from(DEFAULT_DB_PATH));
            }
            other => panic!("expected Solve, got {other:?}"),
        }
    }

    #[test]
    fn parses_solve_with_all_flags() {
        let cli = Cli::parse_from([
            "sidon",
            "solve",
            "7",
            "--bound",
            "50",
            "--enumerate-all",
            "--iterative",
            "--early-exit",
            "--db-path",
            "/tmp/custom.db",
        ]);
        match cli.command {
            Command::Solve {
                n,
                bound,
                enumerate_all,
                iterative,
                early_exit,
                db_path,
            } => {
                assert_eq!(n, 7);
                assert_eq!(bound, Some(50));
                assert!(enumerate_all);
                assert!(iterative);
                assert!(early_exit);
                assert_eq!(db_path, PathBuf::from("/tmp/custom.db"));
            }
            other => panic!("expected Solve, got {other:?}"),
        }
    }

    #[test]
    fn parses_batch() {
        let cli = Cli::parse_from(["sidon", "batch", "1", "20", "--threads", "4"]);
        match cli.command {
            Command::Batch {
                from,
                to,
                threads,
                db_path,
            } => {
                assert_eq!(from, 1);
                assert_eq!(to, 20);
                assert_eq!(threads, 4);
                assert_eq!(db_path, PathBuf::from(DEFAULT_DB_PATH));
            }
            other => panic!("expected Batch, got {other:?}"),
        }
    }
}
