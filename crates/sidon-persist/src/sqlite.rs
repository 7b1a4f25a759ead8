//! `rusqlite`-backed [`ResultStore`].

use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rusqlite::{params, Connection, OptionalExtension};
use sidon_engine::{SearchResult, Status};

use crate::error::PersistError;
use crate::store::ResultStore;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS results (
    n               INTEGER PRIMARY KEY,
    max_value       INTEGER NOT NULL,
    status          TEXT NOT NULL,
    nodes_explored  INTEGER NOT NULL,
    elapsed_ms      INTEGER NOT NULL,
    timestamp       INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS optimal_sets (
    n           INTEGER NOT NULL,
    set_index   INTEGER NOT NULL,
    position    INTEGER NOT NULL,
    element     INTEGER NOT NULL,
    UNIQUE(n, set_index, position)
);
";

/// A `results(n -> best set)` store backed by an on-disk or in-memory SQLite
/// database.
///
/// The connection is guarded by a mutex so one `SqliteStore` can be shared
/// across the worker pool's concurrent searches (spec's "persistence layer
/// serialises writes under its own lock"), rather than each search thread
/// needing its own handle.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (creating if absent) a database file at `path` and ensures the
    /// schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStore { conn: Mutex::new(conn) })
    }

    /// An in-memory database, for tests and scratch runs.
    pub fn open_in_memory() -> Result<Self, PersistError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStore { conn: Mutex::new(conn) })
    }

    fn status_str(status: Status) -> &'static str {
        match status {
            Status::Optimal => "optimal",
            Status::Interrupted => "interrupted",
            Status::NoSolution => "no_solution",
        }
    }
}

impl ResultStore for SqliteStore {
    fn has_optimal(&self, n: u32) -> Result<bool, PersistError> {
        let conn = self.conn.lock().expect("sqlite connection mutex poisoned");
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM results WHERE n = ?1 AND status = 'optimal'",
                params![n],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn best_bound(&self, n: u32) -> Result<Option<u64>, PersistError> {
        let conn = self.conn.lock().expect("sqlite connection mutex poisoned");
        let max_value: Option<i64> = conn
            .query_row(
                "SELECT max_value FROM results WHERE n = ?1 AND status = 'optimal'",
                params![n],
                |row| row.get(0),
            )
            .optional()?;
        Ok(max_value.map(|v| v as u64))
    }

    fn save_result(&self, result: &SearchResult) -> Result<(), PersistError> {
        let elapsed_ms = result.elapsed.as_millis() as i64;
        let timestamp = epoch_seconds(result.timestamp);
        let conn = self.conn.lock().expect("sqlite connection mutex poisoned");
        conn.execute(
            "INSERT INTO results (n, max_value, status, nodes_explored, elapsed_ms, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(n) DO UPDATE SET
                 max_value = excluded.max_value,
                 status = excluded.status,
                 nodes_explored = excluded.nodes_explored,
                 elapsed_ms = excluded.elapsed_ms,
                 timestamp = excluded.timestamp",
            params![
                result.n,
                result.max_value as i64,
                Self::status_str(result.status),
                result.nodes_explored as i64,
                elapsed_ms,
                timestamp,
            ],
        )?;
        Ok(())
    }

    fn save_optimal_sets(&self, n: u32, sets: &[Vec<u64>]) -> Result<(), PersistError> {
        let conn = self.conn.lock().expect("sqlite connection mutex poisoned");
        conn.execute("DELETE FROM optimal_sets WHERE n = ?1", params![n])?;
        for (set_index, set) in sets.iter().enumerate() {
            for (position, &element) in set.iter().enumerate() {
                conn.execute(
                    "INSERT INTO optimal_sets (n, set_index, position, element)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![n, set_index as i64, position as i64, element as i64],
                )?;
            }
        }
        Ok(())
    }
}

fn epoch_seconds(t: SystemTime) -> i64 {
    t.duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs() as i64
}
