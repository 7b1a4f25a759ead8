//! CLI-level errors.

use sidon_engine::SearchError;
use sidon_persist::PersistError;

/// Errors surfaced by the `sidon` command-line front end.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A search configuration failed validation, or failed partway through.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// A read or write against the result store failed.
    #[error("persistence error: {0}")]
    Persist(#[from] PersistError),

    /// `batch`'s `from` is greater than its `to`.
    #[error("batch range is empty: from {from} is greater than to {to}")]
    EmptyBatchRange { from: u32, to: u32 },
}
