//! Persistence errors.

/// Errors raised by a [`crate::ResultStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The underlying SQLite connection or statement failed.
    #[error("sqlite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },
}
