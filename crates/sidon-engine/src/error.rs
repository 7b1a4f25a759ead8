//! Error types for configuring and running a [`crate::search::Search`].

use sidon_core::ManagerError;

/// Errors raised while validating a [`crate::config::SearchConfig`] or while
/// running the search it describes.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// `n == 0` was requested together with enumerate-all mode, which has
    /// no meaningful "every optimal set" answer.
    #[error("enumerate-all mode requires n >= 1, got n = 0")]
    EmptyEnumeration,

    /// Iterative-mode collision detection was requested for a search whose
    /// element count can exceed the manager's 62-element bitmask ceiling,
    /// without the caller explicitly acknowledging the risk.
    #[error("iterative mode requested for n = {n}, which can exceed the 62-element bitmask ceiling; pass acknowledge_iterative_limit to proceed")]
    IterativeLimitUnacknowledged { n: u32 },

    /// The manager reported a usage error partway through the search (the
    /// element count outgrew iterative mode's bitmask ceiling).
    #[error("manager error during search: {0}")]
    Manager(#[from] ManagerError),
}
