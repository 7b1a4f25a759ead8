//! Error types for the element manager.

/// Errors raised by [`crate::manager::SumManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ManagerError {
    /// Iterative-mode collision detection enumerates subsets with a 64-bit
    /// bitmask, which only covers sequences of at most 62 elements. Rather
    /// than silently under-checking past that bound (and missing real
    /// collisions), this is reported as a hard error.
    #[error("iterative mode supports at most 62 elements, found {count}")]
    TooManyElements {
        /// Number of elements already pushed when the call was made.
        count: usize,
    },
}
