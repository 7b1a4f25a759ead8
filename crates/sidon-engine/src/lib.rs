//! Branch-and-bound search for minimal-max Sidon sets.
//!
//! Drives a [`sidon_core::SumManager`] through a depth-first search with
//! dynamic upper-bound pruning. The search owns its manager exclusively for
//! the lifetime of one [`search::Search::run`] call; it never shares mutable
//! state with anything else.

pub mod callbacks;
pub mod config;
pub mod control;
pub mod error;
pub mod search;

pub use callbacks::{Logger, NullLogger, ProgressCallback, SolutionCallback, Stats, TracingLogger};
pub use config::{ProgressInterval, SearchConfig, SearchMode};
pub use control::SearchControl;
pub use error::SearchError;
pub use search::{Search, SearchResult, Status};
