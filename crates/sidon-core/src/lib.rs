//! Primitive data structures for finding Sidon sets (also called B1 sets):
//! sequences of distinct positive integers in which every subset has a
//! distinct sum.
//!
//! This crate has no notion of search, pruning, or a "best" set — it only
//! tracks an element sequence and answers "would adding this value break
//! the Sidon property" in one of two ways (see [`ManagerKind`]). The search
//! itself lives one layer up, in `sidon-engine`.

pub mod error;
pub mod history;
pub mod manager;
pub mod sumset;

pub use error::ManagerError;
pub use history::{Frame, RollbackHistory};
pub use manager::{ManagerKind, SumManager, ITERATIVE_MAX_ELEMENTS};
pub use sumset::SumSet;
