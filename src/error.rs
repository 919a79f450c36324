//! Errors returned by the forest and its wrappers.
//!
//! All failures are caller errors: the structure lives entirely in memory and
//! every operation is a deterministic computation, so nothing is ever retried.

use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Error)]
pub enum TreeError {
    /// A rank or index outside of `0..len` (or `0..=len` where splitting or
    /// inserting at the end is allowed).
    #[error("index {index} is out of range for a tree of size {len}")]
    OutOfRange { index: usize, len: usize },

    /// A segment whose bounds are reversed or exceed the tree.
    #[error("segment {start}..{end} is invalid for a tree of size {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// The key or position is absent.
    #[error("no matching element")]
    NotFound,

    /// The handle was freed, recycled, or consumed by an earlier split or merge.
    #[error("handle does not refer to a live tree root")]
    InvalidHandle,

    /// Two key-ordered trees were merged with overlapping keys.
    #[error("the left tree has keys greater than the right tree")]
    OutOfOrder,
}

pub type Result<T> = std::result::Result<T, TreeError>;

#[test]
fn error_messages() {
    let err = TreeError::OutOfRange { index: 7, len: 5 };
    assert_eq!(err.to_string(), "index 7 is out of range for a tree of size 5");
    let err = TreeError::InvalidRange {
        start: 3,
        end: 1,
        len: 5,
    };
    assert_eq!(err.to_string(), "segment 3..1 is invalid for a tree of size 5");
}
