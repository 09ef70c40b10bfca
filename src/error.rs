//! Error types for the tree's few failure modes.
//!
//! Almost nothing in this crate is fallible: empty-interval input is a
//! no-op, missing-value lookups return the empty interval, and range
//! queries over non-overlapping input return an empty result. The one
//! genuine programming error — asking an empty tree for its minimum or
//! maximum node — is represented here so call sites can fail loudly with a
//! named error rather than an opaque panic message.

/// Returned (and, at the public API boundary, unwrapped with `expect`) when
/// an operation that presupposes a non-empty tree is called on an empty one.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("operation requires a non-empty tree")]
pub struct EmptyTreeError;
