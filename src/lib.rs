//! An interval-keyed ordered map backed by an augmented red-black tree.
//!
//! The keys of a [`tree::Tree`] are one-dimensional intervals over a
//! totally ordered domain, and they always form a disjoint partition of
//! whatever range has been populated: inserting a key that overlaps an
//! existing one splits, truncates, or fuses the surrounding keys so that
//! the non-overlap invariant never lapses. The tree itself is the entire
//! subject of this crate; a dict-like facade, persistence, concurrency,
//! and multi-dimensional intervals are all out of scope (see DESIGN.md).
//!
//! Layered bottom-up:
//! - [`bound`] / [`interval`]: the interval algebra the tree is written
//!   against — bound kinds, atomic intervals, and the small `IntervalSet`
//!   used at the view layer.
//! - [`tree`]: the augmented red-black tree itself.
//! - [`error`]: the tree's few failure modes.

pub mod bound;
pub mod error;
pub mod interval;
pub mod tree;

pub use bound::Bound;
pub use error::EmptyTreeError;
pub use interval::{Atomic, Interval, IntervalSet, Relation};
pub use tree::{NodeRef, Tree};
