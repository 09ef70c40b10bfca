//! Bound kinds for interval endpoints, as consumed by [`crate::interval`].

use std::fmt;

/// Whether an interval endpoint includes or excludes the value at that
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// The endpoint value itself is excluded from the interval.
    Open,
    /// The endpoint value itself is included in the interval.
    Closed,
}

impl Bound {
    /// Flips `Open` to `Closed` and vice versa.
    ///
    /// Used when splitting an interval at one of its own endpoints: the
    /// residual that keeps the split point gets the original bound kind,
    /// the residual on the other side gets the complement.
    pub fn complement(self) -> Bound {
        match self {
            Bound::Open => Bound::Closed,
            Bound::Closed => Bound::Open,
        }
    }

    /// `true` for `Closed`, the "more inclusive" of the two kinds.
    pub fn is_closed(self) -> bool {
        matches!(self, Bound::Closed)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Open => write!(f, "open"),
            Bound::Closed => write!(f, "closed"),
        }
    }
}
