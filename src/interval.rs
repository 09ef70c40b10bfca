//! Interval algebra.
//!
//! This is the "external collaborator" the augmented tree in [`crate::tree`]
//! is written against: an atomic interval with bound-aware overlap,
//! containment, union, intersection and difference, plus a small
//! [`IntervalSet`] used only at the view layer (`items`/`find`) to represent
//! the union of several atomics that share a value. The tree itself never
//! stores an `IntervalSet` as a key — only atomics.
//!
//! Kept deliberately small and hand-rolled rather than reaching for a
//! general-purpose interval-arithmetic crate: the type here is shaped
//! entirely by what the tree needs, not by general-purpose interval
//! arithmetic.

use std::cmp::Ordering;
use std::fmt;

use crate::bound::Bound;

type Endpoint<T> = (T, Bound);

fn lower_at_most<T: Ord>(a: Endpoint<T>, b: Endpoint<T>) -> bool {
    match a.0.cmp(&b.0) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => a.1.is_closed() || !b.1.is_closed(),
    }
}

fn upper_at_least<T: Ord>(a: Endpoint<T>, b: Endpoint<T>) -> bool {
    match a.0.cmp(&b.0) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => a.1.is_closed() || !b.1.is_closed(),
    }
}

/// True if `a`'s upper endpoint leaves no point in common with `b`'s lower
/// endpoint and nothing beyond it, i.e. `a` lies entirely at or before `b`
/// with at most a touching boundary.
fn before<T: Ord>(a_upper: Endpoint<T>, b_lower: Endpoint<T>) -> bool {
    match a_upper.0.cmp(&b_lower.0) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => !(a_upper.1.is_closed() && b_lower.1.is_closed()),
    }
}

fn min_lower<T: Ord + Copy>(a: Endpoint<T>, b: Endpoint<T>) -> Endpoint<T> {
    match a.0.cmp(&b.0) {
        Ordering::Less => a,
        Ordering::Greater => b,
        Ordering::Equal => (a.0, if a.1.is_closed() || b.1.is_closed() { Bound::Closed } else { Bound::Open }),
    }
}

fn max_upper<T: Ord + Copy>(a: Endpoint<T>, b: Endpoint<T>) -> Endpoint<T> {
    match a.0.cmp(&b.0) {
        Ordering::Greater => a,
        Ordering::Less => b,
        Ordering::Equal => (a.0, if a.1.is_closed() || b.1.is_closed() { Bound::Closed } else { Bound::Open }),
    }
}

fn max_lower<T: Ord + Copy>(a: Endpoint<T>, b: Endpoint<T>) -> Endpoint<T> {
    match a.0.cmp(&b.0) {
        Ordering::Greater => a,
        Ordering::Less => b,
        Ordering::Equal => (a.0, if !a.1.is_closed() || !b.1.is_closed() { Bound::Open } else { Bound::Closed }),
    }
}

fn min_upper<T: Ord + Copy>(a: Endpoint<T>, b: Endpoint<T>) -> Endpoint<T> {
    match a.0.cmp(&b.0) {
        Ordering::Less => a,
        Ordering::Greater => b,
        Ordering::Equal => (a.0, if !a.1.is_closed() || !b.1.is_closed() { Bound::Open } else { Bound::Closed }),
    }
}

/// A single contiguous, non-empty range with a bound kind on each endpoint.
///
/// `Atomic` is the tree's key type: every node stores exactly one of these.
/// Unions of atomics only ever appear at the view layer, as [`IntervalSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Atomic<T> {
    pub lower: T,
    pub left: Bound,
    pub upper: T,
    pub right: Bound,
}

/// The relation of an inserted key to an existing node's key, as used to
/// dispatch the seven cases of disjointness-restoring insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `self` lies entirely below `other` (no shared or touching point).
    Below,
    /// `self` lies entirely above `other`.
    Above,
    /// `self` and `other` are the same atomic.
    Equal,
    /// `other` is properly contained in `self`.
    Contains,
    /// `self` is properly contained in `other`.
    ContainedBy,
    /// `other` overlaps `self` and extends below it.
    OverlapBelow,
    /// `other` overlaps `self` and extends above it.
    OverlapAbove,
}

impl<T: Ord + Copy> Atomic<T> {
    fn lower_endpoint(&self) -> Endpoint<T> {
        (self.lower, self.left)
    }

    fn upper_endpoint(&self) -> Endpoint<T> {
        (self.upper, self.right)
    }

    /// `true` if this atomic denotes no points at all (e.g. `(5, 5)`).
    pub fn is_empty(&self) -> bool {
        match self.lower.cmp(&self.upper) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.left == Bound::Open || self.right == Bound::Open,
        }
    }

    /// `true` if `self` and `other` share at least one point.
    pub fn overlaps(&self, other: &Self) -> bool {
        !before(self.upper_endpoint(), other.lower_endpoint())
            && !before(other.upper_endpoint(), self.lower_endpoint())
    }

    /// `true` if `self` and `other` share no point but their union is a
    /// single contiguous atomic (e.g. `[1, 2)` and `[2, 3]`).
    pub fn touches(&self, other: &Self) -> bool {
        if self.overlaps(other) {
            return false;
        }
        if before(self.upper_endpoint(), other.lower_endpoint()) {
            self.upper == other.lower && (self.right.is_closed() || other.left.is_closed())
        } else {
            other.upper == self.lower && (other.right.is_closed() || self.left.is_closed())
        }
    }

    /// `overlaps || touches`: used wherever the tree must treat adjacency
    /// the same as overlap to keep the no-equal-value-adjacency rule from
    /// being silently violated by a sequence of non-overlapping same-value
    /// insertions. See DESIGN.md for the rationale.
    pub fn meets(&self, other: &Self) -> bool {
        self.overlaps(other) || self.touches(other)
    }

    /// `true` if `other` is fully contained in `self` (equal counts).
    pub fn contains(&self, other: &Self) -> bool {
        lower_at_most(self.lower_endpoint(), other.lower_endpoint())
            && upper_at_least(self.upper_endpoint(), other.upper_endpoint())
    }

    /// Classifies `other` (an inserted key) against `self` (an existing
    /// node's key) into one of the seven disjointness-restoring insertion
    /// cases above. `self` and `other` must each be non-empty.
    pub fn relation_to(&self, other: &Self) -> Relation {
        if self == other {
            return Relation::Equal;
        }
        if !self.meets(other) {
            return if before(self.upper_endpoint(), other.lower_endpoint()) {
                Relation::Below
            } else {
                Relation::Above
            };
        }
        if self.contains(other) {
            return Relation::Contains;
        }
        if other.contains(self) {
            return Relation::ContainedBy;
        }
        if lower_at_most(other.lower_endpoint(), self.lower_endpoint()) {
            Relation::OverlapBelow
        } else {
            Relation::OverlapAbove
        }
    }

    /// Ordering used for plain BST placement: `None` only when `self` and
    /// `other` actually overlap (share a point). Unlike `PartialOrd`/`meets`,
    /// touching atomics are given a definite order here — touching,
    /// different-value neighbors are a perfectly valid tree state (only
    /// touching *same*-value neighbors are forbidden), and the plain insert/delete
    /// machinery must still be able to place them.
    pub fn bst_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        if self.overlaps(other) {
            return None;
        }
        if before(self.upper_endpoint(), other.lower_endpoint()) {
            Some(Ordering::Less)
        } else {
            Some(Ordering::Greater)
        }
    }

    /// The smallest atomic spanning both `self` and `other`. Only
    /// meaningful when the two `meets` (overlap or touch); otherwise the
    /// "union" would not itself be atomic.
    pub fn union(&self, other: &Self) -> Self {
        let (lower, left) = min_lower(self.lower_endpoint(), other.lower_endpoint());
        let (upper, right) = max_upper(self.upper_endpoint(), other.upper_endpoint());
        Atomic { lower, left, upper, right }
    }

    /// The (possibly empty) intersection of `self` and `other`.
    pub fn intersection(&self, other: &Self) -> Interval<T> {
        let (lower, left) = max_lower(self.lower_endpoint(), other.lower_endpoint());
        let (upper, right) = min_upper(self.upper_endpoint(), other.upper_endpoint());
        let candidate = Atomic { lower, left, upper, right };
        if candidate.is_empty() {
            Interval::Empty
        } else {
            Interval::Atomic(candidate)
        }
    }

    /// `self \ other`, as at most two atomic residual pieces ordered
    /// (below-piece, above-piece).
    pub fn difference(&self, other: &Self) -> (Option<Self>, Option<Self>) {
        let below = if lower_at_most(self.lower_endpoint(), other.lower_endpoint())
            && self.lower_endpoint() != other.lower_endpoint()
        {
            let piece = Atomic {
                lower: self.lower,
                left: self.left,
                upper: other.lower,
                right: other.left.complement(),
            };
            (!piece.is_empty()).then_some(piece)
        } else {
            None
        };

        let above = if upper_at_least(self.upper_endpoint(), other.upper_endpoint())
            && self.upper_endpoint() != other.upper_endpoint()
        {
            let piece = Atomic {
                lower: other.upper,
                left: other.right.complement(),
                upper: self.upper,
                right: self.right,
            };
            (!piece.is_empty()).then_some(piece)
        } else {
            None
        };

        (below, above)
    }
}

impl<T: Ord + Copy> PartialOrd for Atomic<T> {
    /// Ordering is only defined between genuinely disjoint atomics, as
    /// required by the tree's BST ordering. Overlapping or touching atomics compare as
    /// incomparable (`None`) rather than picking an arbitrary order.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            return Some(Ordering::Equal);
        }
        if self.meets(other) {
            return None;
        }
        if before(self.upper_endpoint(), other.lower_endpoint()) {
            Some(Ordering::Less)
        } else {
            Some(Ordering::Greater)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Atomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let left = if self.left == Bound::Closed { '[' } else { '(' };
        let right = if self.right == Bound::Closed { ']' } else { ')' };
        write!(f, "{left}{}, {}{right}", self.lower, self.upper)
    }
}

/// Either the empty interval or a single atomic. This is the node-key type
/// of the tree: every real node stores `Interval::Atomic`, the sentinel
/// stores `Interval::Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval<T> {
    Empty,
    Atomic(Atomic<T>),
}

impl<T: Ord + Copy> Interval<T> {
    pub fn closed(lower: T, upper: T) -> Self {
        Self::bounded(Bound::Closed, lower, upper, Bound::Closed)
    }

    pub fn open(lower: T, upper: T) -> Self {
        Self::bounded(Bound::Open, lower, upper, Bound::Open)
    }

    pub fn open_closed(lower: T, upper: T) -> Self {
        Self::bounded(Bound::Open, lower, upper, Bound::Closed)
    }

    pub fn closed_open(lower: T, upper: T) -> Self {
        Self::bounded(Bound::Closed, lower, upper, Bound::Open)
    }

    pub fn singleton(value: T) -> Self {
        Self::closed(value, value)
    }

    pub fn bounded(left: Bound, lower: T, upper: T, right: Bound) -> Self {
        let atomic = Atomic { lower, left, upper, right };
        if atomic.is_empty() {
            Interval::Empty
        } else {
            Interval::Atomic(atomic)
        }
    }

    pub fn empty() -> Self {
        Interval::Empty
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Interval::Empty)
    }

    /// Unwraps the atomic payload.
    ///
    /// # Panics
    /// Panics if `self` is `Interval::Empty`. Call sites in the tree only
    /// ever call this on keys known to be non-empty by construction.
    pub fn as_atomic(&self) -> &Atomic<T> {
        match self {
            Interval::Atomic(a) => a,
            Interval::Empty => panic!("as_atomic called on an empty interval"),
        }
    }

    pub fn lower(&self) -> T {
        self.as_atomic().lower
    }

    pub fn upper(&self) -> T {
        self.as_atomic().upper
    }

    pub fn left_bound(&self) -> Bound {
        self.as_atomic().left
    }

    pub fn right_bound(&self) -> Bound {
        self.as_atomic().right
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Empty => write!(f, "()"),
            Interval::Atomic(a) => a.fmt(f),
        }
    }
}

/// A normalized, sorted set of pairwise-disjoint, non-touching atomics.
///
/// Returned by [`crate::tree::Tree::items`] and [`crate::tree::Tree::find`]
/// to represent "the union of everything mapped to this value", which may
/// legitimately be scattered across several non-adjacent atomics — that
/// scattering is a property of the view, not of the tree's own disjointness
/// invariant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntervalSet<T> {
    atomics: Vec<Atomic<T>>,
}

impl<T: Ord + Copy> IntervalSet<T> {
    pub fn new() -> Self {
        IntervalSet { atomics: Vec::new() }
    }

    /// Builds a normalized set from an arbitrary (possibly overlapping,
    /// possibly unsorted) collection of atomics, merging any that touch or
    /// overlap.
    pub fn from_atomics(mut atomics: Vec<Atomic<T>>) -> Self {
        atomics.sort_by(|a, b| a.lower.cmp(&b.lower).then(a.upper.cmp(&b.upper)));
        let mut merged: Vec<Atomic<T>> = Vec::with_capacity(atomics.len());
        for next in atomics {
            match merged.last_mut() {
                Some(last) if last.meets(&next) => *last = last.union(&next),
                _ => merged.push(next),
            }
        }
        IntervalSet { atomics: merged }
    }

    pub fn is_empty(&self) -> bool {
        self.atomics.is_empty()
    }

    /// The component atomics, in ascending, disjoint, non-touching order.
    pub fn atomics(&self) -> &[Atomic<T>] {
        &self.atomics
    }

    /// The union of all component atomics as a single [`Interval`]. Only
    /// meaningful (as a lossless representation) when there is at most one
    /// component; callers that need the full set should use
    /// [`IntervalSet::atomics`] instead.
    pub fn into_interval(mut self) -> Interval<T> {
        if self.atomics.is_empty() {
            Interval::Empty
        } else {
            Interval::Atomic(self.atomics.remove(0))
        }
    }
}
