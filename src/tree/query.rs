//! Range search and ordered iteration with value coalescing.

use super::{NodeId, Tree, NIL};
use crate::interval::{Atomic, Interval, IntervalSet};

impl<T, V> Tree<T, V>
where
    T: Ord + Copy,
    V: Clone + PartialEq,
{
    /// Every `(x.key ∩ query, x.value)` such that `x.key` overlaps `query`,
    /// in ascending order.
    ///
    /// # Arguments
    /// * `query` - The range to intersect against. Empty input or a range
    ///   overlapping nothing yields an empty result, never an error.
    ///
    /// # Returns
    /// The non-empty intersections, paired with each overlapping node's
    /// value, ordered by lower endpoint.
    ///
    /// # Example
    /// ```
    /// use interval_rb_tree::{Interval, Tree};
    /// let mut tree = Tree::new();
    /// tree.insert_interval(Interval::closed(0, 5), "a");
    /// tree.insert_interval(Interval::closed(10, 15), "b");
    /// assert_eq!(
    ///     tree.search(Interval::closed(3, 12)),
    ///     vec![(Interval::closed(3, 5), "a"), (Interval::closed(10, 12), "b")]
    /// );
    /// ```
    pub fn search(&self, query: Interval<T>) -> Vec<(Interval<T>, V)> {
        let query = match query {
            Interval::Empty => return Vec::new(),
            Interval::Atomic(a) => a,
        };

        let mut results = Vec::new();
        let Some(mut cur) = self.leftmost_overlapping(self.root, &query) else {
            return results;
        };
        loop {
            let node_key = self.arena[cur].key.as_atomic().to_owned();
            if !node_key.overlaps(&query) {
                break;
            }
            if let Interval::Atomic(piece) = node_key.intersection(&query) {
                results.push((
                    Interval::Atomic(piece),
                    self.arena[cur].value.clone().expect("in-order node carries a value"),
                ));
            }
            let next = self.successor_idx(cur);
            if next == NIL {
                break;
            }
            cur = next;
        }
        results
    }

    fn leftmost_overlapping(&self, node: NodeId, query: &Atomic<T>) -> Option<NodeId> {
        if node == NIL {
            return None;
        }
        if let Interval::Atomic(enclosure) = self.enclosure(node) {
            if !enclosure.overlaps(query) {
                return None;
            }
        }
        if let Some(found) = self.leftmost_overlapping(self.arena[node].left, query) {
            return Some(found);
        }
        let node_key = self.arena[node].key.as_atomic().to_owned();
        if node_key.overlaps(query) {
            return Some(node);
        }
        self.leftmost_overlapping(self.arena[node].right, query)
    }

    fn in_order_pairs(&self) -> Vec<(Atomic<T>, V)> {
        let mut out = Vec::with_capacity(self.size());
        self.in_order_collect(self.root, &mut out);
        out
    }

    fn in_order_collect(&self, node: NodeId, out: &mut Vec<(Atomic<T>, V)>) {
        if node == NIL {
            return;
        }
        self.in_order_collect(self.arena[node].left, out);
        out.push((
            self.arena[node].key.as_atomic().to_owned(),
            self.arena[node].value.clone().expect("in-order node carries a value"),
        ));
        self.in_order_collect(self.arena[node].right, out);
    }

    /// The logical key→value mapping, with every set of nodes sharing a
    /// value coalesced into one `(union, value)` pair. Unlike the tree's
    /// own keys, these unions may be non-contiguous — that scattering is a
    /// property of this view, not a tree invariant. Pairs are ordered by the lower
    /// endpoint of their union.
    ///
    /// # Returns
    /// One `(IntervalSet, value)` pair per distinct value stored, ordered
    /// by the lower endpoint of the resulting union.
    ///
    /// # Example
    /// ```
    /// use interval_rb_tree::{Interval, Tree};
    /// let mut tree = Tree::new();
    /// tree.insert_interval(Interval::closed(0, 2), "a");
    /// tree.insert_interval(Interval::closed(10, 12), "a");
    /// tree.insert_interval(Interval::closed(5, 6), "b");
    /// let items = tree.items();
    /// assert_eq!(items.len(), 2);
    /// assert_eq!(items[0].1, "a");
    /// assert_eq!(items[1].1, "b");
    /// ```
    pub fn items(&self) -> Vec<(IntervalSet<T>, V)> {
        let mut by_value: Vec<(V, Vec<Atomic<T>>)> = Vec::new();
        for (key, value) in self.in_order_pairs() {
            match by_value.iter_mut().find(|(v, _)| *v == value) {
                Some(entry) => entry.1.push(key),
                None => by_value.push((value, vec![key])),
            }
        }

        let mut coalesced: Vec<(IntervalSet<T>, V)> = by_value
            .into_iter()
            .map(|(value, atomics)| (IntervalSet::from_atomics(atomics), value))
            .collect();
        coalesced.sort_by_key(|(set, _)| set.atomics().first().map(|a| a.lower));
        coalesced
    }

    /// The key half of [`Tree::items`], in the same order.
    ///
    /// # Example
    /// ```
    /// use interval_rb_tree::{Interval, Tree};
    /// let mut tree = Tree::new();
    /// tree.insert_interval(Interval::closed(0, 2), "a");
    /// assert_eq!(tree.keys().len(), 1);
    /// ```
    pub fn keys(&self) -> Vec<IntervalSet<T>> {
        self.items().into_iter().map(|(k, _)| k).collect()
    }

    /// The value half of [`Tree::items`], in the same order.
    ///
    /// # Example
    /// ```
    /// use interval_rb_tree::{Interval, Tree};
    /// let mut tree = Tree::new();
    /// tree.insert_interval(Interval::closed(0, 2), "a");
    /// assert_eq!(tree.values(), vec!["a"]);
    /// ```
    pub fn values(&self) -> Vec<V> {
        self.items().into_iter().map(|(_, v)| v).collect()
    }

    /// The union of every key mapped to `value`, or the empty set if none.
    ///
    /// # Arguments
    /// * `value` - The payload to look up.
    ///
    /// # Returns
    /// An [`IntervalSet`] that is empty when `value` is not stored.
    ///
    /// # Example
    /// ```
    /// use interval_rb_tree::{Interval, Tree};
    /// let mut tree = Tree::new();
    /// tree.insert_interval(Interval::closed(0, 2), "a");
    /// assert!(!tree.find(&"a").is_empty());
    /// assert!(tree.find(&"z").is_empty());
    /// ```
    pub fn find(&self, value: &V) -> IntervalSet<T> {
        let atomics = self
            .in_order_pairs()
            .into_iter()
            .filter(|(_, v)| v == value)
            .map(|(k, _)| k)
            .collect();
        IntervalSet::from_atomics(atomics)
    }
}
