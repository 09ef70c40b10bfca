//! Range deletion: `delete_interval`.

use std::cmp::Ordering;

use super::{NodeId, Tree, NIL};
use crate::interval::{Atomic, Interval};

impl<T, V> Tree<T, V>
where
    T: Ord + Copy,
    V: Clone + PartialEq,
{
    /// Removes every point of `key` from the partition. A no-op if `key` is
    /// empty or overlaps nothing currently stored.
    ///
    /// # Arguments
    /// * `key` - The range to remove. May overlap, touch, contain, or be
    ///   contained by any number of keys already in the tree.
    ///
    /// # Example
    /// ```
    /// use interval_rb_tree::{Interval, Tree};
    /// let mut tree = Tree::new();
    /// tree.insert_interval(Interval::closed(0, 10), "a");
    /// tree.delete_interval(Interval::closed(4, 6));
    /// assert_eq!(
    ///     tree.search(Interval::closed(0, 10)),
    ///     vec![
    ///         (Interval::closed_open(0, 4), "a"),
    ///         (Interval::open_closed(6, 10), "a"),
    ///     ]
    /// );
    /// ```
    pub fn delete_interval(&mut self, key: Interval<T>) {
        let key = match key {
            Interval::Empty => return,
            Interval::Atomic(a) => a,
        };

        let mut x = self.root;
        loop {
            if x == NIL {
                return; // nothing overlaps key
            }
            let x_key = self.arena[x].key.as_atomic().to_owned();
            if x_key.overlaps(&key) {
                self.delete_from(x, &key, &x_key);
                return;
            }
            x = match x_key.bst_cmp(&key) {
                Some(Ordering::Less) => self.arena[x].right,
                Some(Ordering::Greater) => self.arena[x].left,
                _ => unreachable!("bst_cmp returns None only on overlap, already excluded"),
            };
        }
    }

    fn delete_from(&mut self, x: NodeId, key: &Atomic<T>, x_key: &Atomic<T>) {
        if x_key.contains(key) && x_key != key {
            // key lies strictly inside x's key: no other node can be
            // affected (every other node is disjoint from x_key, hence
            // from key too), so this is a pure local truncation.
            let (below, above) = x_key.difference(key);
            match (below, above) {
                (Some(b), Some(a)) => {
                    let v = self.arena[x].value.clone().expect("live node");
                    self.arena[x].key = Interval::Atomic(b);
                    self.plain_insert(Interval::Atomic(a), v);
                }
                (Some(b), None) => self.arena[x].key = Interval::Atomic(b),
                (None, Some(a)) => self.arena[x].key = Interval::Atomic(a),
                (None, None) => unreachable!("strict containment must leave a residual"),
            }
            return;
        }

        let mut unsafe_nodes = Vec::new();
        let mut unsafe_subtree_roots = Vec::new();
        let mut cuts = Vec::new();
        self.locate_delete(x, key, &mut unsafe_nodes, &mut unsafe_subtree_roots, &mut cuts);

        for (id, truncated) in cuts {
            self.arena[id].key = Interval::Atomic(truncated);
        }

        let mut flattened = Vec::new();
        for root in unsafe_subtree_roots {
            self.flatten_into(root, &mut flattened);
        }
        for id in unsafe_nodes.into_iter().chain(flattened) {
            self.plain_delete_node(id);
        }
    }

    /// Classifies every node reachable from `node` against `key`, the range
    /// being removed. Unlike subtree reconciliation there is no "extend"
    /// category and pruning uses plain `overlaps` rather than `meets`: a
    /// node merely touching `key` shares no point with it and is left
    /// entirely alone.
    fn locate_delete(
        &self,
        node: NodeId,
        key: &Atomic<T>,
        unsafe_nodes: &mut Vec<NodeId>,
        unsafe_subtree_roots: &mut Vec<NodeId>,
        cuts: &mut Vec<(NodeId, Atomic<T>)>,
    ) {
        if node == NIL {
            return;
        }

        if let Interval::Atomic(enclosure) = self.enclosure(node) {
            if !enclosure.overlaps(key) {
                return; // safe subtree: nothing here shares a point with key
            }
            if key.contains(&enclosure) {
                unsafe_subtree_roots.push(node);
                return; // unsafe subtree: wholly covered by key
            }
        }

        let node_key = self.arena[node].key.as_atomic().to_owned();
        if key.contains(&node_key) {
            unsafe_nodes.push(node);
        } else if node_key.overlaps(key) {
            let (below, above) = node_key.difference(key);
            let truncated = below
                .or(above)
                .expect("a node not fully covered by key leaves exactly one residual here");
            cuts.push((node, truncated));
        }
        // else: safe node (disjoint or merely touching) — no action, but
        // its children still need visiting.

        self.locate_delete(self.arena[node].left, key, unsafe_nodes, unsafe_subtree_roots, cuts);
        self.locate_delete(self.arena[node].right, key, unsafe_nodes, unsafe_subtree_roots, cuts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree<i32, char> {
        let mut t = Tree::new();
        for (k, v) in [
            (Interval::closed(16, 21), 'a'),
            (Interval::closed(9, 10), 'b'),
            (Interval::closed(28, 29), 'c'),
            (Interval::closed(4, 5), 'd'),
            (Interval::singleton(15), 'e'),
            (Interval::open_closed(21, 23), 'f'),
            (Interval::closed_open(30, 32), 'g'),
            (Interval::singleton(24), 'h'),
            (Interval::singleton(40), 'i'),
        ] {
            t.plain_insert(k, v);
        }
        t
    }

    #[test]
    fn scenario_s4_range_delete_truncates_both_neighbors() {
        let mut t = sample();
        t.delete_interval(Interval::closed(18, 22));

        let a = (0..t.arena.len()).find(|&id| id != NIL && t.arena[id].value == Some('a'));
        assert_eq!(a.map(|id| t.arena[id].key), Some(Interval::closed_open(16, 18)));

        let f = (0..t.arena.len()).find(|&id| id != NIL && t.arena[id].value == Some('f'));
        assert_eq!(f.map(|id| t.arena[id].key), Some(Interval::open_closed(22, 23)));
    }

    #[test]
    fn delete_interval_disjoint_from_everything_is_a_no_op() {
        let mut t = sample();
        let before = t.size();
        t.delete_interval(Interval::open(100, 200));
        assert_eq!(t.size(), before);
    }

    #[test]
    fn delete_interval_strictly_inside_a_key_splits_it() {
        let mut t: Tree<i32, char> = Tree::new();
        t.plain_insert(Interval::closed(0, 10), 'a');
        t.delete_interval(Interval::closed(4, 6));
        assert_eq!(t.size(), 2);
        let below = (0..t.arena.len()).find(|&id| {
            id != NIL && t.arena[id].value == Some('a') && t.arena[id].key == Interval::closed_open(0, 4)
        });
        let above = (0..t.arena.len()).find(|&id| {
            id != NIL && t.arena[id].value == Some('a') && t.arena[id].key == Interval::open_closed(6, 10)
        });
        assert!(below.is_some());
        assert!(above.is_some());
    }
}
