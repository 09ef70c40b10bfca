//! Disjointness-restoring insertion: `insert_interval`.

use super::{NodeId, Tree, NIL};
use crate::interval::{Interval, Relation};

impl<T, V> Tree<T, V>
where
    T: Ord + Copy,
    V: Clone + PartialEq,
{
    /// Maps every point of `key` to `value`, overwriting whatever was there,
    /// restoring disjointness and fusing adjacent equal-value keys. A
    /// no-op if `key` is empty.
    ///
    /// # Arguments
    /// * `key` - The interval to map. May overlap, touch, contain, or be
    ///   contained by any number of keys already in the tree.
    /// * `value` - The payload every point of `key` should map to.
    ///
    /// # Example
    /// ```
    /// use interval_rb_tree::{Interval, Tree};
    /// let mut tree = Tree::new();
    /// tree.insert_interval(Interval::closed(0, 10), "a");
    /// tree.insert_interval(Interval::closed(4, 6), "b");
    /// assert_eq!(
    ///     tree.search(Interval::closed(0, 10)),
    ///     vec![
    ///         (Interval::closed_open(0, 4), "a"),
    ///         (Interval::closed(4, 6), "b"),
    ///         (Interval::open_closed(6, 10), "a"),
    ///     ]
    /// );
    /// ```
    pub fn insert_interval(&mut self, key: Interval<T>, value: V) {
        let key = match key {
            Interval::Empty => return,
            Interval::Atomic(a) => a,
        };

        let mut x = self.root;
        loop {
            if x == NIL {
                self.plain_insert(Interval::Atomic(key), value);
                return;
            }

            let x_key = self.arena[x].key.as_atomic().to_owned();
            match x_key.relation_to(&key) {
                Relation::Below => {
                    x = self.arena[x].right;
                }
                Relation::Above => {
                    x = self.arena[x].left;
                }
                Relation::Equal => {
                    self.arena[x].value = Some(value);
                    return;
                }
                Relation::Contains => {
                    // key is properly contained in x.key.
                    if self.arena[x].value.as_ref() == Some(&value) {
                        return; // already mapped to this value (case 5)
                    }
                    let old_value =
                        self.arena[x].value.clone().expect("visited node carries a value");
                    let (below, above) = x_key.difference(&key);
                    self.arena[x].key = Interval::Atomic(key);
                    self.arena[x].value = Some(value);
                    if let Some(piece) = below {
                        self.plain_insert(Interval::Atomic(piece), old_value.clone());
                    }
                    if let Some(piece) = above {
                        self.plain_insert(Interval::Atomic(piece), old_value);
                    }
                    return;
                }
                Relation::ContainedBy => {
                    // x.key is properly contained in key: it is fully
                    // replaced, and anything further out that key now
                    // reaches must be reconciled.
                    self.arena[x].key = Interval::Atomic(key);
                    self.arena[x].value = Some(value);
                    self.reconcile(x);
                    return;
                }
                Relation::OverlapBelow | Relation::OverlapAbove => {
                    let same_value = self.arena[x].value.as_ref() == Some(&value);
                    if same_value {
                        let fused = x_key.union(&key);
                        self.arena[x].key = Interval::Atomic(fused);
                        self.reconcile(x);
                        return;
                    }
                    let (below, above) = x_key.difference(&key);
                    let (remaining, next) = match x_key.relation_to(&key) {
                        Relation::OverlapBelow => {
                            (above.expect("OverlapBelow leaves an upper residual"), self.arena[x].left)
                        }
                        Relation::OverlapAbove => {
                            (below.expect("OverlapAbove leaves a lower residual"), self.arena[x].right)
                        }
                        _ => unreachable!("relation re-checked against the same pair"),
                    };
                    self.arena[x].key = Interval::Atomic(remaining);
                    x = next;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(t: &Tree<i32, char>, id: NodeId) -> (Interval<i32>, char) {
        (t.arena[id].key, t.arena[id].value.unwrap())
    }

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
    fn scenario_s1_overlap_extends_same_value_node() {
        let mut t = sample();
        t.insert_interval(Interval::closed(22, 30), 'g');

        let root_right = t.arena[t.root].right;
        assert_eq!(labelled(&t, root_right), (Interval::closed_open(22, 32), 'g'));
        let left_child = t.arena[root_right].left;
        assert_eq!(labelled(&t, left_child), (Interval::open(21, 22), 'f'));
        let right_child = t.arena[root_right].right;
        assert_eq!(labelled(&t, right_child), (Interval::singleton(40), 'i'));
    }

    #[test]
    fn scenario_s2_contained_split_replaces_root_with_two_residuals() {
        let mut t = sample();
        t.insert_interval(Interval::closed(18, 20), 'j');

        assert_eq!(labelled(&t, t.root), (Interval::closed(18, 20), 'j'));
        let has_residual = |key: Interval<i32>, value: char| {
            (0..t.arena.len()).any(|id| {
                id != NIL && t.arena[id].key == key && t.arena[id].value == Some(value)
            })
        };
        assert!(has_residual(Interval::closed_open(16, 18), 'a'));
        assert!(has_residual(Interval::open_closed(20, 21), 'a'));
    }

    #[test]
    fn scenario_s3_overlap_different_value_truncates() {
        let mut t = sample();
        t.insert_interval(Interval::closed(29, 32), 'g');

        let root_right = t.arena[t.root].right;
        assert_eq!(labelled(&t, root_right), (Interval::closed_open(28, 29), 'c'));
        let g_node = t.arena[root_right].right;
        assert_eq!(labelled(&t, g_node), (Interval::closed(29, 32), 'g'));
        let i_node = t.arena[g_node].right;
        assert_eq!(labelled(&t, i_node), (Interval::singleton(40), 'i'));
    }

    #[test]
    fn scenario_s6_contained_same_value_is_absorbed() {
        let mut t: Tree<i32, char> = Tree::new();
        t.insert_interval(Interval::closed(0, 2), 'a');
        t.insert_interval(Interval::closed(0, 1), 'a');
        assert_eq!(t.size(), 1);
        assert_eq!(labelled(&t, t.root), (Interval::closed(0, 2), 'a'));
    }
}
