//! Plain (non-interval-aware) CLRS mechanics: TREE-INSERT/RB-INSERT-FIXUP
//! and RB-DELETE/RB-DELETE-FIXUP, augmentation-aware.
//!
//! These presuppose their argument key does not overlap anything already
//! in the tree; they make no attempt to enforce disjointness or the
//! no-equal-value-adjacency rule themselves. The interval-aware operations
//! in `interval_insert`, `interval_delete` and `reconcile` build on top of
//! these, having already established that precondition.

use std::cmp::Ordering;

use super::{Color, NodeId, NodeRef, Tree, NIL};
use crate::interval::Interval;

impl<T, V> Tree<T, V>
where
    T: Ord + Copy,
    V: Clone + PartialEq,
{
    /// Plain (non-interval-aware) insertion: links `(key, value)` into the
    /// tree by ordinary BST descent and rebalances, without attempting to
    /// resolve overlap with anything already present. For embedders who
    /// have already guaranteed disjointness themselves and want to skip
    /// [`Tree::insert_interval`]'s overlap-resolution machinery.
    ///
    /// # Arguments
    /// * `key` - A non-empty interval disjoint from every key already in
    ///   the tree.
    /// * `value` - The payload to associate with `key`.
    ///
    /// # Returns
    /// A [`NodeRef`] to the newly linked node.
    ///
    /// # Panics
    /// Panics if `key` overlaps an existing key. Touching a neighbor of a
    /// different value is fine.
    ///
    /// # Example
    /// ```
    /// use interval_rb_tree::{Interval, Tree};
    /// let mut tree = Tree::new();
    /// let n = tree.insert(Interval::closed(0, 2), "a");
    /// assert_eq!(*tree.value(n), "a");
    /// ```
    pub fn insert(&mut self, key: Interval<T>, value: V) -> NodeRef {
        NodeRef(self.plain_insert(key, value))
    }

    /// Plain (non-interval-aware) deletion of the node at `n`.
    ///
    /// # Arguments
    /// * `n` - A handle to a live node in this tree.
    ///
    /// # Example
    /// ```
    /// use interval_rb_tree::{Interval, Tree};
    /// let mut tree = Tree::new();
    /// let n = tree.insert(Interval::closed(0, 2), "a");
    /// tree.delete(n);
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, n: NodeRef) {
        self.plain_delete_node(n.0);
    }

    /// Allocates a node for `(key, value)` and links it into the tree by
    /// plain BST descent, then restores red-black balance.
    ///
    /// # Panics
    /// Panics (via the `bst_cmp` precondition in the descent loop) if `key`
    /// overlaps an existing key — callers must have already established
    /// disjointness. Touching a neighbor of a different value is fine.
    pub(crate) fn plain_insert(&mut self, key: Interval<T>, value: V) -> NodeId {
        debug_assert!(!key.is_empty(), "plain_insert requires a non-empty key");
        let z = self.alloc(key, value, Color::Red);
        self.bst_insert_node(z);
        z
    }

    fn bst_insert_node(&mut self, z: NodeId) {
        let z_key = self.arena[z].key.as_atomic().to_owned();
        let mut y = NIL;
        let mut x = self.root;
        while x != NIL {
            y = x;
            x = match self.arena[x].key.as_atomic().bst_cmp(&z_key) {
                Some(Ordering::Greater) => self.arena[x].left,
                Some(Ordering::Less) => self.arena[x].right,
                _ => panic!("bst_insert_node: inserted key overlaps an existing node"),
            };
        }
        self.arena[z].parent = y;
        if y == NIL {
            self.root = z;
        } else if self.arena[y].key.as_atomic().bst_cmp(&z_key) == Some(Ordering::Greater) {
            self.arena[y].left = z;
        } else {
            self.arena[y].right = z;
        }
        self.recompute_augment(z);
        self.recompute_ancestors(y);
        self.insert_fixup(z);
    }

    /// RB-INSERT-FIXUP (CLRS §13.3).
    fn insert_fixup(&mut self, mut z: NodeId) {
        while self.arena[self.arena[z].parent].color == Color::Red {
            let zp = self.arena[z].parent;
            let zpp = self.arena[zp].parent;
            log::trace!("insert_fixup z={z} parent={zp} grandparent={zpp}");
            if zp == self.arena[zpp].left {
                let y = self.arena[zpp].right;
                if self.arena[y].color == Color::Red {
                    self.arena[zp].color = Color::Black;
                    self.arena[y].color = Color::Black;
                    self.arena[zpp].color = Color::Red;
                    z = zpp;
                } else {
                    if z == self.arena[zp].right {
                        z = zp;
                        self.left_rotate(z);
                    }
                    let zp = self.arena[z].parent;
                    let zpp = self.arena[zp].parent;
                    self.arena[zp].color = Color::Black;
                    self.arena[zpp].color = Color::Red;
                    self.right_rotate(zpp);
                }
            } else {
                let y = self.arena[zpp].left;
                if self.arena[y].color == Color::Red {
                    self.arena[zp].color = Color::Black;
                    self.arena[y].color = Color::Black;
                    self.arena[zpp].color = Color::Red;
                    z = zpp;
                } else {
                    if z == self.arena[zp].left {
                        z = zp;
                        self.right_rotate(z);
                    }
                    let zp = self.arena[z].parent;
                    let zpp = self.arena[zp].parent;
                    self.arena[zp].color = Color::Black;
                    self.arena[zpp].color = Color::Red;
                    self.left_rotate(zpp);
                }
            }
        }
        self.arena[self.root].color = Color::Black;
    }

    /// RB-DELETE (CLRS §13.4), augmentation-aware, freeing `z`'s arena slot
    /// once it is fully unlinked.
    pub(crate) fn plain_delete_node(&mut self, z: NodeId) {
        let mut y = z;
        let mut y_original_color = self.arena[y].color;
        let x;
        let fix_start;

        if self.arena[z].left == NIL {
            x = self.arena[z].right;
            self.transplant(z, x);
            fix_start = self.arena[x].parent;
        } else if self.arena[z].right == NIL {
            x = self.arena[z].left;
            self.transplant(z, x);
            fix_start = self.arena[x].parent;
        } else {
            y = self.minimum_idx(self.arena[z].right);
            y_original_color = self.arena[y].color;
            x = self.arena[y].right;
            if self.arena[y].parent == z {
                self.arena[x].parent = y;
                self.transplant(z, y);
                self.arena[y].left = self.arena[z].left;
                self.arena[self.arena[y].left].parent = y;
                self.arena[y].color = self.arena[z].color;
                fix_start = y;
            } else {
                let y_old_parent = self.arena[y].parent;
                self.transplant(y, x);
                self.arena[y].right = self.arena[z].right;
                self.arena[self.arena[y].right].parent = y;
                self.transplant(z, y);
                self.arena[y].left = self.arena[z].left;
                self.arena[self.arena[y].left].parent = y;
                self.arena[y].color = self.arena[z].color;
                fix_start = y_old_parent;
            }
        }

        self.recompute_ancestors(fix_start);
        if y_original_color == Color::Black {
            self.delete_fixup(x);
        }
        self.free_node(z);
    }

    /// RB-DELETE-FIXUP (CLRS §13.4).
    fn delete_fixup(&mut self, mut x: NodeId) {
        while x != self.root && self.arena[x].color == Color::Black {
            let xp = self.arena[x].parent;
            log::trace!("delete_fixup x={x} parent={xp}");
            if x == self.arena[xp].left {
                let mut w = self.arena[xp].right;
                if self.arena[w].color == Color::Red {
                    self.arena[w].color = Color::Black;
                    self.arena[xp].color = Color::Red;
                    self.left_rotate(xp);
                    w = self.arena[xp].right;
                }
                let wl = self.arena[w].left;
                let wr = self.arena[w].right;
                if self.arena[wl].color == Color::Black && self.arena[wr].color == Color::Black {
                    self.arena[w].color = Color::Red;
                    x = xp;
                } else {
                    if self.arena[wr].color == Color::Black {
                        self.arena[wl].color = Color::Black;
                        self.arena[w].color = Color::Red;
                        self.right_rotate(w);
                        w = self.arena[xp].right;
                    }
                    self.arena[w].color = self.arena[xp].color;
                    self.arena[xp].color = Color::Black;
                    let wr = self.arena[w].right;
                    self.arena[wr].color = Color::Black;
                    self.left_rotate(xp);
                    x = self.root;
                }
            } else {
                let mut w = self.arena[xp].left;
                if self.arena[w].color == Color::Red {
                    self.arena[w].color = Color::Black;
                    self.arena[xp].color = Color::Red;
                    self.right_rotate(xp);
                    w = self.arena[xp].left;
                }
                let wl = self.arena[w].left;
                let wr = self.arena[w].right;
                if self.arena[wl].color == Color::Black && self.arena[wr].color == Color::Black {
                    self.arena[w].color = Color::Red;
                    x = xp;
                } else {
                    if self.arena[wl].color == Color::Black {
                        self.arena[wr].color = Color::Black;
                        self.arena[w].color = Color::Red;
                        self.left_rotate(w);
                        w = self.arena[xp].left;
                    }
                    self.arena[w].color = self.arena[xp].color;
                    self.arena[xp].color = Color::Black;
                    let wl = self.arena[w].left;
                    self.arena[wl].color = Color::Black;
                    self.right_rotate(xp);
                    x = self.root;
                }
            }
        }
        self.arena[x].color = Color::Black;
    }
}

#[cfg(test)]
mod tests {
    use super::super::NodeRef;
    use super::*;
    use crate::interval::Interval;

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

    fn child_values(t: &Tree<i32, char>) -> Vec<Option<char>> {
        // root, root.left, root.right, root.left.left, root.left.right,
        // root.right.left, root.right.right, root.right.left.right, root.right.right.right
        let r = t.root;
        let rl = t.arena[r].left;
        let rr = t.arena[r].right;
        let rll = t.arena[rl].left;
        let rlr = t.arena[rl].right;
        let rrl = t.arena[rr].left;
        let rrr = t.arena[rr].right;
        let rrlr = t.arena[rrl].right;
        let rrrr = t.arena[rrr].right;
        [r, rl, rr, rll, rlr, rrl, rrr, rrlr, rrrr]
            .into_iter()
            .map(|id| t.arena[id].value.clone())
            .collect()
    }

    #[test]
    fn plain_insert_matches_original_source_shape() {
        let t = sample();
        assert_eq!(
            child_values(&t),
            vec![
                Some('a'),
                Some('b'),
                Some('c'),
                Some('d'),
                Some('e'),
                Some('f'),
                Some('g'),
                Some('h'),
                Some('i')
            ]
        );
    }

    #[test]
    fn plain_delete_of_root_promotes_successor() {
        let mut t = sample();
        let root = t.root;
        t.plain_delete_node(root);
        let new_root = t.root;
        assert_eq!(t.arena[new_root].value, Some('f'));
        let _ = NodeRef(new_root);
    }
}
