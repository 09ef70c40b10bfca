//! Randomized stress testing against the tree's structural invariants:
//! red-black balance, BST order with pairwise disjoint keys, augmentation
//! correctness, and no-equal-value adjacency. Exercised here (rather than
//! from the integration tests) because checking them needs the private
//! arena fields.

use proptest::prelude::*;

use super::{Color, NodeId, Tree, NIL};
use crate::bound::Bound;
use crate::interval::{Atomic, Interval};

type TestTree = Tree<i32, u8>;

/// P1: black root, black sentinel, no red node has a red child, every
/// root-to-sentinel path carries the same black-node count.
fn check_rb_balance(t: &TestTree) {
    assert_eq!(t.arena[NIL].color, Color::Black, "sentinel must be black");
    if t.root != NIL {
        assert_eq!(t.arena[t.root].color, Color::Black, "root must be black");
    }

    fn walk(t: &TestTree, id: NodeId) -> u32 {
        if id == NIL {
            return 0;
        }
        if t.arena[id].color == Color::Red {
            let l = t.arena[id].left;
            let r = t.arena[id].right;
            assert_ne!(t.arena[l].color, Color::Red, "red node {id} has a red left child");
            assert_ne!(t.arena[r].color, Color::Red, "red node {id} has a red right child");
        }
        let bh_left = walk(t, t.arena[id].left);
        let bh_right = walk(t, t.arena[id].right);
        assert_eq!(bh_left, bh_right, "unequal black-heights at node {id}");
        bh_left + (t.arena[id].color == Color::Black) as u32
    }
    walk(t, t.root);
}

/// P2: in-order traversal is strictly increasing and pairwise disjoint.
fn check_order_and_disjoint(t: &TestTree) {
    let pairs = in_order(t);
    for w in pairs.windows(2) {
        let (a, b) = (w[0], w[1]);
        assert!(a.bst_cmp(&b) == Some(std::cmp::Ordering::Less), "keys out of order: {a} then {b}");
        assert!(!a.overlaps(&b), "adjacent keys overlap: {a} and {b}");
    }
}

/// P3: size/min_desc/max_desc agree with their structural definitions.
fn check_augmentation(t: &TestTree) {
    fn walk(t: &TestTree, id: NodeId) {
        if id == NIL {
            return;
        }
        let node = &t.arena[id];
        let expect_size = t.arena[node.left].size + t.arena[node.right].size + 1;
        assert_eq!(node.size, expect_size, "size mismatch at node {id}");

        let expect_min = if node.left == NIL { id } else { t.arena[node.left].min_desc };
        assert_eq!(node.min_desc, expect_min, "min_desc mismatch at node {id}");

        let expect_max = if node.right == NIL { id } else { t.arena[node.right].max_desc };
        assert_eq!(node.max_desc, expect_max, "max_desc mismatch at node {id}");

        walk(t, node.left);
        walk(t, node.right);
    }
    walk(t, t.root);
}

/// P4: adjacent in-order keys that touch must differ in value.
fn check_no_touching_same_value(t: &TestTree) {
    let pairs = in_order_with_values(t);
    for w in pairs.windows(2) {
        let ((ka, va), (kb, vb)) = (&w[0], &w[1]);
        if ka.touches(kb) {
            assert_ne!(va, vb, "touching keys {ka} and {kb} share value {va}");
        }
    }
}

fn in_order(t: &TestTree) -> Vec<Atomic<i32>> {
    in_order_with_values(t).into_iter().map(|(k, _)| k).collect()
}

fn in_order_with_values(t: &TestTree) -> Vec<(Atomic<i32>, u8)> {
    fn walk(t: &TestTree, id: NodeId, out: &mut Vec<(Atomic<i32>, u8)>) {
        if id == NIL {
            return;
        }
        walk(t, t.arena[id].left, out);
        out.push((t.arena[id].key.as_atomic().to_owned(), *t.arena[id].value.as_ref().unwrap()));
        walk(t, t.arena[id].right, out);
    }
    let mut out = Vec::new();
    walk(t, t.root, &mut out);
    out
}

fn check_all(t: &TestTree) {
    check_rb_balance(t);
    check_order_and_disjoint(t);
    check_augmentation(t);
    check_no_touching_same_value(t);
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Insert(Atomic<i32>, u8),
    Delete(Atomic<i32>),
}

fn arb_bound() -> impl Strategy<Value = Bound> {
    prop_oneof![Just(Bound::Open), Just(Bound::Closed)]
}

fn arb_atomic() -> impl Strategy<Value = Atomic<i32>> {
    (0..40i32, 0..8i32, arb_bound(), arb_bound()).prop_filter_map("non-empty atomic", |(lower, len, left, right)| {
        match Interval::bounded(left, lower, lower + len, right) {
            Interval::Atomic(a) => Some(a),
            Interval::Empty => None,
        }
    })
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (arb_atomic(), 0u8..4).prop_map(|(a, v)| Op::Insert(a, v)),
        1 => arb_atomic().prop_map(Op::Delete),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 200, ..ProptestConfig::default() })]

    #[test]
    fn invariants_hold_after_every_mutation(ops in proptest::collection::vec(arb_op(), 1..60)) {
        let mut t: Tree<i32, u8> = Tree::new();
        for op in ops {
            match op {
                Op::Insert(a, v) => t.insert_interval(Interval::Atomic(a), v),
                Op::Delete(a) => t.delete_interval(Interval::Atomic(a)),
            }
            check_all(&t);
        }
    }
}
