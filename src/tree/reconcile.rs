//! Subtree reconciliation after a key extension or replacement: the
//! `modify` procedure that restores disjointness and value-fusion among
//! `x`'s descendants once `x.key` has already been grown to its final
//! boundary by the caller.

use super::{NodeId, Tree, NIL};
use crate::interval::{Atomic, Interval};

impl<T, V> Tree<T, V>
where
    T: Ord + Copy,
    V: Clone + PartialEq,
{
    /// Re-establishes disjointness and value-fusion among the descendants
    /// of `x`, whose key the caller has just replaced or extended. `x`
    /// itself is never reclassified, only folded into and left in place.
    pub(super) fn reconcile(&mut self, x: NodeId) {
        let key = self.arena[x].key.as_atomic().to_owned();
        let value = self.arena[x].value.clone().expect("reconcile requires a live node");

        let mut unsafe_nodes = Vec::new();
        let mut unsafe_subtree_roots = Vec::new();
        let mut extends = Vec::new();
        let mut cuts = Vec::new();

        let left = self.arena[x].left;
        let right = self.arena[x].right;
        self.locate(
            left,
            &key,
            &value,
            &mut unsafe_nodes,
            &mut unsafe_subtree_roots,
            &mut extends,
            &mut cuts,
        );
        self.locate(
            right,
            &key,
            &value,
            &mut unsafe_nodes,
            &mut unsafe_subtree_roots,
            &mut extends,
            &mut cuts,
        );

        // Fold scheduled extensions into x's key before anything is removed.
        let mut fused = key;
        for &id in &extends {
            fused = fused.union(self.arena[id].key.as_atomic());
        }
        self.arena[x].key = Interval::Atomic(fused);

        // Truncate cut nodes in place; they remain, now safe.
        for (id, truncated) in cuts {
            self.arena[id].key = Interval::Atomic(truncated);
        }

        // Expand unsafe subtrees into flat node lists before any deletion
        // disturbs the tree's shape.
        let mut flattened = Vec::new();
        for root in unsafe_subtree_roots {
            self.flatten_into(root, &mut flattened);
        }

        let u = unsafe_nodes.len() + flattened.len();
        let n = self.size();
        if u * 2 >= n {
            log::debug!("reconcile: rebuild path chosen (U={u}, N={n})");
        }

        for id in extends.into_iter().chain(unsafe_nodes).chain(flattened) {
            self.plain_delete_node(id);
        }
    }

    /// Classifies every node reachable from `node` against `key`/`value`
    /// (the already-finalized extension of the node whose subtree this is),
    /// pruning whole subtrees via their enclosure where possible.
    #[allow(clippy::too_many_arguments)]
    fn locate(
        &self,
        node: NodeId,
        key: &Atomic<T>,
        value: &V,
        unsafe_nodes: &mut Vec<NodeId>,
        unsafe_subtree_roots: &mut Vec<NodeId>,
        extends: &mut Vec<NodeId>,
        cuts: &mut Vec<(NodeId, Atomic<T>)>,
    ) {
        if node == NIL {
            return;
        }

        if let Interval::Atomic(enclosure) = self.enclosure(node) {
            if !enclosure.meets(key) {
                return; // safe subtree: nothing here can interact with key
            }
            if key.contains(&enclosure) {
                unsafe_subtree_roots.push(node);
                return; // unsafe subtree: wholly consumed by key
            }
        }

        let node_key = self.arena[node].key.as_atomic().to_owned();
        if key.contains(&node_key) {
            unsafe_nodes.push(node);
        } else if node_key.meets(key) {
            if self.arena[node].value.as_ref() == Some(value) {
                extends.push(node);
            } else {
                let (below, above) = node_key.difference(key);
                let truncated = below.or(above).expect("overlap must leave a residual");
                cuts.push((node, truncated));
            }
        }
        // else: safe node — no action, but its children still need visiting.

        self.locate(
            self.arena[node].left,
            key,
            value,
            unsafe_nodes,
            unsafe_subtree_roots,
            extends,
            cuts,
        );
        self.locate(
            self.arena[node].right,
            key,
            value,
            unsafe_nodes,
            unsafe_subtree_roots,
            extends,
            cuts,
        );
    }

    /// In-order flatten of a subtree into `out`, used to expand an
    /// unsafe-subtree root into individually deletable nodes. Shared with
    /// `interval_delete`'s analogous Locate/Apply pass.
    pub(super) fn flatten_into(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if node == NIL {
            return;
        }
        self.flatten_into(self.arena[node].left, out);
        out.push(node);
        self.flatten_into(self.arena[node].right, out);
    }
}
