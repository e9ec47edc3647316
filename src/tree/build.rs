//! Bulk tree construction
//!
//! `replace` rebuilds the whole tree from an input collection: dedupe
//! and sort by the tree comparator, build a skeleton of exactly that
//! many nodes (near-complete by default, randomly right-skewed on
//! request), then assign the sorted values to nodes in in-order
//! sequence so the result is a valid binary-search-tree placement.
//! Construction is synchronous and never suspends.

use std::cmp::Ordering;

use rand::Rng;

use super::{BinaryTreeAdt, NodeId, Side};
use crate::adt::marks::Attribute;

impl<T: Clone> BinaryTreeAdt<T> {
    /// Rebuild the tree from `values`.
    ///
    /// Duplicates (under the tree comparator) collapse to one node; an
    /// empty input degenerates to an empty tree rather than failing.
    /// With `perfect` the skeleton is near-complete; otherwise random
    /// interior nodes repeatedly demote their right subtree to the
    /// rightmost descendant of their left subtree, producing a
    /// degenerate rightward-leaning shape with nontrivial height.
    ///
    /// Guarantees afterwards: `height` is exact, and an in-order
    /// traversal yields exactly the sorted, deduplicated input.
    pub fn replace<I>(&mut self, values: I, perfect: bool)
    where
        I: IntoIterator<Item = T>,
    {
        let compare = self.compare;
        let mut sorted: Vec<T> = values.into_iter().collect();
        sorted.sort_by(compare);
        sorted.dedup_by(|a, b| compare(a, b) == Ordering::Equal);

        self.nodes.clear();
        self.root = None;
        self.tagger = 0;
        self.core.clear_actives();

        if sorted.is_empty() {
            self.height = 0;
            return;
        }

        let root = self.create_skeleton(sorted.len(), perfect);
        self.root = Some(root);
        self.assign_in_order(sorted);
        self.refresh_shape();

        self.attribute(Attribute::Root, &[root]);
        let leaves: Vec<NodeId> = self
            .reachable()
            .into_iter()
            .filter(|&id| self.is_leaf(id))
            .collect();
        self.attribute(Attribute::Leaf, &leaves);
    }

    /// Build a skeleton of `n` valueless nodes and return its root.
    ///
    /// Near-complete shape via heap-style links: node `i` parents
    /// `2i + 1` and `2i + 2`, giving `⌊n/2⌋` interior nodes.
    fn create_skeleton(&mut self, n: usize, perfect: bool) -> NodeId {
        let ids: Vec<NodeId> = (0..n).map(|_| self.new_node(None)).collect();
        for i in 0..n / 2 {
            let left = ids.get(2 * i + 1).copied();
            let right = ids.get(2 * i + 2).copied();
            self.node_mut(ids[i]).children = [left, right];
        }

        let interior = n / 2;
        if !perfect && interior > 0 {
            while self.rng.random::<f64>() > 0.4 {
                let target = ids[self.rng.random_range(0..interior)];
                let (Some(left), Some(right)) = (self.left(target), self.right(target)) else {
                    continue;
                };
                self.node_mut(target).children[Side::Right.index()] = None;
                let mut parent = left;
                while let Some(probe) = self.right(parent) {
                    parent = probe;
                }
                self.node_mut(parent).children[Side::Right.index()] = Some(right);
            }
        }

        ids[0]
    }

    /// Assign sorted values to the skeleton in in-order sequence.
    fn assign_in_order(&mut self, values: Vec<T>) {
        let mut values = values.into_iter();
        let mut stack = Vec::new();
        let mut current = self.root;
        while current.is_some() || !stack.is_empty() {
            while let Some(id) = current {
                stack.push(id);
                current = self.left(id);
            }
            if let Some(id) = stack.pop() {
                self.node_mut(id).value = values.next();
                current = self.right(id);
            }
        }
    }

    /// Recompute `height` and per-node display levels. Called after
    /// every structural change so the height invariant always holds.
    pub(crate) fn refresh_shape(&mut self) {
        self.height = self.height_of(self.root);
        let mut stack: Vec<(NodeId, u32)> = self.root.map(|root| (root, 0)).into_iter().collect();
        while let Some((id, level)) = stack.pop() {
            self.node_mut(id).level = level;
            let children = self.node(id).children;
            for child in children.into_iter().flatten() {
                stack.push((child, level + 1));
            }
        }
        self.core.touch();
    }

    /// Recursively computed height: empty is 0, otherwise one more than
    /// the tallest present child.
    pub fn height_of(&self, node: Option<NodeId>) -> usize {
        match node {
            None => 0,
            Some(id) => {
                let children = self.node(id).children;
                1 + children
                    .iter()
                    .map(|&child| self.height_of(child))
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Every node reachable from the root, in preorder.
    pub(crate) fn reachable(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().flatten().copied());
        }
        out
    }

    /// Values in in-order sequence, without animation. Ascending in the
    /// tree comparator for any tree built by `replace`.
    pub fn in_order_values(&self) -> Vec<T> {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        let mut current = self.root;
        while current.is_some() || !stack.is_empty() {
            while let Some(id) = current {
                stack.push(id);
                current = self.left(id);
            }
            if let Some(id) = stack.pop() {
                if let Some(value) = self.node(id).value.clone() {
                    out.push(value);
                }
                current = self.right(id);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::pacing::Pacer;
    use crate::pseudocode::CodeCursor;

    fn tree() -> BinaryTreeAdt<i64> {
        BinaryTreeAdt::new(Arc::new(Pacer::instant()), CodeCursor::new()).with_seed(3)
    }

    #[test]
    fn test_skeleton_keeps_every_node_reachable() {
        // Even n used to be the interesting case: the last node must
        // still get a parent.
        for n in 1..=12 {
            let mut tree = tree();
            tree.replace(0..n as i64, true);
            assert_eq!(tree.reachable().len(), n, "n = {n}");
        }
    }

    #[test]
    fn test_near_complete_height() {
        for n in 1usize..=32 {
            let mut tree = tree();
            tree.replace(0..n as i64, true);
            let expected = (n as f64).log2().floor() as usize + 1;
            assert_eq!(tree.height(), expected, "n = {n}");
        }
    }

    #[test]
    fn test_example_tree_scenario() {
        let mut tree = tree();
        tree.replace([5, 3, 8, 1], true);

        assert_eq!(tree.in_order_values(), vec![1, 3, 5, 8]);
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.height_of(tree.root()), 3);
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut tree = tree();
        tree.replace([4, 4, 4, 2, 2], true);
        assert_eq!(tree.in_order_values(), vec![2, 4]);
    }

    #[test]
    fn test_all_duplicates_degenerate_to_single_node() {
        let mut tree = tree();
        tree.replace([9, 9, 9], true);
        assert_eq!(tree.in_order_values(), vec![9]);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn test_empty_input_degenerates_to_empty_tree() {
        let mut tree = tree();
        tree.replace(std::iter::empty::<i64>(), true);
        assert_eq!(tree.root(), None);
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_skewed_build_keeps_value_placement() {
        for seed in 0..8 {
            let mut tree = BinaryTreeAdt::new(Arc::new(Pacer::instant()), CodeCursor::new())
                .with_seed(seed);
            tree.replace(0..15i64, false);

            assert_eq!(tree.reachable().len(), 15, "seed = {seed}");
            assert_eq!(tree.in_order_values(), (0..15).collect::<Vec<_>>());
            assert_eq!(tree.height(), tree.height_of(tree.root()), "seed = {seed}");
        }
    }

    #[test]
    fn test_root_and_leaf_attributes_seeded() {
        let mut tree = tree();
        tree.replace([5, 3, 8, 1], true);

        let root = tree.root().expect("non-empty");
        assert_eq!(tree.node(root).attribute, Attribute::Root);
        for id in tree.reachable() {
            if tree.is_leaf(id) {
                assert_eq!(tree.node(id).attribute, Attribute::Leaf);
            }
        }
    }
}
