//! Generic animated binary tree ADT
//!
//! Wraps an arena of [`TreeNode`]s in an instrumented API where every
//! read, write, and comparison tags the affected nodes with a display
//! state, cooperatively suspends one visualization tick, and advances a
//! synchronized pseudocode cursor. Shape-agnostic algorithms (min, max,
//! successor, traversals) are phrased purely in terms of `left`, `right`,
//! `is_leaf`, and the tree comparator.

mod build;
mod node;
mod walk;

pub use node::{NodeId, ParentRef, Side, TreeNode};
pub use walk::{
    IN_ORDER_BLOCK, MAX_BLOCK, MIN_BLOCK, POST_ORDER_BLOCK, PREDECESSOR_BLOCK, PRE_ORDER_BLOCK,
    SUCCESSOR_BLOCK,
};

use std::cmp::Ordering;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::adt::marks::{Action, Attribute, CompareState, EdgeTag, Endpoint, Tagged, ValueItem};
use crate::adt::{default_compare, ActionUndo, AdtCore};
use crate::pacing::Pacer;
use crate::pseudocode::CodeCursor;

/// Animated binary search tree.
///
/// One tree owns one arena; nodes are never shared between instances.
/// All animated operations are `async` and suspend exactly once per
/// visible step, after the state mutation and never mid-mutation.
#[derive(Debug)]
pub struct BinaryTreeAdt<T> {
    nodes: Vec<TreeNode<T>>,
    root: Option<NodeId>,
    height: usize,
    core: AdtCore<T>,
    cursor: CodeCursor,
    compare: fn(&T, &T) -> Ordering,
    tagger: u32,
    rng: StdRng,
}

impl<T: Clone + Ord> BinaryTreeAdt<T> {
    /// Tree ordered by `T`'s natural order.
    pub fn new(pacer: Arc<Pacer>, cursor: CodeCursor) -> Self {
        Self::with_compare(pacer, cursor, default_compare::<T>)
    }
}

impl<T: Clone> BinaryTreeAdt<T> {
    /// Tree ordered by an explicit comparator.
    ///
    /// Registers the tree's pseudocode blocks against `cursor`.
    pub fn with_compare(
        pacer: Arc<Pacer>,
        cursor: CodeCursor,
        compare: fn(&T, &T) -> Ordering,
    ) -> Self {
        walk::register_blocks(&cursor);
        Self {
            nodes: Vec::new(),
            root: None,
            height: 0,
            core: AdtCore::new(pacer),
            cursor,
            compare,
            tagger: 0,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seed the internal RNG, for deterministic skews and picks.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // ---- snapshot accessors -------------------------------------------

    /// Root node, absent for an empty tree.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Exact height of the tree (empty tree has height 0).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read a node; renderers poll marks through this.
    pub fn node(&self, id: NodeId) -> &TreeNode<T> {
        &self.nodes[id.index()]
    }

    /// Shared base state (actives log, version, pacer).
    pub fn core(&self) -> &AdtCore<T> {
        &self.core
    }

    /// Value-level display log.
    pub fn actives(&self) -> &[ValueItem<T>] {
        self.core.actives()
    }

    /// Pseudocode cursor this tree drives.
    pub fn cursor(&self) -> &CodeCursor {
        &self.cursor
    }

    /// Left child of `id`.
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).child(Side::Left)
    }

    /// Right child of `id`.
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).child(Side::Right)
    }

    /// Whether `id` has no present children.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).is_leaf()
    }

    fn node_mut(&mut self, id: NodeId) -> &mut TreeNode<T> {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn new_node(&mut self, value: Option<T>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(TreeNode::new(value));
        id
    }

    // ---- tagging ------------------------------------------------------

    /// Bulk-tag nodes with an action; returns the inverse record so the
    /// previous highlights can be restored exactly.
    pub fn act(&mut self, action: Action, targets: &[NodeId]) -> ActionUndo<NodeId> {
        let mut previous = Vec::with_capacity(targets.len());
        for &id in targets {
            let node = self.node_mut(id);
            previous.push((id, node.action));
            node.action = action;
        }
        self.core.touch();
        ActionUndo(previous)
    }

    /// Restore the highlights recorded by a previous [`act`](Self::act).
    pub fn undo_act(&mut self, undo: ActionUndo<NodeId>) {
        for (id, action) in undo.0 {
            self.node_mut(id).action = action;
        }
        self.core.touch();
    }

    /// Bulk-tag comparison states.
    pub fn state(&mut self, state: CompareState, targets: &[NodeId]) {
        for &id in targets {
            self.node_mut(id).state = state;
        }
        self.core.touch();
    }

    /// Bulk-tag structural attributes.
    pub fn attribute(&mut self, attribute: Attribute, targets: &[NodeId]) {
        for &id in targets {
            self.node_mut(id).attribute = attribute;
        }
        self.core.touch();
    }

    /// Mark the directed edge `from → to` with a fresh relation id.
    pub fn link(&mut self, from: NodeId, to: NodeId, directional: bool) {
        self.tagger += 1;
        let relation = self.tagger;
        self.node_mut(from).tag = Some(EdgeTag {
            relation,
            endpoint: Endpoint::From,
            directional,
        });
        self.node_mut(to).tag = Some(EdgeTag {
            relation,
            endpoint: Endpoint::To,
            directional,
        });
        self.core.touch();
    }

    /// Clear the edge marker on both endpoints.
    pub fn unlink(&mut self, from: NodeId, to: NodeId) {
        self.node_mut(from).tag = None;
        self.node_mut(to).tag = None;
        self.core.touch();
    }

    /// Reset every reachable node's marks and edge tag, and clear the
    /// active-values log. The canonical reset between animation runs;
    /// idempotent.
    pub fn restore(&mut self) {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id.index()];
            node.clear_marks();
            node.tag = None;
            stack.extend(node.children.iter().flatten().copied());
        }
        self.core.clear_actives();
    }

    // ---- structural mutation ------------------------------------------

    /// Replace `node` under `parent` with `new_node` (or detach it).
    /// Dispatches on the [`ParentRef`] variant so root replacement and
    /// interior replacement share one code path.
    pub fn immediate_replace_node(
        &mut self,
        parent: ParentRef,
        node: NodeId,
        new_node: Option<NodeId>,
    ) {
        match parent {
            ParentRef::Root => self.root = new_node,
            ParentRef::Node(parent) => {
                let side = if self.left(parent) == Some(node) {
                    Side::Left
                } else {
                    Side::Right
                };
                self.node_mut(parent).children[side.index()] = new_node;
            }
        }
        self.refresh_shape();
    }

    // ---- animated primitives ------------------------------------------

    /// Visible pointer dereference: read the child of `parent` on
    /// `side`, peek-tag it and flash the traversed edge for one tick.
    /// Returns the child, or `None` when absent.
    pub async fn get(&mut self, parent: NodeId, side: Side) -> Option<NodeId> {
        let child = self.node(parent).child(side);
        if let Some(child) = child {
            self.act(Action::Peek, &[child]);
            self.link(parent, child, true);
        }
        self.core.doze(1.0).await;
        if let Some(child) = child {
            self.unlink(parent, child);
        }
        child
    }

    /// Splice a fresh node holding `value` into the child slot of
    /// `parent` on `side` (or into the root slot). Select-tags the
    /// parent, update-tags the new node for one tick, then clears both.
    pub async fn set(&mut self, parent: ParentRef, side: Side, value: T) -> NodeId {
        if let ParentRef::Node(parent) = parent {
            self.act(Action::Select, &[parent]);
        }
        let node = self.new_node(Some(value));
        match parent {
            ParentRef::Root => self.root = Some(node),
            ParentRef::Node(parent) => {
                self.node_mut(parent).children[side.index()] = Some(node);
            }
        }
        self.refresh_shape();
        self.act(Action::Update, &[node]);
        self.core.doze(1.0).await;
        match parent {
            ParentRef::Root => self.act(Action::None, &[node]),
            ParentRef::Node(parent) => self.act(Action::None, &[parent, node]),
        };
        node
    }

    /// Overwrite a node's value, update-tagged for one tick.
    pub async fn update(&mut self, node: NodeId, value: T) {
        self.act(Action::Update, &[node]);
        self.node_mut(node).value = Some(value);
        self.core.touch();
        self.core.doze(1.0).await;
    }

    /// Three-way comparison of `value` against the node's value.
    ///
    /// Peek-tags the node and records the visual outcome: a tie shows
    /// as `Equal` when `mark_equal` is set and `GreaterOrEqual`
    /// otherwise, while the returned [`Ordering`] is always the exact
    /// result. Suspends a half-length tick.
    pub async fn compare(&mut self, value: &T, node: NodeId, mark_equal: bool) -> Ordering {
        self.act(Action::Peek, &[node]);
        // Valueless nodes exist only mid-rebuild, never during a run.
        let result = self
            .node(node)
            .value
            .as_ref()
            .map_or(Ordering::Equal, |other| (self.compare)(value, other));
        let state = match result {
            Ordering::Less => CompareState::Less,
            Ordering::Greater => CompareState::Greater,
            Ordering::Equal if mark_equal => CompareState::Equal,
            Ordering::Equal => CompareState::GreaterOrEqual,
        };
        self.state(state, &[node]);
        self.core.doze(0.5).await;
        result
    }

    /// Random descendant of `from` (default: the root): recurses into a
    /// uniformly chosen present child with probability 0.7, stops
    /// otherwise, and always stops at a leaf. Not animated; a sampling
    /// utility for demo input.
    pub fn random_pick(&mut self, from: Option<NodeId>) -> Option<NodeId> {
        let mut node = from.or(self.root)?;
        loop {
            if self.is_leaf(node) || self.rng.random::<f64>() <= 0.3 {
                return Some(node);
            }
            let children: Vec<NodeId> = self.node(node).children.iter().flatten().copied().collect();
            node = children[self.rng.random_range(0..children.len())];
        }
    }

    // ---- ancestry recovery --------------------------------------------

    /// Path of ancestors from the root down to (excluding) `target`,
    /// re-derived by comparator direction.
    ///
    /// Precondition: node placement matches comparator order (always
    /// true for trees built through this ADT's own operations). If a
    /// value was planted bypassing the ADT, the walk can silently
    /// return a wrong or truncated path; this is documented, not
    /// runtime-checked. An O(1)-ancestry variant with explicit parent
    /// links would be a documented alternative, not a behavior change.
    pub fn search_node(&self, target: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.root;
        while let Some(id) = current {
            if id == target {
                break;
            }
            path.push(id);
            let go_left = match (self.node(target).value.as_ref(), self.node(id).value.as_ref()) {
                (Some(probe), Some(here)) => (self.compare)(probe, here) == Ordering::Less,
                _ => false,
            };
            current = if go_left { self.left(id) } else { self.right(id) };
        }
        path
    }

    /// Awaited cursor step: move the highlight, then suspend one tick.
    async fn step(&mut self, line: usize) {
        self.cursor.step_at(line, self.core.pacer()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> BinaryTreeAdt<i64> {
        BinaryTreeAdt::new(Arc::new(Pacer::instant()), CodeCursor::new()).with_seed(11)
    }

    #[tokio::test]
    async fn test_set_through_root_slot() {
        let mut tree = tree();
        let root = tree.set(ParentRef::Root, Side::Left, 10).await;

        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.node(root).value, Some(10));
        assert_eq!(tree.node(root).action, Action::None);
    }

    #[tokio::test]
    async fn test_set_child_refreshes_height() {
        let mut tree = tree();
        let root = tree.set(ParentRef::Root, Side::Left, 10).await;
        let child = tree.set(ParentRef::Node(root), Side::Left, 5).await;

        assert_eq!(tree.left(root), Some(child));
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.node(child).level, 1);
    }

    #[tokio::test]
    async fn test_get_peeks_present_child() {
        let mut tree = tree();
        let root = tree.set(ParentRef::Root, Side::Left, 10).await;
        let child = tree.set(ParentRef::Node(root), Side::Right, 20).await;

        let seen = tree.get(root, Side::Right).await;
        assert_eq!(seen, Some(child));
        assert_eq!(tree.node(child).action, Action::Peek);
        // The traversed edge is only flashed for the one tick.
        assert!(tree.node(root).tag.is_none());
        assert!(tree.node(child).tag.is_none());

        assert_eq!(tree.get(root, Side::Left).await, None);
    }

    #[tokio::test]
    async fn test_compare_tie_reporting() {
        let mut tree = tree();
        let root = tree.set(ParentRef::Root, Side::Left, 10).await;

        assert_eq!(tree.compare(&3, root, false).await, Ordering::Less);
        assert_eq!(tree.node(root).state, CompareState::Less);

        assert_eq!(tree.compare(&10, root, false).await, Ordering::Equal);
        assert_eq!(tree.node(root).state, CompareState::GreaterOrEqual);

        assert_eq!(tree.compare(&10, root, true).await, Ordering::Equal);
        assert_eq!(tree.node(root).state, CompareState::Equal);
    }

    #[tokio::test]
    async fn test_update_overwrites_value_in_place() {
        let mut tree = tree();
        let root = tree.set(ParentRef::Root, Side::Left, 10).await;

        tree.update(root, 25).await;
        assert_eq!(tree.node(root).value, Some(25));
        assert_eq!(tree.node(root).action, Action::Update);
    }

    #[tokio::test]
    async fn test_act_undo_restores_previous_highlights() {
        let mut tree = tree();
        let root = tree.set(ParentRef::Root, Side::Left, 1).await;
        tree.act(Action::Select, &[root]);

        let undo = tree.act(Action::Peek, &[root]);
        assert_eq!(tree.node(root).action, Action::Peek);

        tree.undo_act(undo);
        assert_eq!(tree.node(root).action, Action::Select);
    }

    #[tokio::test]
    async fn test_link_assigns_shared_relation() {
        let mut tree = tree();
        let root = tree.set(ParentRef::Root, Side::Left, 10).await;
        let child = tree.set(ParentRef::Node(root), Side::Left, 5).await;

        tree.link(root, child, true);
        let from = tree.node(root).tag.expect("from endpoint tagged");
        let to = tree.node(child).tag.expect("to endpoint tagged");
        assert_eq!(from.relation, to.relation);
        assert_eq!(from.endpoint, Endpoint::From);
        assert_eq!(to.endpoint, Endpoint::To);

        tree.unlink(root, child);
        assert!(tree.node(root).tag.is_none());
        assert!(tree.node(child).tag.is_none());
    }

    #[tokio::test]
    async fn test_immediate_replace_node_root_and_interior() {
        let mut tree = tree();
        let root = tree.set(ParentRef::Root, Side::Left, 10).await;
        let child = tree.set(ParentRef::Node(root), Side::Left, 5).await;

        // Interior: detach the child.
        tree.immediate_replace_node(ParentRef::Node(root), child, None);
        assert_eq!(tree.left(root), None);
        assert_eq!(tree.height(), 1);

        // Root: promote the detached node.
        tree.immediate_replace_node(ParentRef::Root, root, Some(child));
        assert_eq!(tree.root(), Some(child));
    }
}
