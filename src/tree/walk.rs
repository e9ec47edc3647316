//! Animated tree algorithms
//!
//! Each operation drives its pseudocode block in lockstep with its own
//! progress: the cursor is moved at entry, loop body, loop continuation,
//! and exit, so an external highlighter shows the exact matching line at
//! every suspension. Comparison-free structure walks go through
//! [`BinaryTreeAdt::get`], the unit of visible pointer dereference.

use std::future::Future;
use std::pin::Pin;

use super::{BinaryTreeAdt, NodeId, ParentRef, Side};
use crate::adt::marks::Action;
use crate::pseudocode::CodeCursor;

/// Block name for [`BinaryTreeAdt::min`].
pub const MIN_BLOCK: &str = "bst-min";
/// Block name for [`BinaryTreeAdt::max`].
pub const MAX_BLOCK: &str = "bst-max";
/// Block name for [`BinaryTreeAdt::successor`].
pub const SUCCESSOR_BLOCK: &str = "bst-successor";
/// Block name for [`BinaryTreeAdt::predecessor`].
pub const PREDECESSOR_BLOCK: &str = "bst-predecessor";
/// Block name for [`BinaryTreeAdt::in_order`].
pub const IN_ORDER_BLOCK: &str = "bst-inorder";
/// Block name for [`BinaryTreeAdt::pre_order`].
pub const PRE_ORDER_BLOCK: &str = "bst-preorder";
/// Block name for [`BinaryTreeAdt::post_order`].
pub const POST_ORDER_BLOCK: &str = "bst-postorder";

const MIN_PSEUDO: &str = "
min(n):
  let m ← n
  while m.left ≠ nil:
    m ← m.left
  return m
";

const MAX_PSEUDO: &str = "
max(n):
  let m ← n
  while m.right ≠ nil:
    m ← m.right
  return m
";

const SUCCESSOR_PSEUDO: &str = "
successor(n):
  if n.right ≠ nil:
    return min(n.right)
  else:
    while parent(n) ≠ nil ⋀ n = parent(n).right:
      n ← parent(n)
    return parent(n)
";

const PREDECESSOR_PSEUDO: &str = "
predecessor(n):
  if n.left ≠ nil:
    return max(n.left)
  else:
    while parent(n) ≠ nil ⋀ n = parent(n).left:
      n ← parent(n)
    return parent(n)
";

const IN_ORDER_PSEUDO: &str = "
inorder(n ← T.root):
  if n.left ≠ nil:
    inorder(n.left)
  visit(n)
  if n.right ≠ nil:
    inorder(n.right)
";

const PRE_ORDER_PSEUDO: &str = "
preorder(n ← T.root):
  visit(n)
  if n.left ≠ nil:
    preorder(n.left)
  if n.right ≠ nil:
    preorder(n.right)
";

const POST_ORDER_PSEUDO: &str = "
postorder(n ← T.root):
  if n.left ≠ nil:
    postorder(n.left)
  if n.right ≠ nil:
    postorder(n.right)
  visit(n)
";

pub(crate) fn register_blocks(cursor: &CodeCursor) {
    cursor.register(MIN_BLOCK, MIN_PSEUDO);
    cursor.register(MAX_BLOCK, MAX_PSEUDO);
    cursor.register(SUCCESSOR_BLOCK, SUCCESSOR_PSEUDO);
    cursor.register(PREDECESSOR_BLOCK, PREDECESSOR_PSEUDO);
    cursor.register(IN_ORDER_BLOCK, IN_ORDER_PSEUDO);
    cursor.register(PRE_ORDER_BLOCK, PRE_ORDER_PSEUDO);
    cursor.register(POST_ORDER_BLOCK, POST_ORDER_PSEUDO);
}

impl<T: Clone> BinaryTreeAdt<T> {
    /// Leftmost node of the whole tree with its parent; `None` on an
    /// empty tree.
    pub async fn min(&mut self) -> Option<(NodeId, ParentRef)> {
        let root = self.root()?;
        Some(self.min_from(root, ParentRef::Root).await)
    }

    /// Leftmost node of the subtree under `node`, animated one step per
    /// followed edge.
    pub async fn min_from(&mut self, node: NodeId, parent: ParentRef) -> (NodeId, ParentRef) {
        self.extreme_from(node, parent, Side::Left, MIN_BLOCK).await
    }

    /// Rightmost node of the whole tree with its parent.
    pub async fn max(&mut self) -> Option<(NodeId, ParentRef)> {
        let root = self.root()?;
        Some(self.max_from(root, ParentRef::Root).await)
    }

    /// Rightmost node of the subtree under `node`.
    pub async fn max_from(&mut self, node: NodeId, parent: ParentRef) -> (NodeId, ParentRef) {
        self.extreme_from(node, parent, Side::Right, MAX_BLOCK).await
    }

    /// `min` and `max` are mirror images: follow one side via `get`
    /// until it runs out, driving entry, loop continuation, loop body,
    /// and exit lines of the block.
    async fn extreme_from(
        &mut self,
        node: NodeId,
        parent: ParentRef,
        side: Side,
        block: &str,
    ) -> (NodeId, ParentRef) {
        self.cursor.enter(block);
        self.act(Action::Peek, &[node]);
        self.step(1).await;

        let mut extreme = node;
        let mut parent = parent;
        self.cursor.run_at(2);
        while self.node(extreme).child(side).is_some() {
            self.cursor.run_at(3);
            match self.get(extreme, side).await {
                Some(next) => {
                    parent = ParentRef::Node(extreme);
                    extreme = next;
                }
                None => break,
            }
            self.cursor.run_at(2);
        }

        self.act(Action::Select, &[extreme]);
        self.step(4).await;
        (extreme, parent)
    }

    /// Node holding the next value in comparator order, or `None` when
    /// `node` holds the maximum.
    pub async fn successor(&mut self, node: NodeId) -> Option<NodeId> {
        self.neighbor(node, Side::Right, SUCCESSOR_BLOCK).await
    }

    /// Node holding the previous value in comparator order, or `None`
    /// when `node` holds the minimum.
    pub async fn predecessor(&mut self, node: NodeId) -> Option<NodeId> {
        self.neighbor(node, Side::Left, PREDECESSOR_BLOCK).await
    }

    /// Shared body of `successor` (side = right) and `predecessor`
    /// (side = left).
    ///
    /// With a subtree on `side`, the answer is the opposite extreme of
    /// that subtree. Otherwise ancestry is recovered by re-searching
    /// from the root (`search_node`, comparator-consistent placement
    /// required) and ancestors are popped while the current node is the
    /// `side` child; each pop is one animated step, and the walked
    /// edges stay linked until `restore`.
    async fn neighbor(&mut self, node: NodeId, side: Side, block: &str) -> Option<NodeId> {
        if let Some(value) = self.node(node).value.clone() {
            self.core.active(value);
            self.core.act_active(Action::Select, &[]);
        }
        self.act(Action::Select, &[node]);
        self.cursor.enter(block);
        self.step(1).await;

        if let Some(subtree) = self.node(node).child(side) {
            let (found, _) = match side {
                Side::Right => self.min_from(subtree, ParentRef::Node(node)).await,
                Side::Left => self.max_from(subtree, ParentRef::Node(node)).await,
            };
            if let Some(value) = self.node(found).value.clone() {
                self.core.active(value);
                self.core.act_active(Action::Select, &[]);
            }
            self.cursor.enter(block);
            self.step(2).await;
            return Some(found);
        }

        let mut path = self.search_node(node);
        let mut current = node;
        let mut parent = path.pop();
        if let Some(parent) = parent {
            self.act(Action::Peek, &[parent]);
        }
        self.cursor.run_at(4);
        while let Some(ancestor) = parent {
            if self.node(ancestor).child(side) != Some(current) {
                break;
            }
            self.link(ancestor, current, true);
            current = ancestor;
            parent = path.pop();
            if let Some(next) = parent {
                self.act(Action::Peek, &[next]);
            }
            self.step(5).await;
            self.cursor.run_at(4);
        }

        if let Some(found) = parent {
            self.act(Action::Select, &[found]);
            if let Some(value) = self.node(found).value.clone() {
                self.core.active(value);
                self.core.act_active(Action::Select, &[]);
            }
        }
        self.step(6).await;
        parent
    }

    /// In-order traversal from the root: left, visit, right. Each visit
    /// peek-tags the node, logs its value active, and suspends one tick.
    pub async fn in_order(&mut self) {
        if let Some(root) = self.root() {
            self.cursor.enter(IN_ORDER_BLOCK);
            self.in_order_from(root).await;
        }
    }

    fn in_order_from(&mut self, node: NodeId) -> Pin<Box<dyn Future<Output = ()> + '_>> {
        Box::pin(async move {
            self.cursor.run_at(1);
            if let Some(left) = self.left(node) {
                self.cursor.run_at(2);
                self.in_order_from(left).await;
            }
            self.cursor.run_at(3);
            self.visit(node).await;
            self.cursor.run_at(4);
            if let Some(right) = self.right(node) {
                self.cursor.run_at(5);
                self.in_order_from(right).await;
            }
        })
    }

    /// Pre-order traversal from the root: visit, left, right.
    pub async fn pre_order(&mut self) {
        if let Some(root) = self.root() {
            self.cursor.enter(PRE_ORDER_BLOCK);
            self.pre_order_from(root).await;
        }
    }

    fn pre_order_from(&mut self, node: NodeId) -> Pin<Box<dyn Future<Output = ()> + '_>> {
        Box::pin(async move {
            self.cursor.run_at(1);
            self.visit(node).await;
            self.cursor.run_at(2);
            if let Some(left) = self.left(node) {
                self.cursor.run_at(3);
                self.pre_order_from(left).await;
            }
            self.cursor.run_at(4);
            if let Some(right) = self.right(node) {
                self.cursor.run_at(5);
                self.pre_order_from(right).await;
            }
        })
    }

    /// Post-order traversal from the root: left, right, visit.
    pub async fn post_order(&mut self) {
        if let Some(root) = self.root() {
            self.cursor.enter(POST_ORDER_BLOCK);
            self.post_order_from(root).await;
        }
    }

    fn post_order_from(&mut self, node: NodeId) -> Pin<Box<dyn Future<Output = ()> + '_>> {
        Box::pin(async move {
            self.cursor.run_at(1);
            if let Some(left) = self.left(node) {
                self.cursor.run_at(2);
                self.post_order_from(left).await;
            }
            self.cursor.run_at(3);
            if let Some(right) = self.right(node) {
                self.cursor.run_at(4);
                self.post_order_from(right).await;
            }
            self.cursor.run_at(5);
            self.visit(node).await;
        })
    }

    /// The traversal visit point: peek-tag, log active, suspend.
    async fn visit(&mut self, node: NodeId) {
        self.act(Action::Peek, &[node]);
        if let Some(value) = self.node(node).value.clone() {
            self.core.active(value);
        }
        self.core.doze(1.0).await;
    }
}
