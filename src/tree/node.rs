//! Arena-backed binary tree node
//!
//! Nodes live in a flat arena owned by their tree and address each other
//! by copyable [`NodeId`]s. Ownership is strictly downward: children are
//! reachable from their parent, there is no back-reference, and ancestry
//! is recomputed by re-walking from the root when needed (a deliberate
//! simplicity/memory tradeoff).

use std::fmt;

use crate::adt::marks::{Action, Attribute, CompareState, EdgeTag, Tagged};

/// Index of a node within its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Arena slot of this node.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which child slot of a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Child slot 0
    Left,

    /// Child slot 1
    Right,
}

impl Side {
    /// Slot index within the children array.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Mirror side.
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Explicit "parent of" reference: either a real node or the slot above
/// the root. Lets child-replacement be written uniformly whether the
/// target is the root or an interior node, without a magic sentinel
/// object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentRef {
    /// The position above the root
    Root,

    /// A real interior parent
    Node(NodeId),
}

impl ParentRef {
    /// Whether this reference stands above the root.
    pub fn is_root(self) -> bool {
        matches!(self, ParentRef::Root)
    }
}

/// One tree element with its display marks.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    /// Payload; empty only mid-rebuild, before the in-order assignment
    pub value: Option<T>,

    /// Child slots, left then right
    pub(crate) children: [Option<NodeId>; 2],

    /// Depth below the root, display-only
    pub level: u32,

    /// Current highlight
    pub action: Action,

    /// Most recent comparison outcome
    pub state: CompareState,

    /// Structural role tag
    pub attribute: Attribute,

    /// Edge-highlight marker; `None` means unlinked
    pub tag: Option<EdgeTag>,
}

impl<T> TreeNode<T> {
    pub(crate) fn new(value: Option<T>) -> Self {
        Self {
            value,
            children: [None, None],
            level: 0,
            action: Action::None,
            state: CompareState::None,
            attribute: Attribute::None,
            tag: None,
        }
    }

    /// Child on the given side.
    #[inline]
    pub fn child(&self, side: Side) -> Option<NodeId> {
        self.children[side.index()]
    }

    /// Both child slots, left then right.
    pub fn children(&self) -> [Option<NodeId>; 2] {
        self.children
    }

    /// No present children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

impl<T> Tagged for TreeNode<T> {
    fn action_mut(&mut self) -> &mut Action {
        &mut self.action
    }

    fn state_mut(&mut self) -> &mut CompareState {
        &mut self.state
    }

    fn attribute_mut(&mut self) -> &mut Attribute {
        &mut self.attribute
    }
}
