//! Display-state vocabulary
//!
//! Closed enumerations describing why an element is currently interesting:
//! what the algorithm just did to it (`Action`), how it compared
//! (`CompareState`), and any structural role worth calling out
//! (`Attribute`). Pure data; renderers poll these fields, the engine
//! guarantees they are always one of the listed values.

/// Per-element highlight describing the most recent operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum Action {
    /// Not currently highlighted
    #[default]
    None,

    /// Element was read (visible pointer dereference)
    Peek,

    /// Element is the current focus of the algorithm
    Select,

    /// Element was just written
    Update,
}

/// Visual outcome of the most recent comparison against an element.
///
/// Distinct from the numeric comparison result: on a tie the engine
/// reports `Equal` or `GreaterOrEqual` depending on whether the caller
/// asked for ties to be marked, while the returned `Ordering` is always
/// exactly `Equal`. Callers branch on the numeric value; this state
/// exists only for the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum CompareState {
    /// No comparison recorded
    #[default]
    None,

    /// Probe value compared less than the element
    Less,

    /// Probe value compared greater than the element
    Greater,

    /// Tie, displayed as "would continue right" (search shortcut)
    GreaterOrEqual,

    /// Tie, displayed as "found"
    Equal,
}

/// Structural role tag, display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum Attribute {
    /// No special role
    #[default]
    None,

    /// Root of the tree
    Root,

    /// Leaf node (no present children)
    Leaf,

    /// Boundary between the sorted prefix and unsorted suffix
    Partition,
}

/// Which end of a highlighted relation an element sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum Endpoint {
    /// Origin of the highlighted edge
    From,

    /// Destination of the highlighted edge
    To,
}

/// Edge-highlight marker shared by the two endpoints of a relation.
///
/// Both endpoints carry the same `relation` id so a renderer can group
/// them; `endpoint` distinguishes direction explicitly (no fractional
/// offsets encoded in a float). "Unlinked" is the absence of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct EdgeTag {
    /// Identifier shared by the endpoints of one highlighted relation
    pub relation: u32,

    /// Which end of the relation this element is
    pub endpoint: Endpoint,

    /// Whether the relation should be drawn with a direction
    pub directional: bool,
}

/// Value-level display record, used when the value of interest is not
/// attached to exactly one structural element (e.g. showing a node and
/// its eventual successor simultaneously).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ValueItem<T> {
    /// The logged value
    pub value: T,

    /// Current highlight on the log entry
    pub action: Action,

    /// Comparison state on the log entry
    pub state: CompareState,

    /// Structural tag on the log entry
    pub attribute: Attribute,
}

impl<T> ValueItem<T> {
    /// Log entry with all marks cleared.
    pub fn new(value: T) -> Self {
        Self {
            value,
            action: Action::None,
            state: CompareState::None,
            attribute: Attribute::None,
        }
    }
}

/// Mutable access to the three display marks, shared by tree nodes and
/// array cells so the generic base can bulk-tag either shape.
pub trait Tagged {
    /// Current action highlight
    fn action_mut(&mut self) -> &mut Action;

    /// Current comparison state
    fn state_mut(&mut self) -> &mut CompareState;

    /// Current structural tag
    fn attribute_mut(&mut self) -> &mut Attribute;

    /// Reset all three marks to their quiet values.
    fn clear_marks(&mut self) {
        *self.action_mut() = Action::None;
        *self.state_mut() = CompareState::None;
        *self.attribute_mut() = Attribute::None;
    }
}

impl<T> Tagged for ValueItem<T> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_marks() {
        let mut item = ValueItem::new(42);
        item.action = Action::Select;
        item.state = CompareState::Less;
        item.attribute = Attribute::Root;

        item.clear_marks();

        assert_eq!(item.action, Action::None);
        assert_eq!(item.state, CompareState::None);
        assert_eq!(item.attribute, Attribute::None);
    }

    #[test]
    fn test_default_marks_are_quiet() {
        assert_eq!(Action::default(), Action::None);
        assert_eq!(CompareState::default(), CompareState::None);
        assert_eq!(Attribute::default(), Attribute::None);
    }
}
