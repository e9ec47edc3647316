//! Animated sort ADT
//!
//! The tree ADT's tagging/suspension contract applied to a flat
//! sequence: comparisons and relocations tag the affected positions,
//! suspend one visualization tick, and drive the active pseudocode
//! block. Algorithms live beside the ADT (insertion sort in
//! [`insertion`]).

pub mod insertion;

pub use insertion::{insertion_sort, SortRun, INSERTION_SORT_BLOCK};

use std::cmp::Ordering;
use std::sync::Arc;

use crate::adt::marks::{Action, Attribute, CompareState, Tagged, ValueItem};
use crate::adt::{default_compare, ActionUndo, AdtCore};
use crate::pacing::Pacer;
use crate::pseudocode::CodeCursor;

/// One array position with its display marks.
#[derive(Debug, Clone)]
pub struct SortCell<T> {
    /// Element at this position
    pub value: T,

    /// Current highlight
    pub action: Action,

    /// Most recent comparison outcome
    pub state: CompareState,

    /// Structural role tag (e.g. the sorted-prefix boundary)
    pub attribute: Attribute,
}

impl<T> SortCell<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            action: Action::None,
            state: CompareState::None,
            attribute: Attribute::None,
        }
    }
}

impl<T> Tagged for SortCell<T> {
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

/// Animated array-to-be-sorted.
#[derive(Debug)]
pub struct SortAdt<T> {
    cells: Vec<SortCell<T>>,
    core: AdtCore<T>,
    cursor: CodeCursor,
    compare: fn(&T, &T) -> Ordering,
}

impl<T: Clone + Ord> SortAdt<T> {
    /// Array ordered by `T`'s natural order.
    pub fn new(values: Vec<T>, pacer: Arc<Pacer>, cursor: CodeCursor) -> Self {
        Self::with_compare(values, pacer, cursor, default_compare::<T>)
    }
}

impl<T: Clone> SortAdt<T> {
    /// Array ordered by an explicit comparator.
    ///
    /// Registers the sort pseudocode blocks against `cursor`.
    pub fn with_compare(
        values: Vec<T>,
        pacer: Arc<Pacer>,
        cursor: CodeCursor,
        compare: fn(&T, &T) -> Ordering,
    ) -> Self {
        insertion::register_blocks(&cursor);
        Self {
            cells: values.into_iter().map(SortCell::new).collect(),
            core: AdtCore::new(pacer),
            cursor,
            compare,
        }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the array is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read a cell; renderers poll marks through this.
    pub fn cell(&self, index: usize) -> &SortCell<T> {
        &self.cells[index]
    }

    /// Current element order.
    pub fn values(&self) -> Vec<T> {
        self.cells.iter().map(|cell| cell.value.clone()).collect()
    }

    /// Shared base state (actives log, version, pacer).
    pub fn core(&self) -> &AdtCore<T> {
        &self.core
    }

    /// Value-level display log.
    pub fn actives(&self) -> &[ValueItem<T>] {
        self.core.actives()
    }

    /// Pseudocode cursor this array drives.
    pub fn cursor(&self) -> &CodeCursor {
        &self.cursor
    }

    /// Bulk-tag positions with an action; returns the inverse record.
    pub fn act(&mut self, action: Action, targets: &[usize]) -> ActionUndo<usize> {
        let mut previous = Vec::with_capacity(targets.len());
        for &index in targets {
            let cell = &mut self.cells[index];
            previous.push((index, cell.action));
            cell.action = action;
        }
        self.core.touch();
        ActionUndo(previous)
    }

    /// Restore the highlights recorded by a previous [`act`](Self::act).
    pub fn undo_act(&mut self, undo: ActionUndo<usize>) {
        for (index, action) in undo.0 {
            self.cells[index].action = action;
        }
        self.core.touch();
    }

    /// Three-way comparison of the elements at `i` and `j`.
    ///
    /// Peek-tags both positions for the half-length tick, records the
    /// visual outcome on position `i`, and returns the exact
    /// [`Ordering`] for the caller to branch on.
    pub async fn compare(&mut self, i: usize, j: usize) -> Ordering {
        let undo = self.act(Action::Peek, &[i, j]);
        let result = (self.compare)(&self.cells[i].value, &self.cells[j].value);
        self.cells[i].state = match result {
            Ordering::Less => CompareState::Less,
            Ordering::Greater => CompareState::Greater,
            Ordering::Equal => CompareState::Equal,
        };
        self.core.touch();
        self.core.doze(0.5).await;
        self.undo_act(undo);
        result
    }

    /// Relocate the element at `i` to sit just before the element
    /// currently at `j`, shifting the in-between elements over.
    ///
    /// The moved element is update-tagged, the shifted ones
    /// select-tagged, for one tick.
    pub async fn move_before(&mut self, i: usize, j: usize) {
        let cell = self.cells.remove(i);
        let dest = if j > i { j - 1 } else { j };
        self.cells.insert(dest, cell);

        let (low, high) = if dest <= i { (dest, i) } else { (i, dest) };
        let shifted: Vec<usize> = (low..=high).filter(|&index| index != dest).collect();
        self.act(Action::Select, &shifted);
        self.act(Action::Update, &[dest]);
        self.core.doze(1.0).await;

        let affected: Vec<usize> = (low..=high).collect();
        self.act(Action::None, &affected);
    }

    /// Mark position `i` as the boundary between the sorted prefix and
    /// the unsorted suffix. Display only; any previous boundary mark is
    /// cleared.
    pub fn partition(&mut self, i: usize) {
        for cell in &mut self.cells {
            if cell.attribute == Attribute::Partition {
                cell.attribute = Attribute::None;
            }
        }
        self.cells[i].attribute = Attribute::Partition;
        self.core.touch();
    }

    /// Clear every position's marks and the active log; the canonical
    /// reset between runs, mirroring the tree's `restore`.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.clear_marks();
        }
        self.core.clear_actives();
    }
}
