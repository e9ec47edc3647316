//! # Animated ADT engine
//!
//! This library animates classic algorithms (binary-tree operations,
//! comparison sorts) for pedagogical visualization. It wraps a backing
//! data structure in an instrumented API where every mutating or
//! comparing operation:
//!
//! 1. updates the logical state,
//! 2. tags the affected elements with a display state,
//! 3. cooperatively suspends so the step becomes observable,
//! 4. advances a synchronized pseudocode cursor.
//!
//! Rendering, speed control, and the driving run loop are external
//! collaborators: the engine only publishes mark fields and cursor
//! positions, and awaits the injected [`Pacer`] between steps.
//!
//! ## Usage Example
//!
//! ```
//! use std::sync::Arc;
//! use stepvis::{BinaryTreeAdt, CodeCursor, Pacer};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let pacer = Arc::new(Pacer::instant());
//! let cursor = CodeCursor::new();
//! let mut tree = BinaryTreeAdt::new(pacer, cursor);
//!
//! tree.replace([5, 3, 8, 1], true);
//! tree.in_order().await;
//!
//! let visited: Vec<i32> = tree.actives().iter().map(|item| item.value).collect();
//! assert_eq!(visited, vec![1, 3, 5, 8]);
//! tree.restore();
//! # }
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules - each implements one component of the engine
pub mod adt; // generic animated ADT base + display vocabulary
pub mod pacing; // step suspension primitive
pub mod pseudocode; // pseudocode registry and cursor
pub mod sort; // array-shaped ADT + insertion sort
pub mod tree; // generic binary tree ADT

// Re-exports for convenience
pub use adt::marks::{Action, Attribute, CompareState, EdgeTag, Endpoint, Tagged, ValueItem};
pub use adt::{ActionUndo, AdtCore};
pub use pacing::Pacer;
pub use pseudocode::{CodeBlock, CodeCursor, CursorPos};
pub use sort::{insertion_sort, SortAdt, SortCell, SortRun, INSERTION_SORT_BLOCK};
pub use tree::{BinaryTreeAdt, NodeId, ParentRef, Side, TreeNode};

use thiserror::Error;

/// Errors surfaced at the engine's boundary.
///
/// The engine itself operates over well-formed in-memory structures
/// built by its own constructors and has no recoverable-error taxonomy;
/// the one fallible edge is looking up a pseudocode block for display.
#[derive(Error, Debug)]
pub enum VisError {
    /// No pseudocode block registered under this name
    #[error("unknown pseudocode block: {0}")]
    UnknownBlock(String),
}
