//! Pseudocode registry and cursor
//!
//! Algorithms register a named block of pseudocode (one statement per
//! line, indentation is display-only nesting) and drive a highlighted
//! line index in lockstep with their own progress. The cursor position
//! is published over a watch channel so a renderer can observe every
//! move; within the engine the calls are fire-and-forget.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::pacing::Pacer;
use crate::VisError;

/// Normalize raw pseudocode text: strip the common leading indent and
/// drop blank lines, keeping one statement per line. Relative
/// indentation survives so nesting still displays.
pub fn normalize(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect();

    let indent = lines
        .iter()
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| line.get(indent..).unwrap_or("").to_string())
        .collect()
}

/// A registered pseudocode block.
#[derive(Debug, Clone)]
pub struct CodeBlock {
    /// Display name the block was registered under
    pub name: String,

    /// Normalized lines; cursor indices refer to this vector
    pub lines: Vec<String>,
}

/// Position of the highlight: a block name and a zero-based line index
/// into its normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPos {
    /// Active block name
    pub block: String,

    /// Highlighted line index
    pub line: usize,
}

#[derive(Debug)]
struct CursorShared {
    blocks: Mutex<HashMap<String, CodeBlock>>,
    position: watch::Sender<Option<CursorPos>>,
}

/// Cheaply cloneable handle to the registry and the highlight cursor.
///
/// Structures registered against the same cursor share one highlight;
/// operations are invoked sequentially, so the active block is always
/// the one belonging to the operation currently running.
#[derive(Debug, Clone)]
pub struct CodeCursor {
    shared: Arc<CursorShared>,
}

impl CodeCursor {
    /// Empty registry with no active block.
    pub fn new() -> Self {
        let (position, _) = watch::channel(None);
        Self {
            shared: Arc::new(CursorShared {
                blocks: Mutex::new(HashMap::new()),
                position,
            }),
        }
    }

    /// Register (or replace) a named block from raw text.
    pub fn register(&self, name: &str, text: &str) {
        let block = CodeBlock {
            name: name.to_string(),
            lines: normalize(text),
        };
        self.shared
            .blocks
            .lock()
            .expect("pseudocode registry poisoned")
            .insert(name.to_string(), block);
    }

    /// Look up a registered block, for display by the driver.
    pub fn block(&self, name: &str) -> Result<CodeBlock, VisError> {
        self.shared
            .blocks
            .lock()
            .expect("pseudocode registry poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| VisError::UnknownBlock(name.to_string()))
    }

    /// Activate a block, highlighting its header line.
    ///
    /// Fire-and-forget: an unregistered name logs a warning and leaves
    /// the cursor dark rather than failing the running algorithm.
    pub fn enter(&self, name: &str) {
        let known = self
            .shared
            .blocks
            .lock()
            .expect("pseudocode registry poisoned")
            .contains_key(name);

        if !known {
            tracing::warn!(block = name, "entering unregistered pseudocode block");
            let _ = self.shared.position.send_replace(None);
            return;
        }

        let _ = self.shared.position.send_replace(Some(CursorPos {
            block: name.to_string(),
            line: 0,
        }));
    }

    /// Move the highlight within the active block. No-op when no block
    /// is active.
    pub fn run_at(&self, line: usize) {
        self.shared.position.send_if_modified(|pos| match pos {
            Some(pos) if pos.line != line => {
                pos.line = line;
                true
            }
            _ => false,
        });
    }

    /// Awaited variant: the highlight move itself is the suspension
    /// point for this step.
    pub async fn step_at(&self, line: usize, pacer: &Pacer) {
        self.run_at(line);
        pacer.doze(1.0).await;
    }

    /// Current highlight position, if any block is active.
    pub fn position(&self) -> Option<CursorPos> {
        self.shared.position.borrow().clone()
    }

    /// Observe every cursor move.
    pub fn subscribe(&self) -> watch::Receiver<Option<CursorPos>> {
        self.shared.position.subscribe()
    }
}

impl Default for CodeCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: &str = "
    min(n):
      let m ← n

      while m.left ≠ nil:
        m ← m.left
      return m
    ";

    #[test]
    fn test_normalize_dedents_and_drops_blanks() {
        let lines = normalize(BLOCK);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "min(n):");
        assert_eq!(lines[1], "  let m ← n");
        assert_eq!(lines[4], "  return m");
    }

    #[test]
    fn test_enter_and_run_at() {
        let cursor = CodeCursor::new();
        cursor.register("min", BLOCK);

        cursor.enter("min");
        assert_eq!(
            cursor.position(),
            Some(CursorPos {
                block: "min".to_string(),
                line: 0
            })
        );

        cursor.run_at(3);
        assert_eq!(cursor.position().map(|pos| pos.line), Some(3));
    }

    #[test]
    fn test_unknown_block_is_fire_and_forget() {
        let cursor = CodeCursor::new();
        cursor.enter("missing");
        assert_eq!(cursor.position(), None);

        // The highlight stays dark rather than pointing into nothing.
        cursor.run_at(2);
        assert_eq!(cursor.position(), None);

        assert!(cursor.block("missing").is_err());
    }

    #[test]
    fn test_subscriber_sees_moves() {
        let cursor = CodeCursor::new();
        cursor.register("min", BLOCK);
        let rx = cursor.subscribe();

        cursor.enter("min");
        cursor.run_at(2);

        assert_eq!(rx.borrow().as_ref().map(|pos| pos.line), Some(2));
    }
}
