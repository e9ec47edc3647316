//! Generic animated ADT base
//!
//! [`AdtCore`] holds the state every animated structure shares: the
//! append-only log of "active" values currently in flight in the
//! visualization, a monotonic version published after each mutation so
//! renderers know when to redraw, and the injected suspension pacer.
//! Structure-shaped state (tree arena, cell array) lives in the
//! embedding type; the core never blocks on its own.

pub mod marks;

use std::cmp::Ordering;
use std::sync::Arc;

use tokio::sync::watch;

use crate::pacing::Pacer;
use marks::{Action, ValueItem};

/// Default three-way comparator for ordered values.
pub(crate) fn default_compare<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// Inverse record returned by a bulk `act` call: the previous action of
/// every tagged element, so a caller can temporarily highlight a set of
/// elements and later restore them exactly.
#[derive(Debug)]
pub struct ActionUndo<K>(pub(crate) Vec<(K, Action)>);

/// Shared state of an animated structure.
#[derive(Debug)]
pub struct AdtCore<T> {
    actives: Vec<ValueItem<T>>,
    version: u64,
    changes: watch::Sender<u64>,
    pacer: Arc<Pacer>,
}

impl<T: Clone> AdtCore<T> {
    /// Fresh core using the given pacer for suspensions.
    pub fn new(pacer: Arc<Pacer>) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            actives: Vec::new(),
            version: 0,
            changes,
            pacer,
        }
    }

    /// The injected suspension primitive.
    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    /// Suspend one visualization step, scaled by the current speed.
    pub async fn doze(&self, scale: f64) {
        self.pacer.doze(scale).await;
    }

    /// Snapshot version, bumped by every mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Observe version bumps; renderers poll structure state on change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Record a mutation: bump the version and notify observers.
    pub fn touch(&mut self) {
        self.version += 1;
        let _ = self.changes.send_replace(self.version);
    }

    /// Values currently in flight in the visualization.
    pub fn actives(&self) -> &[ValueItem<T>] {
        &self.actives
    }

    /// Append a value to the active log.
    pub fn active(&mut self, value: T) {
        self.actives.push(ValueItem::new(value));
        self.touch();
    }

    /// Tag active-log entries; an empty index set targets the latest.
    pub fn act_active(&mut self, action: Action, indexes: &[usize]) {
        if self.actives.is_empty() {
            return;
        }
        if indexes.is_empty() {
            if let Some(last) = self.actives.last_mut() {
                last.action = action;
            }
        } else {
            for &index in indexes {
                if let Some(item) = self.actives.get_mut(index) {
                    item.action = action;
                }
            }
        }
        self.touch();
    }

    /// Empty the active log (part of the canonical reset).
    pub fn clear_actives(&mut self) {
        self.actives.clear();
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core() -> AdtCore<i32> {
        AdtCore::new(Arc::new(Pacer::instant()))
    }

    #[test]
    fn test_active_log_appends_in_order() {
        let mut core = core();
        core.active(3);
        core.active(7);

        let values: Vec<i32> = core.actives().iter().map(|item| item.value).collect();
        assert_eq!(values, vec![3, 7]);
    }

    #[test]
    fn test_act_active_defaults_to_latest() {
        let mut core = core();
        core.active(1);
        core.active(2);

        core.act_active(Action::Select, &[]);
        assert_eq!(core.actives()[1].action, Action::Select);
        assert_eq!(core.actives()[0].action, Action::None);

        core.act_active(Action::Peek, &[0]);
        assert_eq!(core.actives()[0].action, Action::Peek);
    }

    #[test]
    fn test_version_is_monotonic_and_published() {
        let mut core = core();
        let rx = core.subscribe();

        let before = core.version();
        core.active(5);
        core.clear_actives();

        assert!(core.version() > before);
        assert_eq!(*rx.borrow(), core.version());
    }
}
