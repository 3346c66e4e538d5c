//! Observable Registry
//!
//! Ordered, append-only collection of every observable a context created.
//! Insertion order is registration order, and scans walk it in that order
//! so runs are reproducible.
//!
//! # Scanning
//!
//! [`Registry::scan`] snapshots the length when the scan starts and takes
//! the read lock once per step, never across a step. Checking an observable
//! can start a load whose side effects register more elements; those land
//! after the snapshot and are not visited by the scan in progress.
//!
//! Entries are never removed. A long-lived page keeps every observable it
//! ever attached.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::observable::{Observable, ObservableId};

#[derive(Default)]
pub struct Registry {
    entries: RwLock<IndexMap<ObservableId, Arc<Observable>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `observable`. The caller guarantees it is not already present.
    pub fn register(&self, observable: Arc<Observable>) {
        self.entries.write().insert(observable.id(), observable);
    }

    pub fn get(&self, id: ObservableId) -> Option<Arc<Observable>> {
        self.entries.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Lazily walk the entries present right now, in registration order.
    pub fn scan(&self) -> RegistryScan<'_> {
        RegistryScan {
            registry: self,
            next: 0,
            end: self.len(),
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("len", &self.len()).finish()
    }
}

/// Iterator returned by [`Registry::scan`].
pub struct RegistryScan<'a> {
    registry: &'a Registry,
    next: usize,
    end: usize,
}

impl Iterator for RegistryScan<'_> {
    type Item = Arc<Observable>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let entry = self
            .registry
            .entries
            .read()
            .get_index(self.next)
            .map(|(_, observable)| Arc::clone(observable));
        self.next += 1;
        entry
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}
