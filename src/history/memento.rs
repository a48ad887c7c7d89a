//! Undo/redo over history snapshots.
//!
//! [`Memento`] is a deep copy of the record sequence at a point in time;
//! [`Caretaker`] owns the undo and redo stacks. The caretaker never holds
//! the store, it borrows it per call, so ownership stays with the facade.

use super::{HistoryRecord, HistoryStore};

/// Immutable snapshot of the history state. Exclusively owned by the stack
/// that holds it; later mutation of the live store cannot touch it.
#[derive(Debug, Clone)]
pub struct Memento {
    records: Vec<HistoryRecord>,
}

impl Memento {
    pub(crate) fn new(records: Vec<HistoryRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn into_records(self) -> Vec<HistoryRecord> {
        self.records
    }
}

/// Linear undo/redo stacks over [`Memento`] snapshots.
///
/// `save` must run before any mutating action so the pre-mutation state is
/// what an undo returns to. A fresh `save` discards the redo stack: redo
/// is only valid immediately after an undo, with no new action between.
#[derive(Default)]
pub struct Caretaker {
    undo_stack: Vec<Memento>,
    redo_stack: Vec<Memento>,
}

impl Caretaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current store state ahead of a mutation.
    pub fn save(&mut self, store: &HistoryStore) {
        self.undo_stack.push(store.snapshot());
        self.redo_stack.clear();
    }

    /// Restore the previous state. Returns false (and changes nothing)
    /// when there is nothing to undo.
    pub fn undo(&mut self, store: &mut HistoryStore) -> bool {
        let Some(memento) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(store.snapshot());
        store.restore(memento);
        true
    }

    /// Re-apply the most recently undone state. Returns false when there
    /// is nothing to redo.
    pub fn redo(&mut self, store: &mut HistoryStore) -> bool {
        let Some(memento) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(store.snapshot());
        store.restore(memento);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
