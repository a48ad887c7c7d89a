//! Calculation history with observer notification.
//!
//! [`HistoryStore`] keeps an ordered log of flattened calculation records.
//! The sequence is only ever appended to (`add`) or replaced wholesale
//! (`restore`, `clear`, `load`); it is never spliced. Every `add`
//! synchronously notifies the registered observers in registration order.

pub mod memento;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::Calculation;
use crate::storage::{PersistenceBackend, StorageResult};

pub use memento::{Caretaker, Memento};

/// One history row, flattened to display-ready strings. This is also the
/// CSV schema used by the persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub operand_a: String,
    pub operand_b: String,
    pub operation: String,
    pub result: String,
}

impl From<&Calculation> for HistoryRecord {
    fn from(calc: &Calculation) -> Self {
        Self {
            operand_a: calc.operand_a.to_string(),
            operand_b: calc.operand_b.to_string(),
            operation: calc.operation_name().to_string(),
            result: calc.result.to_string(),
        }
    }
}

/// Reacts to each new calculation. Called synchronously on the thread that
/// performed the `add`; a slow observer delays the caller.
pub trait CalculationObserver {
    fn on_calculation(&mut self, calc: &Calculation, records: &[HistoryRecord]);
}

/// Logs each calculation through `tracing`.
#[derive(Default)]
pub struct LoggingObserver;

impl LoggingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl CalculationObserver for LoggingObserver {
    fn on_calculation(&mut self, calc: &Calculation, _records: &[HistoryRecord]) {
        info!(target: "decalc::history", "Calculation: {calc}");
    }
}

/// Rewrites the history file after every calculation.
///
/// Owns its own backend on the configured path; save failures are logged,
/// not propagated, so one bad write never aborts the session.
pub struct AutoSaveObserver<B: PersistenceBackend> {
    backend: B,
}

impl<B: PersistenceBackend> AutoSaveObserver<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: PersistenceBackend> CalculationObserver for AutoSaveObserver<B> {
    fn on_calculation(&mut self, _calc: &Calculation, records: &[HistoryRecord]) {
        if let Err(e) = self.backend.save(records) {
            warn!(target: "decalc::history", "auto-save failed: {e}");
        }
    }
}

/// Ordered, observable log of calculation records.
pub struct HistoryStore {
    records: Vec<HistoryRecord>,
    observers: Vec<Box<dyn CalculationObserver>>,
    backend: Box<dyn PersistenceBackend>,
    max_records: usize,
}

impl HistoryStore {
    pub fn new(backend: Box<dyn PersistenceBackend>, max_records: usize) -> Self {
        Self {
            records: Vec::new(),
            observers: Vec::new(),
            backend,
            max_records,
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn CalculationObserver>) {
        self.observers.push(observer);
    }

    /// Append a record and notify every observer, in registration order.
    pub fn add(&mut self, calc: &Calculation) {
        self.records.push(HistoryRecord::from(calc));
        let records = &self.records;
        for observer in &mut self.observers {
            observer.on_calculation(calc, records);
        }
    }

    /// All records, insertion order.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Immutable deep copy of the current record sequence.
    pub fn snapshot(&self) -> Memento {
        Memento::new(self.records.clone())
    }

    /// Replace all records wholesale from a memento.
    pub fn restore(&mut self, memento: Memento) {
        self.records = memento.into_records();
    }

    /// Empty the record sequence. Callers wanting this undoable must
    /// snapshot first.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Persist all records through the backend; returns the location.
    pub fn save(&self) -> StorageResult<PathBuf> {
        self.backend.save(&self.records)
    }

    /// Replace contents from the backend; returns the number of records
    /// kept. A missing file loads zero records without error. Only the
    /// most recent `max_records` rows are retained.
    pub fn load(&mut self) -> StorageResult<usize> {
        let mut loaded = self.backend.load()?;
        if loaded.len() > self.max_records {
            loaded.drain(..loaded.len() - self.max_records);
        }
        self.records = loaded;
        Ok(self.records.len())
    }

    /// Where the backend persists to, for user feedback.
    pub fn location(&self) -> PathBuf {
        self.backend.location().to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::CalculationFactory;
    use crate::storage::CsvBackend;
    use rust_decimal::Decimal;

    fn store() -> HistoryStore {
        // Backend pointing into a fresh temp dir; most tests never touch it.
        let dir = tempfile::tempdir().unwrap();
        HistoryStore::new(
            Box::new(CsvBackend::new(dir.keep().join("history.csv"))),
            1000,
        )
    }

    fn calc(a: &str, b: &str, op: &str) -> Calculation {
        CalculationFactory::create(a.parse().unwrap(), b.parse().unwrap(), op).unwrap()
    }

    #[test]
    fn test_add_appends_in_insertion_order() {
        let mut store = store();
        store.add(&calc("1", "2", "add"));
        store.add(&calc("10", "4", "subtract"));

        let records = store.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].operation, "add");
        assert_eq!(records[0].result, "3");
        assert_eq!(records[1].operation, "subtract");
        assert_eq!(records[1].result, "6");
    }

    #[test]
    fn test_unary_record_flattening() {
        let mut store = store();
        store.add(&CalculationFactory::create("9".parse().unwrap(), Decimal::ZERO, "sqrt").unwrap());

        let rec = &store.records()[0];
        assert_eq!(rec.operand_a, "9");
        assert_eq!(rec.operand_b, "0");
        assert_eq!(rec.operation, "sqrt");
        assert_eq!(rec.result, "3");
    }

    #[test]
    fn test_observers_notified_in_registration_order() {
        struct Tagger {
            tag: &'static str,
            seen: std::rc::Rc<std::cell::RefCell<Vec<&'static str>>>,
        }
        impl CalculationObserver for Tagger {
            fn on_calculation(&mut self, _calc: &Calculation, _records: &[HistoryRecord]) {
                self.seen.borrow_mut().push(self.tag);
            }
        }

        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let mut store = store();
        store.add_observer(Box::new(Tagger { tag: "first", seen: seen.clone() }));
        store.add_observer(Box::new(Tagger { tag: "second", seen: seen.clone() }));

        store.add(&calc("1", "1", "add"));
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_mutation() {
        let mut store = store();
        store.add(&calc("1", "2", "add"));
        let memento = store.snapshot();

        store.add(&calc("2", "2", "add"));
        assert_eq!(store.len(), 2);
        assert_eq!(memento.len(), 1);

        store.restore(memento);
        assert_eq!(store.len(), 1);
        assert_eq!(store.records()[0].result, "3");
    }

    #[test]
    fn test_clear_empties_records() {
        let mut store = store();
        store.add(&calc("1", "2", "add"));
        store.clear();
        assert!(store.is_empty());
    }
}
