pub mod calculation;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod ops;
pub mod repl;
pub mod storage;
pub mod validate;

pub use calculation::{Calculation, CalculationFactory};
pub use config::{ConfigError, LoggingConfig, Settings};
pub use error::{CalcError, CalcResult};
pub use history::{
    AutoSaveObserver, CalculationObserver, Caretaker, HistoryRecord, HistoryStore,
    LoggingObserver, Memento,
};
pub use repl::Calculator;
pub use storage::{CsvBackend, PersistenceBackend, StorageError};
