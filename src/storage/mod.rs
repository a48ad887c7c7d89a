//! History persistence.
//!
//! The store talks to its storage through the [`PersistenceBackend`]
//! trait; the only shipped implementation is the CSV file backend. A
//! nonexistent resource is not an error on load, it just yields no
//! records.

pub mod csv;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::history::HistoryRecord;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Blocking persistence port for history records. No concurrent writers
/// are assumed.
pub trait PersistenceBackend {
    /// Write all records, replacing whatever was stored. Returns the
    /// location written to.
    fn save(&self, records: &[HistoryRecord]) -> StorageResult<PathBuf>;

    /// Read all records; a missing resource yields an empty list.
    fn load(&self) -> StorageResult<Vec<HistoryRecord>>;

    /// Where this backend reads and writes.
    fn location(&self) -> &Path;
}

pub use csv::CsvBackend;
