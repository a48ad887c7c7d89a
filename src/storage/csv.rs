//! CSV file backend.
//!
//! One row per record with a header line, schema
//! `operand_a,operand_b,operation,result`. The whole file is rewritten on
//! every save; history is small enough that this stays cheap.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{PersistenceBackend, StorageResult};
use crate::history::HistoryRecord;

pub struct CsvBackend {
    path: PathBuf,
}

impl CsvBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PersistenceBackend for CsvBackend {
    fn save(&self, records: &[HistoryRecord]) -> StorageResult<PathBuf> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        debug!(target: "decalc::storage", "wrote {} record(s) to {}", records.len(), self.path.display());
        Ok(self.path.clone())
    }

    fn load(&self) -> StorageResult<Vec<HistoryRecord>> {
        if !self.path.exists() {
            debug!(target: "decalc::storage", "{} does not exist, loading nothing", self.path.display());
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
