//! Durable string-keyed record backends
//!
//! Abstracts where the two collection records live so the collections
//! logic works the same on disk and in tests.

use crate::error::Result;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable string-keyed record storage
///
/// Records are read once at startup and rewritten wholesale on every
/// mutation, so the interface is deliberately minimal.
pub trait CollectionsBackend: Send + Sync {
    /// Read a record; `Ok(None)` means the record has never been written
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write a record, replacing any previous value
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// File-based backend: one `<key>.json` file per record under a data
/// directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if missing) the data directory
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Data directory this store writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl CollectionsBackend for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.record_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        // Write to a sibling temp file first so a crash mid-write never
        // truncates the existing record.
        let path = self.record_path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory backend for tests
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl CollectionsBackend for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.records
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
