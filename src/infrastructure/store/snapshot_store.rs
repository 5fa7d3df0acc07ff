//! Durable persistence of the last-known rows per sheet.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::warn;

use crate::common::errors::StoreError;
use crate::domain::sheet::{RowCollection, SheetId};

/// The persisted blob: last-known rows keyed by sheet id. Absence of a key
/// means the sheet was never successfully fetched.
pub type SnapshotMap = HashMap<SheetId, RowCollection>;

/// Whole-store read/replace persistence.
///
/// There is deliberately no per-key primitive: updates are read-modify-write
/// cycles, and concurrent writers race with last-writer-wins semantics.
pub trait SnapshotStore: Send + Sync {
    fn read_all(&self) -> Result<SnapshotMap, StoreError>;
    fn write_all(&self, snapshots: &SnapshotMap) -> Result<(), StoreError>;
}

/// Snapshot store backed by a single JSON file.
///
/// A missing file and unparseable content both read as an empty store; the
/// next successful write repairs the file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn read_all(&self) -> Result<SnapshotMap, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SnapshotMap::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };
        match serde_json::from_str(&raw) {
            Ok(snapshots) => Ok(snapshots),
            Err(e) => {
                warn!(
                    "snapshot file {} is corrupt ({}), treating as empty",
                    self.path.display(),
                    e
                );
                Ok(SnapshotMap::new())
            }
        }
    }

    fn write_all(&self, snapshots: &SnapshotMap) -> Result<(), StoreError> {
        let blob = serde_json::to_string(snapshots)?;
        fs::write(&self.path, blob)?;
        Ok(())
    }
}

/// Volatile store for tests and embedders that opt out of persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<SnapshotMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshots(snapshots: SnapshotMap) -> Self {
        Self {
            inner: Mutex::new(snapshots),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn read_all(&self) -> Result<SnapshotMap, StoreError> {
        Ok(self.inner.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn write_all(&self, snapshots: &SnapshotMap) -> Result<(), StoreError> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = snapshots.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sheet::Row;
    use serde_json::json;

    fn sample_snapshots() -> SnapshotMap {
        let mut snapshots = SnapshotMap::new();
        snapshots.insert(
            "events".to_string(),
            vec![Row::from_values([json!("launch"), json!(42)])],
        );
        snapshots
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("never-written.json"));
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn corrupt_content_reads_as_empty_and_writes_recover() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cached.json");
        fs::write(&path, "{not json at all").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.read_all().unwrap().is_empty());

        let snapshots = sample_snapshots();
        store.write_all(&snapshots).unwrap();
        assert_eq!(store.read_all().unwrap(), snapshots);
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("cached.json"));

        let snapshots = sample_snapshots();
        store.write_all(&snapshots).unwrap();
        assert_eq!(store.read_all().unwrap(), snapshots);
    }

    #[test]
    fn write_replaces_the_whole_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("cached.json"));

        store.write_all(&sample_snapshots()).unwrap();
        store.write_all(&SnapshotMap::new()).unwrap();
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert!(store.read_all().unwrap().is_empty());

        let snapshots = sample_snapshots();
        store.write_all(&snapshots).unwrap();
        assert_eq!(store.read_all().unwrap(), snapshots);
    }
}
