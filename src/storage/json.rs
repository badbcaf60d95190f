//! Flat JSON file storage
//!
//! All charts live in one JSON object keyed by user id, the `users.json`
//! layout earlier deployments wrote. The file is re-read on every call so
//! several processes sharing it see each other's writes; there is no
//! in-memory cache.

use super::traits::{ChartStore, StorageResult};
use crate::chart::{MedicalChart, UserId};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Records are kept as raw JSON until asked for, so one record that no
/// longer deserializes only fails lookups for its own id.
type RecordMap = BTreeMap<UserId, Value>;

/// JSON-file-backed chart store
///
/// Thread-safe via an internal mutex held across each read-modify-write.
/// Writes go to a sibling temp file which is then renamed over the data
/// file. Records other than the one being saved are written back exactly
/// as they were read.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open or create a store at the given path
    ///
    /// Missing parent directories are created, and a missing file is
    /// initialized as `{}`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let store = Self {
            path,
            lock: Mutex::new(()),
        };
        if !store.path.exists() {
            store.write_records(&RecordMap::new())?;
        }
        Ok(store)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> StorageResult<RecordMap> {
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(RecordMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_records(&self, records: &RecordMap) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        // A poisoned lock guards no data of its own; the file is the state.
        self.lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ChartStore for JsonFileStore {
    fn load(&self, id: &UserId) -> StorageResult<Option<MedicalChart>> {
        let _guard = self.guard();
        match self.read_records()?.remove(id) {
            Some(record) => serde_json::from_value(record).map(Some).map_err(|e| {
                tracing::warn!(user_id = %id, error = %e, "unreadable chart record");
                e.into()
            }),
            None => Ok(None),
        }
    }

    fn save(&self, id: &UserId, chart: &MedicalChart) -> StorageResult<()> {
        let _guard = self.guard();
        let mut records = self.read_records()?;
        records.insert(id.clone(), serde_json::to_value(chart)?);
        self.write_records(&records)
    }

    fn delete(&self, id: &UserId) -> StorageResult<bool> {
        let _guard = self.guard();
        let mut records = self.read_records()?;
        let removed = records.remove(id).is_some();
        if removed {
            self.write_records(&records)?;
        }
        Ok(removed)
    }

    fn list(&self) -> StorageResult<Vec<UserId>> {
        let _guard = self.guard();
        Ok(self.read_records()?.into_keys().collect())
    }

    fn contains(&self, id: &UserId) -> StorageResult<bool> {
        let _guard = self.guard();
        Ok(self.read_records()?.contains_key(id))
    }
}
