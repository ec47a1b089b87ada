//! Persistence boundary for the live-cell snapshot.
//!
//! The host supplies any string key-value store that survives restarts
//! (browser local storage, a settings file, ...). Two backends ship here:
//! `MemoryStore` for tests and embedding, `FileStore` for a JSON file on disk.

use crate::error::{LifeError, Result};
use crate::snapshot::LiveCellSet;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key holding the serialized live-cell set.
pub const STORED_STATE_KEY: &str = "storedState";
/// Key holding the auto-load flag (`"true"` / `"false"`).
pub const AUTO_LOAD_KEY: &str = "autoLoad";

/// String key-value persistence used by the snapshot store.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store. Does not survive the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// The file is re-read on every `get` so that several engines pointed at the
/// same path observe each other's writes. A missing or unparsable file reads
/// as an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let Ok(data) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&data) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring unreadable store file");
                BTreeMap::new()
            }
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let data = serde_json::to_string_pretty(entries)
            .map_err(|err| LifeError::Store(err.to_string()))?;
        fs::write(&self.path, data)
            .map_err(|err| LifeError::Store(format!("{}: {err}", self.path.display())))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_entries().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.read_entries();
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

/// Reads and writes the live-cell snapshot and the auto-load flag.
pub struct SnapshotStore {
    backend: Box<dyn KeyValueStore>,
}

impl SnapshotStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Overwrite the stored snapshot.
    pub fn save(&mut self, cells: &LiveCellSet) -> Result<()> {
        let json = cells
            .to_json()
            .map_err(|err| LifeError::Store(err.to_string()))?;
        self.backend.set(STORED_STATE_KEY, &json)?;
        debug!(cells = cells.len(), "saved snapshot");
        Ok(())
    }

    /// Read the stored snapshot. Absent or malformed data yields `None`.
    pub fn load(&self) -> Option<LiveCellSet> {
        let data = self.backend.get(STORED_STATE_KEY)?;
        let cells = LiveCellSet::from_json(&data);
        if cells.is_none() {
            warn!(key = STORED_STATE_KEY, "stored snapshot is malformed, treating as empty");
        }
        cells
    }

    /// Erase the stored snapshot.
    pub fn clear(&mut self) -> Result<()> {
        self.backend.remove(STORED_STATE_KEY)
    }

    pub fn auto_load(&self) -> bool {
        self.backend.get(AUTO_LOAD_KEY).as_deref() == Some("true")
    }

    pub fn set_auto_load(&mut self, enabled: bool) -> Result<()> {
        self.backend
            .set(AUTO_LOAD_KEY, if enabled { "true" } else { "false" })
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }
}
