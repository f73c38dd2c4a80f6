//! High score persistence over a small key-value store.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::constants::HIGH_SCORE_KEY;
use crate::error::StorageError;

/// String key-value storage, in the manner of a browser's local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// A store that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store backed by a JSON object on disk.
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

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking the write
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

/// Reads the stored high score. Missing, unreadable or malformed values count as zero.
pub fn load_high_score(store: &dyn KeyValueStore) -> u32 {
    match store.get(HIGH_SCORE_KEY) {
        Ok(Some(value)) => value.trim().parse().unwrap_or_else(|e| {
            warn!(value = %value, error = %e, "Stored high score is malformed, using 0");
            0
        }),
        Ok(None) => 0,
        Err(e) => {
            warn!(error = %e, "Could not read high score, using 0");
            0
        }
    }
}

/// Writes `score` if it beats the stored value. Returns whether anything was written.
pub fn record_high_score(store: &mut dyn KeyValueStore, score: u32) -> Result<bool, StorageError> {
    let stored = load_high_score(store);
    if score <= stored {
        debug!(score, stored, "Score does not beat stored high score");
        return Ok(false);
    }
    store.set(HIGH_SCORE_KEY, &score.to_string())?;
    debug!(score, previous = stored, "New high score recorded");
    Ok(true)
}
