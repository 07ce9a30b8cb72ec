// Persistence layer for the history and bookmark lists.
// Best effort on both ends: unreadable or malformed data loads as empty,
// failed writes are logged and dropped.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{BrowserError, Result};

pub trait ListStore: Send + Sync {
    /// Stored sequence under `key`, or empty if missing or malformed.
    fn load(&self, key: &str) -> Vec<String>;
    /// Overwrites the value under `key`. Never fails the caller.
    fn save(&self, key: &str, items: &[String]);
}

fn decode(key: &str, raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::warn!("[ListStore] Malformed '{}' ({}), starting empty", key, e);
        Vec::new()
    })
}

/// One `<key>.json` file per list inside a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn try_save(&self, key: &str, items: &[String]) -> Result<()> {
        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir).map_err(|e| BrowserError::Persistence(e.to_string()))?;

        let json = serde_json::to_string(items).map_err(|e| BrowserError::Persistence(e.to_string()))?;

        // Atomic write: tmp + rename, so a crash never leaves a half-written list
        fs::write(&tmp_path, json).map_err(|e| BrowserError::Persistence(e.to_string()))?;
        fs::rename(&tmp_path, &path).map_err(|e| BrowserError::Persistence(e.to_string()))?;

        Ok(())
    }
}

impl ListStore for JsonFileStore {
    fn load(&self, key: &str) -> Vec<String> {
        let path = self.path_for(key);
        if !path.exists() {
            return Vec::new();
        }
        match fs::read_to_string(&path) {
            Ok(raw) => decode(key, &raw),
            Err(e) => {
                log::warn!("[ListStore] Failed to read {:?}: {}", path, e);
                Vec::new()
            }
        }
    }

    fn save(&self, key: &str, items: &[String]) {
        if let Err(e) = self.try_save(key, items) {
            log::warn!("[ListStore] Dropped write of '{}': {}", key, e);
        }
    }
}

/// Keeps the encoded strings in memory. Used in tests and when no data
/// directory is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored encoding for `key`, as it would appear on disk.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.raw
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    pub fn put_raw(&self, key: &str, raw: impl Into<String>) {
        self.raw
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), raw.into());
    }
}

impl ListStore for MemoryStore {
    fn load(&self, key: &str) -> Vec<String> {
        match self.raw(key) {
            Some(raw) => decode(key, &raw),
            None => Vec::new(),
        }
    }

    fn save(&self, key: &str, items: &[String]) {
        match serde_json::to_string(items) {
            Ok(json) => self.put_raw(key, json),
            Err(e) => log::warn!("[ListStore] Dropped write of '{}': {}", key, e),
        }
    }
}
