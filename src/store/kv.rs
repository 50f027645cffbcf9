// file: src/store/kv.rs
// description: swappable key-value storage backends
// reference: JSON-file-backed string map with in-memory cache

use crate::error::{Result, WorkbenchError};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Minimal get/set/remove surface so persistence can be swapped out in
/// tests without touching the callers.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<Option<String>>;
    fn keys(&self) -> Vec<String>;

    fn len(&self) -> usize {
        self.keys().len()
    }

    fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }
}

/// Volatile backend for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
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

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.remove(key))
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// One JSON file holding a string map, written back on every mutation.
pub struct JsonFileStore {
    path: PathBuf,
    cache: HashMap<String, String>,
    pretty: bool,
}

impl JsonFileStore {
    pub fn open(path: PathBuf, pretty: bool) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                WorkbenchError::Storage(format!("Failed to create storage directory: {}", e))
            })?;
        }

        let cache = if path.exists() {
            let contents = fs::read_to_string(&path)
                .map_err(|e| WorkbenchError::Storage(format!("Failed to read store: {}", e)))?;
            serde_json::from_str(&contents)
                .map_err(|e| WorkbenchError::Storage(format!("Failed to parse store: {}", e)))?
        } else {
            debug!("No existing store at {:?}, starting empty", path);
            HashMap::new()
        };

        info!("Opened store with {} entries", cache.len());
        Ok(Self {
            path,
            cache,
            pretty,
        })
    }

    fn persist(&self) -> Result<()> {
        let contents = if self.pretty {
            serde_json::to_string_pretty(&self.cache)
        } else {
            serde_json::to_string(&self.cache)
        }
        .map_err(|e| WorkbenchError::Storage(format!("Failed to serialize store: {}", e)))?;

        fs::write(&self.path, contents)
            .map_err(|e| WorkbenchError::Storage(format!("Failed to write store: {}", e)))?;

        debug!("Persisted {} entries", self.cache.len());
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.cache.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.cache.insert(key.to_string(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<Option<String>> {
        let removed = self.cache.remove(key);
        if removed.is_some() {
            self.persist()?;
        }
        Ok(removed)
    }

    fn keys(&self) -> Vec<String> {
        self.cache.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        store.set("k", "v".to_string()).unwrap();

        assert_eq!(store.get("k"), Some("v".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.remove("k").unwrap(), Some("v".to_string()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let mut store = JsonFileStore::open(path.clone(), true).unwrap();
            store.set("alpha", "1".to_string()).unwrap();
            store.set("beta", "2".to_string()).unwrap();
        }

        {
            let store = JsonFileStore::open(path, true).unwrap();
            assert_eq!(store.len(), 2);
            assert_eq!(store.get("alpha"), Some("1".to_string()));
        }
    }

    #[test]
    fn test_json_store_remove_missing_key() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("store.json"), false).unwrap();

        assert_eq!(store.remove("absent").unwrap(), None);
    }
}
