// src/storage/file_storage.rs - single-file JSON backend for the demo binary

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use super::{StorageAdapter, StorageError};

/// localStorage-ish default: 5 MiB for the whole store.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Persists the whole key-value map as one JSON object. Every `set` writes
/// the file, so a crash between operations loses at most the in-flight key.
pub struct FileStorage {
    path: PathBuf,
    entries: HashMap<String, String>,
    quota_bytes: usize,
}

impl FileStorage {
    pub fn open(path: &Path, quota_bytes: usize) -> Result<Self, StorageError> {
        let entries = match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| StorageError::Unknown(format!("unreadable store file: {e}")))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StorageError::Unknown(e.to_string())),
        };
        Ok(Self {
            path: path.to_path_buf(),
            entries,
            quota_bytes,
        })
    }

    fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn flush(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.entries)
            .map_err(|e| StorageError::Unknown(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| StorageError::Unknown(e.to_string()))
    }
}

impl StorageAdapter for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let existing = self.entries.get(key).map(|v| v.len() + key.len()).unwrap_or(0);
        let prospective = self.used_bytes() - existing + key.len() + value.len();
        if prospective > self.quota_bytes {
            return Err(StorageError::QuotaExceeded);
        }

        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // roll back so memory and disk stay in sync
            match previous {
                Some(old) => {
                    self.entries.insert(key.to_string(), old);
                }
                None => {
                    self.entries.remove(key);
                }
            }
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            if let Err(e) = self.flush() {
                warn!("failed to persist removal of {key}: {e}");
            }
        }
    }
}
