// src/storage/mod.rs - key-value adapter everything persists through

pub mod file_storage;
pub mod signals;

use std::collections::HashMap;
use thiserror::Error;

/// Storage keys. One record per key, JSON-serialized unless noted otherwise.
pub mod keys {
    /// Profile record.
    pub const PROFILE: &str = "zynkProfile";
    /// Millisecond timestamp, rewritten on every profile save.
    pub const PROFILE_UPDATED: &str = "zynk_profile_updated";
    /// Denormalized avatar payload (base64 text, raw not JSON).
    pub const AVATAR: &str = "zynk_avatar";
    /// Millisecond timestamp, rewritten whenever the avatar changes.
    pub const AVATAR_UPDATED: &str = "zynk_avatar_updated";
    /// Cover image payload (raw, not JSON). Written by the cover-upload flow.
    pub const COVER: &str = "zynk_cover";
    /// Post collection (JSON array, newest first).
    pub const POSTS: &str = "zynk_posts";
    /// Liked post ids (JSON array used as a set).
    pub const LIKED: &str = "zynk_liked";
    /// Handles the local user tracks.
    pub const IN_ORBIT: &str = "zynk_in_orbit";
    /// Handles tracking the local user.
    pub const ORBITERS: &str = "zynk_orbit";
    /// "dark" | "light" (raw string).
    pub const THEME: &str = "zynk-theme";
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded")]
    QuotaExceeded,
    #[error("storage failure: {0}")]
    Unknown(String),
}

/// localStorage-shaped adapter: string keys, string values, atomic at
/// single-key granularity. Multi-field records are written as one
/// serialized value so a concurrent reader never sees a partial update.
pub trait StorageAdapter {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str);
}

/// In-memory backend for tests and throwaway sessions. An optional byte
/// capacity makes the quota path reachable without a real backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    capacity: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capacity counts key + value bytes across all entries.
    pub fn with_capacity_limit(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: Some(bytes),
        }
    }

    fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl StorageAdapter for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(cap) = self.capacity {
            let existing = self.entries.get(key).map(|v| v.len() + key.len()).unwrap_or(0);
            let prospective = self.used_bytes() - existing + key.len() + value.len();
            if prospective > cap {
                return Err(StorageError::QuotaExceeded);
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
