// src/repositories/like_repository.rs

use log::warn;

use crate::storage::{StorageAdapter, StorageError, keys};

pub struct LikeRepository;

impl LikeRepository {
    pub fn liked_ids(storage: &dyn StorageAdapter) -> Vec<String> {
        let raw = match storage.get(keys::LIKED) {
            Some(raw) => raw,
            None => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(ids) => ids,
            Err(e) => {
                warn!("discarding unreadable liked set: {e}");
                Vec::new()
            }
        }
    }

    pub fn is_liked(storage: &dyn StorageAdapter, post_id: &str) -> bool {
        Self::liked_ids(storage).iter().any(|id| id == post_id)
    }

    /// Symmetric insert/remove. Returns the new liked state.
    pub fn toggle(storage: &mut dyn StorageAdapter, post_id: &str) -> Result<bool, StorageError> {
        let mut ids = Self::liked_ids(storage);
        let liked = match ids.iter().position(|id| id == post_id) {
            Some(pos) => {
                ids.remove(pos);
                false
            }
            None => {
                ids.push(post_id.to_string());
                true
            }
        };
        let raw = serde_json::to_string(&ids).map_err(|e| StorageError::Unknown(e.to_string()))?;
        storage.set(keys::LIKED, &raw)?;
        Ok(liked)
    }
}
