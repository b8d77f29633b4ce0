// src/repositories/post_repository.rs

use chrono::{DateTime, Utc};
use log::warn;

use crate::models::post::Post;
use crate::storage::{StorageAdapter, StorageError, keys};

pub struct PostRepository;

impl PostRepository {
    /// Full stored collection, newest first. An unreadable record is
    /// discarded with a warning rather than taking the whole feed down.
    pub fn load_all(storage: &dyn StorageAdapter) -> Vec<Post> {
        let raw = match storage.get(keys::POSTS) {
            Some(raw) => raw,
            None => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(posts) => posts,
            Err(e) => {
                warn!("discarding unreadable post collection: {e}");
                Vec::new()
            }
        }
    }

    /// The whole collection goes out as one serialized write so a reader in
    /// another tab never observes a half-applied mutation.
    pub fn persist(storage: &mut dyn StorageAdapter, posts: &[Post]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(posts).map_err(|e| StorageError::Unknown(e.to_string()))?;
        storage.set(keys::POSTS, &raw)
    }

    /// Entry point for the (external) composer: prepend so insertion order
    /// stays newest-first.
    pub fn append(storage: &mut dyn StorageAdapter, post: Post) -> Result<(), StorageError> {
        let mut posts = Self::load_all(storage);
        posts.insert(0, post);
        Self::persist(storage, &posts)
    }

    /// Posts whose expiry has not passed, source order preserved.
    pub fn active<'a>(posts: &'a [Post], now: DateTime<Utc>) -> Vec<&'a Post> {
        posts.iter().filter(|p| !p.is_expired(now)).collect()
    }
}
