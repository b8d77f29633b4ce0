// src/repositories/social_repository.rs - raw orbit sets + first-run seeding

use log::{info, warn};

use crate::storage::{StorageAdapter, StorageError, keys};

/// Demo seed, written only when a set has never been initialized.
const SEED_IN_ORBIT: &[&str] = &["@zynk", "@nova"];
const SEED_ORBITERS: &[&str] = &["@fan1", "@fan2", "@stranger"];

pub struct SocialRepository;

impl SocialRepository {
    pub fn in_orbit(storage: &dyn StorageAdapter) -> Vec<String> {
        Self::load_set(storage, keys::IN_ORBIT)
    }

    pub fn orbiters(storage: &dyn StorageAdapter) -> Vec<String> {
        Self::load_set(storage, keys::ORBITERS)
    }

    pub fn store_in_orbit(
        storage: &mut dyn StorageAdapter,
        handles: &[String],
    ) -> Result<(), StorageError> {
        Self::store_set(storage, keys::IN_ORBIT, handles)
    }

    pub fn store_orbiters(
        storage: &mut dyn StorageAdapter,
        handles: &[String],
    ) -> Result<(), StorageError> {
        Self::store_set(storage, keys::ORBITERS, handles)
    }

    /// First-run seeding. "Never initialized" means the key is absent; a set
    /// that exists but is empty stays empty.
    pub fn init(storage: &mut dyn StorageAdapter) -> Result<(), StorageError> {
        if storage.get(keys::IN_ORBIT).is_none() {
            info!("seeding in-orbit set with demo handles");
            let seed: Vec<String> = SEED_IN_ORBIT.iter().map(|h| h.to_string()).collect();
            Self::store_in_orbit(storage, &seed)?;
        }
        if storage.get(keys::ORBITERS).is_none() {
            info!("seeding orbiter set with demo handles");
            let seed: Vec<String> = SEED_ORBITERS.iter().map(|h| h.to_string()).collect();
            Self::store_orbiters(storage, &seed)?;
        }
        Ok(())
    }

    fn load_set(storage: &dyn StorageAdapter, key: &str) -> Vec<String> {
        let raw = match storage.get(key) {
            Some(raw) => raw,
            None => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(handles) => handles,
            Err(e) => {
                warn!("discarding unreadable handle set {key}: {e}");
                Vec::new()
            }
        }
    }

    fn store_set(
        storage: &mut dyn StorageAdapter,
        key: &str,
        handles: &[String],
    ) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(handles).map_err(|e| StorageError::Unknown(e.to_string()))?;
        storage.set(key, &raw)
    }
}
