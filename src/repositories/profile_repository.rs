// src/repositories/profile_repository.rs

use std::sync::OnceLock;

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use regex::Regex;

use crate::dtos::profile_dtos::ProfileUpdate;
use crate::models::profile::{Profile, StoredProfile};
use crate::storage::{StorageAdapter, StorageError, keys, signals};

static DATA_URL_PREFIX: OnceLock<Regex> = OnceLock::new();

/// Drop a `data:image/...;base64,` prefix so only the payload is stored.
fn strip_data_url(image: &str) -> &str {
    let re = DATA_URL_PREFIX
        .get_or_init(|| Regex::new(r"^data:image/[A-Za-z0-9.+-]+;base64,").unwrap());
    match re.find(image) {
        Some(m) => &image[m.end()..],
        None => image,
    }
}

pub struct ProfileRepository;

impl ProfileRepository {
    /// Stored record merged field-by-field over the defaults. A record with
    /// no `joinedIn` gets the current time assigned and persisted before the
    /// profile is returned; nothing else ever writes that field.
    pub fn load(
        storage: &mut dyn StorageAdapter,
        now: DateTime<Utc>,
    ) -> Result<Profile, StorageError> {
        let mut stored = Self::stored(storage);
        let joined_in = match stored.joined_in {
            Some(t) => t,
            None => {
                stored.joined_in = Some(now);
                Self::persist(storage, &stored)?;
                info!("assigned joinedIn to profile record");
                now
            }
        };
        Ok(stored.resolve(joined_in))
    }

    /// Persists the caller's fields plus the preserved `joinedIn`. Blank
    /// strings count as absent so the defaults reapply on the next load.
    /// On success the profile-updated marker is written, and when an image
    /// came along, the denormalized avatar plus its marker too. A failure
    /// anywhere rolls the record and avatar back to their prior values, so
    /// the caller sees either the full save or none of it.
    pub fn save(
        storage: &mut dyn StorageAdapter,
        update: ProfileUpdate,
        now: DateTime<Utc>,
    ) -> Result<Profile, StorageError> {
        let existing = Self::stored(storage);
        let joined_in = existing.joined_in.unwrap_or(now);

        let image = update.image.map(|raw| strip_data_url(&raw).to_string());
        if let Some(payload) = &image {
            match general_purpose::STANDARD.decode(payload) {
                Ok(bytes) => debug!("avatar payload decodes to {} bytes", bytes.len()),
                Err(e) => warn!("avatar payload is not valid base64 ({e}); storing as-is"),
            }
        }

        let stored = StoredProfile {
            name: Some(update.name).filter(|s| !s.trim().is_empty()),
            username: Some(update.username).filter(|s| !s.trim().is_empty()),
            bio: Some(update.bio).filter(|s| !s.trim().is_empty()),
            image: image.clone(),
            location: update.location.filter(|s| !s.trim().is_empty()),
            website: update.website.filter(|s| !s.trim().is_empty()),
            dob: update.dob,
            joined_in: Some(joined_in),
        };

        let prior_profile = storage.get(keys::PROFILE);
        let prior_avatar = storage.get(keys::AVATAR);
        if let Err(e) = Self::write_record(storage, &stored, image.as_deref(), now) {
            Self::restore(storage, keys::PROFILE, prior_profile);
            if image.is_some() {
                Self::restore(storage, keys::AVATAR, prior_avatar);
            }
            return Err(e);
        }

        Ok(stored.resolve(joined_in))
    }

    /// Record and avatar first, markers last; other instances only get
    /// signalled once everything they would re-read has landed.
    fn write_record(
        storage: &mut dyn StorageAdapter,
        stored: &StoredProfile,
        image: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        Self::persist(storage, stored)?;
        if let Some(payload) = image {
            storage.set(keys::AVATAR, payload)?;
        }
        signals::mark(storage, keys::PROFILE_UPDATED, now)?;
        if image.is_some() {
            signals::mark(storage, keys::AVATAR_UPDATED, now)?;
        }
        Ok(())
    }

    fn restore(storage: &mut dyn StorageAdapter, key: &str, prior: Option<String>) {
        let outcome = match prior {
            Some(raw) => storage.set(key, &raw),
            None => {
                storage.remove(key);
                Ok(())
            }
        };
        if let Err(e) = outcome {
            warn!("could not roll back {key} after a failed save: {e}");
        }
    }

    /// Denormalized avatar decoded back to raw bytes, for whoever renders
    /// or exports it. `None` when absent or unreadable.
    pub fn decode_avatar(storage: &dyn StorageAdapter) -> Option<Vec<u8>> {
        let payload = storage.get(keys::AVATAR)?;
        match general_purpose::STANDARD.decode(strip_data_url(&payload)) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("stored avatar is not valid base64: {e}");
                None
            }
        }
    }

    fn stored(storage: &dyn StorageAdapter) -> StoredProfile {
        let raw = match storage.get(keys::PROFILE) {
            Some(raw) => raw,
            None => return StoredProfile::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("discarding unreadable profile record: {e}");
                StoredProfile::default()
            }
        }
    }

    fn persist(storage: &mut dyn StorageAdapter, stored: &StoredProfile) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(stored).map_err(|e| StorageError::Unknown(e.to_string()))?;
        storage.set(keys::PROFILE, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{DEFAULT_BIO, DEFAULT_NAME, DEFAULT_USERNAME};
    use crate::storage::MemoryStorage;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn first_load_returns_defaults_and_assigns_joined_in() {
        let mut storage = MemoryStorage::new();
        let profile = ProfileRepository::load(&mut storage, now()).unwrap();
        assert_eq!(profile.name, DEFAULT_NAME);
        assert_eq!(profile.username, DEFAULT_USERNAME);
        assert_eq!(profile.bio, DEFAULT_BIO);
        assert_eq!(profile.joined_in, now());
        // the migration persisted immediately
        assert!(storage.get(keys::PROFILE).unwrap().contains("joinedIn"));
    }

    #[test]
    fn joined_in_is_assigned_exactly_once() {
        let mut storage = MemoryStorage::new();
        let first = ProfileRepository::load(&mut storage, now()).unwrap();
        let later = now() + Duration::days(3);
        let second = ProfileRepository::load(&mut storage, later).unwrap();
        assert_eq!(first.joined_in, second.joined_in);
    }

    #[test]
    fn save_preserves_joined_in() {
        let mut storage = MemoryStorage::new();
        ProfileRepository::load(&mut storage, now()).unwrap();
        let update = ProfileUpdate {
            name: "Nova".into(),
            username: "@nova".into(),
            bio: "hi".into(),
            ..Default::default()
        };
        let saved = ProfileRepository::save(&mut storage, update, now() + Duration::days(9)).unwrap();
        assert_eq!(saved.joined_in, now());
        assert_eq!(saved.name, "Nova");
    }

    #[test]
    fn blank_fields_fall_back_to_defaults_on_reload() {
        let mut storage = MemoryStorage::new();
        let update = ProfileUpdate {
            name: "   ".into(),
            username: String::new(),
            bio: "custom".into(),
            ..Default::default()
        };
        ProfileRepository::save(&mut storage, update, now()).unwrap();
        let profile = ProfileRepository::load(&mut storage, now()).unwrap();
        assert_eq!(profile.name, DEFAULT_NAME);
        assert_eq!(profile.username, DEFAULT_USERNAME);
        assert_eq!(profile.bio, "custom");
    }

    #[test]
    fn save_writes_markers_and_denormalized_avatar() {
        let mut storage = MemoryStorage::new();
        let update = ProfileUpdate {
            name: "Nova".into(),
            username: "@nova".into(),
            bio: "hi".into(),
            image: Some("data:image/png;base64,aGVsbG8=".into()),
            ..Default::default()
        };
        ProfileRepository::save(&mut storage, update, now()).unwrap();
        assert!(storage.get(keys::PROFILE_UPDATED).is_some());
        // data-URL prefix stripped before denormalizing
        assert_eq!(storage.get(keys::AVATAR).as_deref(), Some("aGVsbG8="));
        assert!(storage.get(keys::AVATAR_UPDATED).is_some());
        assert_eq!(ProfileRepository::decode_avatar(&storage).unwrap(), b"hello");
    }

    #[test]
    fn save_without_image_leaves_avatar_alone() {
        let mut storage = MemoryStorage::new();
        let update = ProfileUpdate {
            name: "Nova".into(),
            username: "@nova".into(),
            bio: "hi".into(),
            ..Default::default()
        };
        ProfileRepository::save(&mut storage, update, now()).unwrap();
        assert!(storage.get(keys::AVATAR).is_none());
        assert!(storage.get(keys::AVATAR_UPDATED).is_none());
        assert!(storage.get(keys::PROFILE_UPDATED).is_some());
    }

    #[test]
    fn oversized_image_fails_with_quota_and_no_partial_write() {
        let mut storage = MemoryStorage::with_capacity_limit(256);
        let update = ProfileUpdate {
            name: "Nova".into(),
            username: "@nova".into(),
            bio: "hi".into(),
            image: Some("A".repeat(4096)),
            ..Default::default()
        };
        let err = ProfileRepository::save(&mut storage, update, now()).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded));
        assert!(storage.get(keys::PROFILE).is_none());
        assert!(storage.get(keys::PROFILE_UPDATED).is_none());
    }

    #[test]
    fn avatar_write_over_quota_rolls_the_record_back() {
        // the record itself fits, the denormalized avatar copy tips the quota
        let mut storage = MemoryStorage::with_capacity_limit(700);
        ProfileRepository::load(&mut storage, now()).unwrap();
        let prior = storage.get(keys::PROFILE).unwrap();
        let update = ProfileUpdate {
            name: "Nova".into(),
            username: "@nova".into(),
            bio: "hi".into(),
            image: Some("A".repeat(400)),
            ..Default::default()
        };
        let err = ProfileRepository::save(&mut storage, update, now()).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded));
        // the half-finished save was undone and no instance was signalled
        assert_eq!(storage.get(keys::PROFILE).as_deref(), Some(prior.as_str()));
        assert!(storage.get(keys::AVATAR).is_none());
        assert!(storage.get(keys::PROFILE_UPDATED).is_none());
        assert!(storage.get(keys::AVATAR_UPDATED).is_none());
    }
}
