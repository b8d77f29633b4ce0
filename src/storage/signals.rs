// src/storage/signals.rs - marker keys for the cross-instance reload contract
//
// Another open instance of the app watches storage for changes. Writers put
// a millisecond timestamp under a marker key next to every mutated record;
// a watcher that sees a known marker re-reads the full record from storage
// and never trusts whatever payload rode along on the notification. Markers
// may arrive late, out of order, or coalesced; re-reading tolerates all of
// that.

use chrono::{DateTime, Utc};

use super::{StorageAdapter, StorageError, keys};

/// Which record a changed key tells the receiving instance to reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    ProfileUpdated,
    AvatarUpdated,
}

pub fn classify(key: &str) -> Option<Signal> {
    match key {
        keys::PROFILE_UPDATED => Some(Signal::ProfileUpdated),
        keys::AVATAR_UPDATED => Some(Signal::AvatarUpdated),
        _ => None,
    }
}

/// Write a marker with the current time.
pub fn mark(
    storage: &mut dyn StorageAdapter,
    marker_key: &str,
    now: DateTime<Utc>,
) -> Result<(), StorageError> {
    storage.set(marker_key, &now.timestamp_millis().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;

    #[test]
    fn classifies_known_markers_only() {
        assert_eq!(classify(keys::PROFILE_UPDATED), Some(Signal::ProfileUpdated));
        assert_eq!(classify(keys::AVATAR_UPDATED), Some(Signal::AvatarUpdated));
        assert_eq!(classify(keys::POSTS), None);
        assert_eq!(classify("unrelated"), None);
    }

    #[test]
    fn mark_writes_millisecond_timestamp() {
        let mut storage = MemoryStorage::new();
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        mark(&mut storage, keys::PROFILE_UPDATED, now).unwrap();
        assert_eq!(
            storage.get(keys::PROFILE_UPDATED).as_deref(),
            Some("1700000000123")
        );
    }
}
