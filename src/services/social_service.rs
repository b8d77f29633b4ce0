// src/services/social_service.rs - orbit = this app's follow relationship

use serde::Serialize;

use crate::models::profile::DEFAULT_USERNAME;
use crate::repositories::social_repository::SocialRepository;
use crate::storage::{StorageAdapter, StorageError};

/// Change event the boundary layer fans out to other views/tabs, shaped
/// like `{type, handle}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SocialEvent {
    Orbit { handle: String },
    Unorbit { handle: String },
    RemoveOrbit { handle: String },
}

pub struct SocialGraph;

impl SocialGraph {
    pub fn is_in_orbit(storage: &dyn StorageAdapter, handle: &str) -> bool {
        SocialRepository::in_orbit(storage).iter().any(|h| h == handle)
    }

    /// Inserts unless the handle is empty, the local user's own, or already
    /// present. Returns the emitted event when membership actually changed.
    pub fn add_to_orbit(
        storage: &mut dyn StorageAdapter,
        own_handle: &str,
        handle: &str,
    ) -> Result<Option<SocialEvent>, StorageError> {
        if handle.is_empty() || handle == own_handle || handle == DEFAULT_USERNAME {
            return Ok(None);
        }
        let mut set = SocialRepository::in_orbit(storage);
        if set.iter().any(|h| h == handle) {
            return Ok(None);
        }
        set.push(handle.to_string());
        SocialRepository::store_in_orbit(storage, &set)?;
        Ok(Some(SocialEvent::Orbit {
            handle: handle.to_string(),
        }))
    }

    pub fn remove_from_orbit(
        storage: &mut dyn StorageAdapter,
        handle: &str,
    ) -> Result<Option<SocialEvent>, StorageError> {
        let mut set = SocialRepository::in_orbit(storage);
        let before = set.len();
        set.retain(|h| h != handle);
        if set.len() == before {
            return Ok(None);
        }
        SocialRepository::store_in_orbit(storage, &set)?;
        Ok(Some(SocialEvent::Unorbit {
            handle: handle.to_string(),
        }))
    }

    /// Returns the new membership state plus whatever event was emitted.
    pub fn toggle(
        storage: &mut dyn StorageAdapter,
        own_handle: &str,
        handle: &str,
    ) -> Result<(bool, Option<SocialEvent>), StorageError> {
        if Self::is_in_orbit(storage, handle) {
            let event = Self::remove_from_orbit(storage, handle)?;
            Ok((false, event))
        } else {
            let event = Self::add_to_orbit(storage, own_handle, handle)?;
            // a refused insert (own/empty handle) leaves membership false
            Ok((event.is_some(), event))
        }
    }

    /// Drop a handle from the "tracking me" set.
    pub fn remove_orbiter(
        storage: &mut dyn StorageAdapter,
        handle: &str,
    ) -> Result<Option<SocialEvent>, StorageError> {
        let mut set = SocialRepository::orbiters(storage);
        let before = set.len();
        set.retain(|h| h != handle);
        if set.len() == before {
            return Ok(None);
        }
        SocialRepository::store_orbiters(storage, &set)?;
        Ok(Some(SocialEvent::RemoveOrbit {
            handle: handle.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const OWN: &str = "@nova";

    #[test]
    fn toggle_twice_is_an_involution() {
        let mut storage = MemoryStorage::new();
        let (state, event) = SocialGraph::toggle(&mut storage, OWN, "@friend").unwrap();
        assert!(state);
        assert_eq!(
            event,
            Some(SocialEvent::Orbit {
                handle: "@friend".into()
            })
        );
        let (state, event) = SocialGraph::toggle(&mut storage, OWN, "@friend").unwrap();
        assert!(!state);
        assert_eq!(
            event,
            Some(SocialEvent::Unorbit {
                handle: "@friend".into()
            })
        );
        assert!(!SocialGraph::is_in_orbit(&storage, "@friend"));
    }

    #[test]
    fn own_handle_is_never_added() {
        let mut storage = MemoryStorage::new();
        for _ in 0..3 {
            let (state, event) = SocialGraph::toggle(&mut storage, OWN, OWN).unwrap();
            assert!(!state);
            assert!(event.is_none());
        }
        assert!(!SocialGraph::is_in_orbit(&storage, OWN));
    }

    #[test]
    fn sentinel_handle_is_never_added() {
        let mut storage = MemoryStorage::new();
        let event = SocialGraph::add_to_orbit(&mut storage, OWN, "@you").unwrap();
        assert!(event.is_none());
    }

    #[test]
    fn adding_existing_handle_is_a_no_op() {
        let mut storage = MemoryStorage::new();
        assert!(SocialGraph::add_to_orbit(&mut storage, OWN, "@friend").unwrap().is_some());
        assert!(SocialGraph::add_to_orbit(&mut storage, OWN, "@friend").unwrap().is_none());
        assert_eq!(SocialRepository::in_orbit(&storage).len(), 1);
    }

    #[test]
    fn empty_handle_is_rejected() {
        let mut storage = MemoryStorage::new();
        assert!(SocialGraph::add_to_orbit(&mut storage, OWN, "").unwrap().is_none());
    }

    #[test]
    fn removing_absent_handle_emits_nothing() {
        let mut storage = MemoryStorage::new();
        assert!(SocialGraph::remove_from_orbit(&mut storage, "@ghost").unwrap().is_none());
    }

    #[test]
    fn remove_orbiter_emits_remove_orbit() {
        let mut storage = MemoryStorage::new();
        SocialRepository::store_orbiters(&mut storage, &["@fan1".to_string()]).unwrap();
        let event = SocialGraph::remove_orbiter(&mut storage, "@fan1").unwrap();
        assert_eq!(
            event,
            Some(SocialEvent::RemoveOrbit {
                handle: "@fan1".into()
            })
        );
        assert!(SocialRepository::orbiters(&storage).is_empty());
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let event = SocialEvent::RemoveOrbit {
            handle: "@fan1".into(),
        };
        let raw = serde_json::to_string(&event).unwrap();
        assert_eq!(raw, r#"{"type":"removeOrbit","handle":"@fan1"}"#);
    }
}
