// src/services/theme.rs

use serde::{Deserialize, Serialize};

use crate::storage::{StorageAdapter, StorageError, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

pub struct ThemeStore;

impl ThemeStore {
    /// Stored raw (not JSON); anything but "dark" reads as light.
    pub fn load(storage: &dyn StorageAdapter) -> Theme {
        match storage.get(keys::THEME).as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggle(storage: &mut dyn StorageAdapter) -> Result<Theme, StorageError> {
        let next = match Self::load(storage) {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        storage.set(keys::THEME, next.as_str())?;
        Ok(next)
    }
}
