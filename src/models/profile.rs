// src/models/profile.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "You";
pub const DEFAULT_USERNAME: &str = "@you";
pub const DEFAULT_BIO: &str = "Living in the moment. No stats, just vibes. 🌊";

/// Raw stored shape: every field optional so records written by older
/// versions merge field-by-field over the defaults instead of all-or-nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Avatar payload as base64 text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    /// Set exactly once, on first load; never overwritten after that.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_in: Option<DateTime<Utc>>,
}

/// Fully resolved profile, after per-field defaulting and the joined-in
/// migration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub username: String,
    pub bio: String,
    pub image: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub dob: Option<NaiveDate>,
    pub joined_in: DateTime<Utc>,
}

impl StoredProfile {
    /// Per-field merge over the defaults. `joined_in` must already be
    /// resolved by the caller (load migration or save preservation).
    pub fn resolve(self, joined_in: DateTime<Utc>) -> Profile {
        Profile {
            name: self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            username: self.username.unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            bio: self.bio.unwrap_or_else(|| DEFAULT_BIO.to_string()),
            image: self.image,
            location: self.location,
            website: self.website,
            dob: self.dob,
            joined_in,
        }
    }
}
