// src/dtos/profile_dtos.rs

use chrono::NaiveDate;
use serde::Deserialize;

/// What the edit-profile form submits. `joined_in` is deliberately absent:
/// it is preserved server-of-record side and can never be overwritten by a
/// save.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub username: String,
    pub bio: String,
    /// Avatar as base64 text, optionally with a data-URL prefix the
    /// repository strips before denormalizing.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
}
