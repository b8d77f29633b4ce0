// src/dtos/post_dtos.rs - view shapes handed to the rendering layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::post::{Badge, Identity, Intent, Poll, PollOption, Post};
use crate::models::profile::Profile;
use crate::services::countdown::UrgencyTier;

/// Profile-page feed tabs. `Highlights`, `Insights` and `Replies` are
/// reserved and always render empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedTab {
    Thoughts,
    Likes,
    Highlights,
    Insights,
    Media,
    Replies,
}

/// One derived poll option: stored votes plus the recomputed share.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollOptionView {
    pub text: String,
    pub votes: u32,
    /// round(votes / total * 100); 0 while the poll has no votes.
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollView {
    pub question: String,
    pub options: Vec<PollOptionView>,
    pub total_votes: u32,
    /// Vote-count footer, e.g. "7 votes".
    pub footer: String,
    pub has_voted: bool,
}

/// A post decorated for display: countdown chip, identity/intent badges,
/// schedule badge, like state. Everything the card template needs, no DOM.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: String,
    pub author: String,
    pub handle: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Carried so the 1s tick can recompute the chip without a rebuild.
    pub expiry: Option<DateTime<Utc>>,
    pub time_left: String,
    pub urgency: UrgencyTier,
    pub identity_badge: Badge,
    pub intent_badge: Badge,
    /// Present only while `scheduled_for` is still in the future.
    pub scheduled_badge: Option<String>,
    pub is_liked: bool,
    pub is_own: bool,
    pub images: Vec<String>,
    pub gif: Option<String>,
    pub poll: Option<PollView>,
}

/// What the (out-of-scope) composer submits; this just mints the record.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub text: String,
    #[serde(default)]
    pub identity: Identity,
    #[serde(default)]
    pub intent: Intent,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub gif: Option<String>,
    #[serde(default = "default_allow_reposts")]
    pub allow_reposts: bool,
    #[serde(default)]
    pub poll_question: Option<String>,
    #[serde(default)]
    pub poll_options: Vec<String>,
}

fn default_allow_reposts() -> bool {
    true
}

impl Default for NewPost {
    fn default() -> Self {
        Self {
            text: String::new(),
            identity: Identity::default(),
            intent: Intent::default(),
            expiry: None,
            scheduled_for: None,
            images: Vec::new(),
            gif: None,
            allow_reposts: true,
            poll_question: None,
            poll_options: Vec::new(),
        }
    }
}

impl NewPost {
    pub fn into_post(self, profile: &Profile, now: DateTime<Utc>) -> Post {
        let poll = self.poll_question.map(|question| Poll {
            question,
            options: self
                .poll_options
                .into_iter()
                .map(|text| PollOption { text, votes: 0 })
                .collect(),
            voters: Vec::new(),
        });
        Post {
            id: Uuid::new_v4().to_string(),
            author: profile.name.clone(),
            handle: profile.username.clone(),
            text: self.text,
            timestamp: now,
            expiry: self.expiry,
            scheduled_for: self.scheduled_for,
            identity: self.identity,
            intent: self.intent,
            images: self.images,
            gif: self.gif,
            allow_reposts: self.allow_reposts,
            poll,
        }
    }
}
