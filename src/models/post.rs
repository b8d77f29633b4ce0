// src/models/post.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Disclosure level a post was made under.
///
/// Closed enum; legacy/unknown strings in stored records fall back to
/// `Public` instead of failing the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Identity {
    Semi,
    Anon,
    #[default]
    #[serde(other)]
    Public,
}

/// Why a post was written. Drives the intent chip on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Thoughts,
    Question,
    Advice,
    Debate,
    Teach,
    Showcase,
    #[default]
    #[serde(other)]
    Vent,
}

/// Glyph + label + css hook for a card chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub glyph: &'static str,
    pub label: &'static str,
    pub style: &'static str,
}

impl Identity {
    pub fn badge(self) -> Badge {
        match self {
            Identity::Semi => Badge {
                glyph: "🎭",
                label: "Semi",
                style: "badge-semi",
            },
            Identity::Anon => Badge {
                glyph: "👻",
                label: "Anon",
                style: "badge-anon",
            },
            Identity::Public => Badge {
                glyph: "🌐",
                label: "Public",
                style: "badge-public",
            },
        }
    }
}

impl Intent {
    pub fn badge(self) -> Badge {
        match self {
            Intent::Thoughts => Badge {
                glyph: "💭",
                label: "Thoughts",
                style: "badge-thoughts",
            },
            Intent::Question => Badge {
                glyph: "❓",
                label: "Question",
                style: "badge-question",
            },
            Intent::Advice => Badge {
                glyph: "🤝",
                label: "Advice",
                style: "badge-advice",
            },
            Intent::Debate => Badge {
                glyph: "⚖️",
                label: "Debate",
                style: "badge-debate",
            },
            Intent::Teach => Badge {
                glyph: "📚",
                label: "Teach",
                style: "badge-teach",
            },
            Intent::Showcase => Badge {
                glyph: "✨",
                label: "Showcase",
                style: "badge-showcase",
            },
            Intent::Vent => Badge {
                glyph: "🌊",
                label: "Vent",
                style: "badge-vent",
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub text: String,
    #[serde(default)]
    pub votes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub question: String,
    pub options: Vec<PollOption>,
    /// Voter ids, each at most once. Kept in the same record as the tallies
    /// so a vote is one serialized write.
    #[serde(default)]
    pub voters: Vec<String>,
}

impl Poll {
    pub fn total_votes(&self) -> u32 {
        self.options.iter().map(|o| o.votes).sum()
    }

    pub fn has_voted(&self, voter_id: &str) -> bool {
        self.voters.iter().any(|v| v == voter_id)
    }
}

/// One authored post. Append-only after creation except for poll voting and
/// media attachment; expired posts are hidden from views, never deleted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub author: String,
    pub handle: String,
    #[serde(default)]
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Absent = never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[serde(default)]
    pub identity: Identity,
    #[serde(default)]
    pub intent: Intent,
    /// Attached images as base64 text, in attachment order.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gif: Option<String>,
    #[serde(default = "default_true")]
    pub allow_reposts: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,
}

fn default_true() -> bool {
    true
}

impl Post {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry.is_some_and(|e| e <= now)
    }

    pub fn has_media(&self) -> bool {
        !self.images.is_empty() || self.gif.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn legacy_enum_strings_fall_back() {
        let raw = r#"{
            "id": "p1",
            "author": "You",
            "handle": "@you",
            "text": "hi",
            "timestamp": "2026-08-30T12:00:00Z",
            "identity": "incognito",
            "intent": "rant"
        }"#;
        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.identity, Identity::Public);
        assert_eq!(post.intent, Intent::Vent);
        assert!(post.allow_reposts);
        // the fallback variants still serialize under their own names
        let round = serde_json::to_string(&post).unwrap();
        assert!(round.contains(r#""identity":"public""#));
        assert!(round.contains(r#""intent":"vent""#));
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let post = Post {
            id: "p1".into(),
            author: "You".into(),
            handle: "@you".into(),
            text: String::new(),
            timestamp: now,
            expiry: Some(now),
            scheduled_for: None,
            identity: Identity::Public,
            intent: Intent::Vent,
            images: Vec::new(),
            gif: None,
            allow_reposts: true,
            poll: None,
        };
        assert!(post.is_expired(now));
        assert!(!post.is_expired(now - chrono::Duration::seconds(1)));
    }
}
