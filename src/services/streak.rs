// src/services/streak.rs - "meaningful posting streak" badge

use chrono::{DateTime, Utc};

use crate::models::post::{Intent, Post};

const WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1_000;
const MIN_MEANINGFUL: usize = 3;
const MIN_TEXT_CHARS: usize = 50;

/// The badge rewards sustained authoring, so this scans all posts,
/// expired ones included. Historical activity counts, visibility does not.
pub fn has_streak(posts: &[Post], now: DateTime<Utc>) -> bool {
    let meaningful = posts
        .iter()
        .filter(|p| {
            let age_ms = (now - p.timestamp).num_milliseconds();
            age_ms >= 0 && age_ms < WINDOW_MS
        })
        .filter(|p| is_meaningful(p))
        .count();
    meaningful >= MIN_MEANINGFUL
}

fn is_meaningful(post: &Post) -> bool {
    post.text.chars().count() > MIN_TEXT_CHARS
        || matches!(post.intent, Intent::Thoughts | Intent::Teach | Intent::Debate)
}
