// src/main.rs - console demo session against the file-backed store

use anyhow::Result;
use chrono::{Duration, Utc};
use log::info;

use zynk_core::config;
use zynk_core::dtos::post_dtos::{FeedTab, NewPost};
use zynk_core::models::post::{Identity, Intent};
use zynk_core::repositories::post_repository::PostRepository;
use zynk_core::services::theme::ThemeStore;
use zynk_core::session::ZynkSession;
use zynk_core::storage::file_storage::FileStorage;

fn main() -> Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let config = config::load()?;
    info!(
        "using store {} (quota {} bytes)",
        config.store_file.display(),
        config.quota_bytes
    );

    let storage = FileStorage::open(&config.store_file, config.quota_bytes)?;
    let now = Utc::now();
    let mut session = ZynkSession::open(storage, now)?;

    // drop in a couple of demo posts on a fresh store
    if PostRepository::load_all(session.storage()).is_empty() {
        let profile = session.profile().clone();
        let demo = [
            NewPost {
                text: "First thought on Zynk. This one sticks around forever.".to_string(),
                intent: Intent::Thoughts,
                ..Default::default()
            },
            NewPost {
                text: "Hot take with a short fuse.".to_string(),
                identity: Identity::Semi,
                expiry: Some(now + Duration::hours(2)),
                ..Default::default()
            },
            NewPost {
                text: "Settle it once and for all.".to_string(),
                intent: Intent::Question,
                poll_question: Some("Tabs or spaces?".to_string()),
                poll_options: vec!["Tabs".to_string(), "Spaces".to_string()],
                ..Default::default()
            },
        ];
        for new_post in demo {
            PostRepository::append(session.storage_mut(), new_post.into_post(&profile, now))?;
        }
        session.refresh(now);
    }

    let profile = session.profile();
    info!(
        "{} ({}), joined {}",
        profile.name,
        profile.username,
        profile.joined_in.format("%Y-%m-%d")
    );
    info!("theme: {:?}", ThemeStore::load(session.storage()));
    info!("streak badge: {}", session.has_streak(now));

    for tab in [FeedTab::Thoughts, FeedTab::Likes, FeedTab::Media] {
        let view = session.switch_tab(tab, now);
        info!("--- {tab:?} ({} posts)", view.len());
        for post in view {
            let poll = post
                .poll
                .as_ref()
                .map(|p| format!(" | poll: {} ({})", p.question, p.footer))
                .unwrap_or_default();
            info!(
                "{} {} {}: {} [{}]{poll}",
                post.identity_badge.glyph, post.handle, post.intent_badge.label, post.text, post.time_left
            );
        }
    }

    for event in session.take_events() {
        info!("social event: {}", serde_json::to_string(&event)?);
    }

    Ok(())
}
