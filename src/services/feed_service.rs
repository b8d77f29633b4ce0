// src/services/feed_service.rs - derives what each profile tab shows

use chrono::{DateTime, Utc};

use crate::dtos::post_dtos::{FeedTab, PostView};
use crate::models::post::Post;
use crate::models::profile::{DEFAULT_NAME, DEFAULT_USERNAME, Profile};
use crate::repositories::like_repository::LikeRepository;
use crate::repositories::post_repository::PostRepository;
use crate::services::{countdown, poll_service::PollService};
use crate::storage::{StorageAdapter, StorageError};

pub struct FeedService;

impl FeedService {
    /// The post list for a tab, decorated for rendering. Pure over its
    /// inputs; expired posts never appear, whatever the tab.
    pub fn view_for_tab(
        tab: FeedTab,
        posts: &[Post],
        profile: &Profile,
        liked_ids: &[String],
        now: DateTime<Utc>,
    ) -> Vec<PostView> {
        let active = PostRepository::active(posts, now);
        let selected: Vec<&Post> = match tab {
            FeedTab::Thoughts => active
                .into_iter()
                .filter(|p| Self::is_own(p, profile))
                .collect(),
            FeedTab::Likes => active
                .into_iter()
                .filter(|p| liked_ids.iter().any(|id| id == &p.id))
                .collect(),
            FeedTab::Media => active
                .into_iter()
                .filter(|p| Self::is_own(p, profile) && p.has_media())
                .collect(),
            // reserved tabs
            FeedTab::Highlights | FeedTab::Insights | FeedTab::Replies => Vec::new(),
        };
        selected
            .into_iter()
            .map(|p| Self::decorate(p, profile, liked_ids, now))
            .collect()
    }

    /// Inclusive OR so posts authored before a profile rename keep showing
    /// up: current handle, current display name, or the own-user sentinels.
    fn is_own(post: &Post, profile: &Profile) -> bool {
        post.handle == profile.username
            || post.author == profile.name
            || post.handle == DEFAULT_USERNAME
            || post.author == DEFAULT_NAME
    }

    fn decorate(
        post: &Post,
        profile: &Profile,
        liked_ids: &[String],
        now: DateTime<Utc>,
    ) -> PostView {
        PostView {
            id: post.id.clone(),
            author: post.author.clone(),
            handle: post.handle.clone(),
            text: post.text.clone(),
            timestamp: post.timestamp,
            expiry: post.expiry,
            time_left: countdown::time_left(post.expiry, now),
            urgency: countdown::urgency(post.expiry, now),
            identity_badge: post.identity.badge(),
            intent_badge: post.intent.badge(),
            scheduled_badge: post
                .scheduled_for
                .filter(|t| *t > now)
                .map(|t| format!("Scheduled for {}", t.format("%b %-d, %H:%M"))),
            is_liked: liked_ids.iter().any(|id| id == &post.id),
            is_own: Self::is_own(post, profile),
            images: post.images.clone(),
            gif: post.gif.clone(),
            poll: post
                .poll
                .as_ref()
                .map(|poll| PollService::view(poll, &profile.username)),
        }
    }

    /// Like/unlike as inverses on the liked set. The caller (session)
    /// rebuilds the `likes` view when an unlike happens on that tab.
    pub fn toggle_like(
        storage: &mut dyn StorageAdapter,
        post_id: &str,
    ) -> Result<bool, StorageError> {
        LikeRepository::toggle(storage, post_id)
    }
}
