// src/session.rs - UI-event entry points; owns what used to be page globals

use chrono::{DateTime, Utc};
use log::{debug, error};
use serde::Serialize;

use crate::dtos::post_dtos::{FeedTab, PollView, PostView};
use crate::dtos::profile_dtos::ProfileUpdate;
use crate::models::profile::Profile;
use crate::repositories::like_repository::LikeRepository;
use crate::repositories::post_repository::PostRepository;
use crate::repositories::profile_repository::ProfileRepository;
use crate::repositories::social_repository::SocialRepository;
use crate::services::countdown;
use crate::services::feed_service::FeedService;
use crate::services::poll_service::{LookupError, PollError, PollService, VoteError};
use crate::services::social_service::{SocialEvent, SocialGraph};
use crate::services::streak;
use crate::services::theme::{Theme, ThemeStore};
use crate::storage::{StorageAdapter, StorageError};

/// Outcome envelope handed back to the rendering layer.
#[derive(Debug, Serialize)]
pub struct UiResponse<T: Serialize> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> UiResponse<T> {
    pub fn success(message: &str, data: Option<T>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: "error".to_string(),
            message: message.to_string(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// One open instance of the app. Holds the state the original pages kept in
/// module globals (current tab, rendered list, pending change events) so
/// every operation threads through explicit state instead.
pub struct ZynkSession<S: StorageAdapter> {
    storage: S,
    profile: Profile,
    current_tab: FeedTab,
    current_view: Vec<PostView>,
    events: Vec<SocialEvent>,
}

impl<S: StorageAdapter> ZynkSession<S> {
    /// First-run init: seed the social graph, run the profile joined-in
    /// migration, build the default tab view.
    pub fn open(mut storage: S, now: DateTime<Utc>) -> Result<Self, StorageError> {
        SocialRepository::init(&mut storage)?;
        let profile = ProfileRepository::load(&mut storage, now)?;
        let mut session = Self {
            storage,
            profile,
            current_tab: FeedTab::Thoughts,
            current_view: Vec::new(),
            events: Vec::new(),
        };
        session.rebuild_view(now);
        Ok(session)
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn current_tab(&self) -> FeedTab {
        self.current_tab
    }

    pub fn current_view(&self) -> &[PostView] {
        &self.current_view
    }

    /// Seam for the out-of-scope collaborators (composer, cover upload).
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn switch_tab(&mut self, tab: FeedTab, now: DateTime<Utc>) -> &[PostView] {
        self.current_tab = tab;
        self.rebuild_view(now);
        &self.current_view
    }

    /// Re-derive the current tab from storage, e.g. after an external write
    /// was signalled.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> &[PostView] {
        self.rebuild_view(now);
        &self.current_view
    }

    pub fn toggle_like(&mut self, post_id: &str, now: DateTime<Utc>) -> UiResponse<bool> {
        match FeedService::toggle_like(&mut self.storage, post_id) {
            Ok(liked) => {
                if self.current_tab == FeedTab::Likes && !liked {
                    // the unliked card has to disappear immediately
                    self.rebuild_view(now);
                } else if let Some(view) = self.current_view.iter_mut().find(|v| v.id == post_id) {
                    view.is_liked = liked;
                }
                UiResponse::success(if liked { "Liked" } else { "Unliked" }, Some(liked))
            }
            Err(e) => {
                error!("like toggle failed for {post_id}: {e}");
                UiResponse::error("Could not save your like. Try again.")
            }
        }
    }

    pub fn vote(
        &mut self,
        post_id: &str,
        option_index: usize,
        now: DateTime<Utc>,
    ) -> UiResponse<PollView> {
        let voter_id = self.profile.username.clone();
        match PollService::vote(&mut self.storage, post_id, option_index, &voter_id) {
            Ok(view) => {
                self.rebuild_view(now);
                UiResponse::success("Vote counted", Some(view))
            }
            Err(VoteError::Poll(PollError::AlreadyVoted)) => {
                UiResponse::error("You already voted in this poll.")
            }
            // bad-data cases: the card just stays as-is
            Err(VoteError::Poll(PollError::NoPoll)) => {
                debug!("vote against post without poll: {post_id}");
                UiResponse::success("", None)
            }
            Err(VoteError::Lookup(LookupError::PostNotFound)) => {
                debug!("vote against missing post: {post_id}");
                UiResponse::success("", None)
            }
            Err(VoteError::BadOption(index)) => {
                debug!("vote with out-of-range option {index} on {post_id}");
                UiResponse::success("", None)
            }
            Err(VoteError::Storage(e)) => {
                error!("vote persistence failed for {post_id}: {e}");
                UiResponse::error("Could not save your vote. Try again.")
            }
        }
    }

    pub fn save_profile(&mut self, update: ProfileUpdate, now: DateTime<Utc>) -> UiResponse<Profile> {
        match ProfileRepository::save(&mut self.storage, update, now) {
            Ok(profile) => {
                self.profile = profile.clone();
                self.rebuild_view(now);
                UiResponse::success("Profile updated! 🌟", Some(profile))
            }
            Err(StorageError::QuotaExceeded) => {
                UiResponse::error("That image is too large. Try a smaller one.")
            }
            Err(e) => {
                error!("profile save failed: {e}");
                UiResponse::error("Could not save your profile. Try again.")
            }
        }
    }

    /// Returns the new membership state.
    pub fn toggle_orbit(&mut self, handle: &str) -> UiResponse<bool> {
        match SocialGraph::toggle(&mut self.storage, &self.profile.username, handle) {
            Ok((in_orbit, event)) => {
                if let Some(event) = event {
                    self.events.push(event);
                }
                let message = if in_orbit { "Added to orbit" } else { "Removed from orbit" };
                UiResponse::success(message, Some(in_orbit))
            }
            Err(e) => {
                error!("orbit toggle failed for {handle}: {e}");
                UiResponse::error("Could not update your orbit. Try again.")
            }
        }
    }

    pub fn remove_orbiter(&mut self, handle: &str) -> UiResponse<bool> {
        match SocialGraph::remove_orbiter(&mut self.storage, handle) {
            Ok(event) => {
                let removed = event.is_some();
                if let Some(event) = event {
                    self.events.push(event);
                }
                UiResponse::success(if removed { "Orbiter removed" } else { "" }, Some(removed))
            }
            Err(e) => {
                error!("orbiter removal failed for {handle}: {e}");
                UiResponse::error("Could not update your orbit. Try again.")
            }
        }
    }

    /// The 1-second timer callback: recompute every displayed countdown chip
    /// in place. Idempotent, label-only.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        countdown::refresh(&mut self.current_view, now);
    }

    pub fn toggle_theme(&mut self) -> UiResponse<Theme> {
        match ThemeStore::toggle(&mut self.storage) {
            Ok(theme) => UiResponse::success("Theme switched", Some(theme)),
            Err(e) => {
                error!("theme toggle failed: {e}");
                UiResponse::error("Could not switch the theme.")
            }
        }
    }

    pub fn has_streak(&self, now: DateTime<Utc>) -> bool {
        streak::has_streak(&PostRepository::load_all(&self.storage), now)
    }

    /// Drain change events for the boundary layer to fan out.
    pub fn take_events(&mut self) -> Vec<SocialEvent> {
        std::mem::take(&mut self.events)
    }

    fn rebuild_view(&mut self, now: DateTime<Utc>) {
        let posts = PostRepository::load_all(&self.storage);
        let liked = LikeRepository::liked_ids(&self.storage);
        self.current_view =
            FeedService::view_for_tab(self.current_tab, &posts, &self.profile, &liked, now);
    }
}
