// src/services/poll_service.rs

use log::debug;
use thiserror::Error;

use crate::dtos::post_dtos::{PollOptionView, PollView};
use crate::models::post::Poll;
use crate::repositories::post_repository::PostRepository;
use crate::storage::{StorageAdapter, StorageError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("already voted")]
    AlreadyVoted,
    #[error("post has no poll")]
    NoPoll,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("post not found")]
    PostNotFound,
}

#[derive(Debug, Error)]
pub enum VoteError {
    #[error(transparent)]
    Poll(#[from] PollError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("option index {0} out of range")]
    BadOption(usize),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct PollService;

impl PollService {
    /// One vote per voter. The increment and the voter append are applied
    /// to the in-memory copy and land in a single serialized write of the
    /// post collection; a failed write leaves the stored tallies untouched.
    pub fn vote(
        storage: &mut dyn StorageAdapter,
        post_id: &str,
        option_index: usize,
        voter_id: &str,
    ) -> Result<PollView, VoteError> {
        let mut posts = PostRepository::load_all(storage);
        let view = {
            let post = posts
                .iter_mut()
                .find(|p| p.id == post_id)
                .ok_or(LookupError::PostNotFound)?;
            let poll = post.poll.as_mut().ok_or(PollError::NoPoll)?;
            if poll.has_voted(voter_id) {
                return Err(PollError::AlreadyVoted.into());
            }
            let option = poll
                .options
                .get_mut(option_index)
                .ok_or(VoteError::BadOption(option_index))?;
            option.votes += 1;
            poll.voters.push(voter_id.to_string());
            Self::view(poll, voter_id)
        };
        PostRepository::persist(storage, &posts)?;
        debug!("vote recorded on {post_id} option {option_index}");
        Ok(view)
    }

    /// Derived tallies: per-option percentage and the vote-count footer.
    pub fn view(poll: &Poll, voter_id: &str) -> PollView {
        let total = poll.total_votes();
        let options = poll
            .options
            .iter()
            .map(|o| PollOptionView {
                text: o.text.clone(),
                votes: o.votes,
                percent: if total == 0 {
                    0
                } else {
                    ((f64::from(o.votes) / f64::from(total)) * 100.0).round() as u32
                },
            })
            .collect();
        PollView {
            question: poll.question.clone(),
            options,
            total_votes: total,
            footer: if total == 1 {
                "1 vote".to_string()
            } else {
                format!("{total} votes")
            },
            has_voted: poll.has_voted(voter_id),
        }
    }
}
