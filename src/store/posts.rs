//! Feed store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the in-memory post list (newest first). Every action maps one API
//! call onto a state mutation or an error message; like counts are only ever
//! taken from the server's response.

#[cfg(test)]
#[path = "posts_test.rs"]
mod posts_test;

use crate::api::SocialApi;
use crate::error::ApiError;
use crate::types::{LikeToggle, Post};

pub const FETCH_FALLBACK: &str = "Failed to load posts";
pub const CREATE_FALLBACK: &str = "Failed to create post";
pub const LIKE_FALLBACK: &str = "Failed to toggle like";

/// Identifies one issued fetch; results from superseded fetches are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Ties a create or like toggle to the reset epoch it started in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpochTicket(u64);

// =============================================================================
// STATE
// =============================================================================

/// Feed state: the post list plus request status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostsState {
    pub posts: Vec<Post>,
    pub loading: bool,
    pub error: Option<String>,
    fetch_generation: u64,
    epoch: u64,
}

impl PostsState {
    #[must_use]
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self { posts, ..Self::default() }
    }

    #[must_use]
    pub fn find(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    /// Start a fetch and return its ticket.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_generation += 1;
        self.begin_request();
        FetchTicket(self.fetch_generation)
    }

    /// Settle a fetch. A result for a superseded ticket changes nothing.
    ///
    /// # Errors
    ///
    /// Hands the API failure back after recording its message.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Post>, ApiError>) -> Result<(), ApiError> {
        if ticket.0 != self.fetch_generation {
            tracing::debug!(ticket = ticket.0, latest = self.fetch_generation, "discarding stale fetch result");
            return result.map(|_| ());
        }
        self.loading = false;
        match result {
            Ok(posts) => {
                self.posts = posts;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.display_message(FETCH_FALLBACK));
                Err(e)
            }
        }
    }

    /// Mark a request in flight and drop the previous error.
    pub fn begin_request(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Start a create and return its ticket.
    pub fn begin_create(&mut self) -> EpochTicket {
        self.begin_request();
        EpochTicket(self.epoch)
    }

    /// Settle a create: the server's post goes to the front of the list.
    /// A create that started before the last reset changes nothing.
    ///
    /// # Errors
    ///
    /// Hands the API failure back after recording its message.
    pub fn finish_create(&mut self, ticket: EpochTicket, result: Result<Post, ApiError>) -> Result<(), ApiError> {
        if ticket.0 != self.epoch {
            tracing::debug!("discarding create result from before reset");
            return result.map(|_| ());
        }
        self.loading = false;
        match result {
            Ok(post) => {
                self.posts.insert(0, post);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.display_message(CREATE_FALLBACK));
                Err(e)
            }
        }
    }

    /// Like toggles never touch `loading`.
    pub fn begin_toggle(&mut self) -> EpochTicket {
        self.error = None;
        EpochTicket(self.epoch)
    }

    /// Overwrite the post's like state with the server's values.
    /// A toggle that started before the last reset changes nothing.
    ///
    /// # Errors
    ///
    /// Hands the API failure back after recording its message.
    pub fn finish_toggle(
        &mut self,
        ticket: EpochTicket,
        post_id: &str,
        result: Result<LikeToggle, ApiError>,
    ) -> Result<(), ApiError> {
        if ticket.0 != self.epoch {
            tracing::debug!(%post_id, "discarding like result from before reset");
            return result.map(|_| ());
        }
        match result {
            Ok(toggle) => {
                if let Some(post) = self.posts.iter_mut().find(|p| p.id == post_id) {
                    post.liked_by_current_user = toggle.liked;
                    post.likes_count = toggle.likes_count;
                }
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.display_message(LIKE_FALLBACK));
                Err(e)
            }
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Back to the empty initial state. Every in-flight request is invalidated.
    pub fn reset(&mut self) {
        let fetch_generation = self.fetch_generation + 1;
        let epoch = self.epoch + 1;
        *self = Self { fetch_generation, epoch, ..Self::default() };
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Feed state bound to an API transport.
pub struct PostsStore<A> {
    api: A,
    state: PostsState,
}

impl<A: SocialApi> PostsStore<A> {
    pub fn new(api: A) -> Self {
        Self { api, state: PostsState::default() }
    }

    #[must_use]
    pub fn state(&self) -> &PostsState {
        &self.state
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.state.posts
    }

    /// Replace the local list with the server's.
    ///
    /// # Errors
    ///
    /// Returns the API failure; the previous list is kept.
    pub async fn fetch_posts(&mut self) -> Result<(), ApiError> {
        let ticket = self.state.begin_fetch();
        let result = self.api.fetch_posts().await;
        let outcome = self.state.finish_fetch(ticket, result);
        match &outcome {
            Ok(()) => tracing::debug!(count = self.state.posts.len(), "posts fetched"),
            Err(e) => tracing::warn!(error = %e, "fetch posts failed"),
        }
        outcome
    }

    /// Publish `message` (trimmed) and prepend the created post.
    ///
    /// # Errors
    ///
    /// Returns the API failure; the list is unchanged.
    pub async fn create_post(&mut self, message: &str) -> Result<(), ApiError> {
        let ticket = self.state.begin_create();
        let result = self.api.create_post(message.trim()).await;
        let outcome = self.state.finish_create(ticket, result);
        if let Err(e) = &outcome {
            tracing::warn!(error = %e, "create post failed");
        }
        outcome
    }

    /// Toggle the session user's like on `post_id`.
    ///
    /// # Errors
    ///
    /// Returns the API failure; the post keeps its last known state.
    pub async fn toggle_like(&mut self, post_id: &str) -> Result<(), ApiError> {
        let ticket = self.state.begin_toggle();
        let result = self.api.toggle_like(post_id).await;
        let outcome = self.state.finish_toggle(ticket, post_id, result);
        if let Err(e) = &outcome {
            tracing::warn!(%post_id, error = %e, "toggle like failed");
        }
        outcome
    }

    pub fn clear_error(&mut self) {
        self.state.clear_error();
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }
}
