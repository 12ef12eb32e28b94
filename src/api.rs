//! REST API contract shared by every transport.
//!
//! SYSTEM CONTEXT
//! ==============
//! Stores only ever talk to [`SocialApi`]. The native transport is
//! [`crate::http::HttpClient`]; the browser transport lives in the `client`
//! crate. Futures are not `Send`: everything runs on one cooperative thread.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::error::ApiError;
use crate::types::{LikeToggle, LoginResponse, Post, ProfileUpdate, User};

pub const LOGIN_PATH: &str = "/auth/login";
pub const POSTS_PATH: &str = "/posts";

/// Path of the like-toggle endpoint for `post_id`, escaped as one segment.
#[must_use]
pub fn post_like_path(post_id: &str) -> String {
    format!("{POSTS_PATH}/{}/like", path_segment(post_id))
}

// Form encoding leaves only `*-._` and alphanumerics bare; a space comes out
// as `+`, which a path would keep literally.
fn path_segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect::<String>().replace('+', "%20")
}

#[async_trait::async_trait(?Send)]
pub trait SocialApi {
    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the credentials are rejected or the request fails.
    async fn login(&self, alias: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// `GET /posts`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is malformed.
    async fn fetch_posts(&self) -> Result<Vec<Post>, ApiError>;

    /// `POST /posts`; returns the created post.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is malformed.
    async fn create_post(&self, message: &str) -> Result<Post, ApiError>;

    /// `POST /posts/{id}/like`; returns the server's like state after the toggle.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is malformed.
    async fn toggle_like(&self, post_id: &str) -> Result<LikeToggle, ApiError>;

    /// Apply a profile update and return the resulting user.
    ///
    /// The REST API has no profile endpoint, so the default merges the update
    /// locally. Transports backed by a server that does may override it.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if an overriding transport fails.
    async fn update_profile(&self, current: &User, update: &ProfileUpdate) -> Result<User, ApiError> {
        Ok(current.with_update(update))
    }
}
