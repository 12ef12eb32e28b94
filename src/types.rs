//! Wire DTOs shared by the stores and every transport.
//!
//! DESIGN
//! ======
//! Field names follow the REST API's camelCase JSON so serde maps responses
//! directly onto store state without an intermediate layer.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A registered user as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Login handle, distinct from the display name.
    pub alias: String,
    /// Calendar date or RFC 3339 timestamp, passed through as sent.
    pub birth_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Display name built from the first and last name.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        full.trim().to_owned()
    }

    /// Return a copy with the present fields of `update` applied.
    #[must_use]
    pub fn with_update(&self, update: &ProfileUpdate) -> Self {
        let mut next = self.clone();
        if let Some(first_name) = &update.first_name {
            next.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &update.last_name {
            next.last_name.clone_from(last_name);
        }
        next
    }
}

/// A feed post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub message: String,
    /// Author of the post.
    pub user: User,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    #[serde(default)]
    pub likes_count: u64,
    /// Whether the session user has liked the post.
    #[serde(default, alias = "isLiked")]
    pub liked_by_current_user: bool,
}

/// Response body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// Authoritative like state returned by `POST /posts/{id}/like`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    pub liked: bool,
    pub likes_count: u64,
}

/// Partial update of the user's mutable name fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none()
    }
}

/// Request body of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub alias: &'a str,
    pub password: &'a str,
}

/// Request body of `POST /posts`.
#[derive(Debug, Serialize)]
pub struct CreatePostRequest<'a> {
    pub message: &'a str,
}
