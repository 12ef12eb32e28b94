//! # social
//!
//! Client-side core for the social feed: wire types, the REST API contract,
//! session persistence, and the auth/posts stores that front ends drive.
//!
//! SYSTEM CONTEXT
//! ==============
//! The `client` crate (Leptos, browser) and the `cli` crate (terminal) both sit
//! on top of this crate. Each supplies a transport for [`api::SocialApi`] and a
//! [`session::SessionStorage`] backend; the stores here own every state
//! transition so both front ends behave identically.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
#[cfg(feature = "http")]
pub mod http;
pub mod session;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::SocialApi;
pub use config::ApiConfig;
pub use error::{ApiError, StorageError};
pub use session::{PersistedSession, SessionStorage};
pub use store::auth::{AuthPhase, AuthState, AuthStore};
pub use store::posts::{PostsState, PostsStore};
pub use types::{LikeToggle, LoginResponse, Post, ProfileUpdate, User};
