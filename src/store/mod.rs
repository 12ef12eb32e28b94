//! Client-side stores.
//!
//! DESIGN
//! ======
//! Each store is split in two layers:
//! - a plain state struct (`AuthState`, `PostsState`) whose methods are the only
//!   state transitions, usable from reactive signals that await on their own;
//! - a store struct (`AuthStore`, `PostsStore`) owning the state plus an API
//!   handle, exposing `&mut self` async actions for single-writer callers.

pub mod auth;
pub mod posts;
