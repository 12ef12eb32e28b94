//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render feed chrome and cards while reading/writing shared state
//! from Leptos context providers.

pub mod auth_guard;
pub mod avatar;
pub mod navbar;
pub mod post_card;
