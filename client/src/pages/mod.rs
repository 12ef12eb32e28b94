//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod create_post;
pub mod home;
pub mod login;
pub mod posts;
pub mod profile;
