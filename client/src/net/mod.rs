//! Networking for the browser build.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the shared `SocialApi` contract over `gloo-net`; wire types
//! come from the `social` crate.

pub mod api;
