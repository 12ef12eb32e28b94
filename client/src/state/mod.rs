//! Reactive drivers for the shared stores.
//!
//! DESIGN
//! ======
//! Store semantics live in `social::store`; these modules wrap the plain state
//! structs in `RwSignal`s, run the async API call, and commit the result
//! through the same transition methods the native stores use.

pub mod auth;
pub mod posts;
