//! Error taxonomy for API calls and session persistence.
//!
//! ERROR HANDLING
//! ==============
//! Stores collapse every [`ApiError`] into a display string via
//! [`ApiError::display_message`]; the variants exist so transports and tests
//! can still tell a rejected request from a broken connection.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

// =============================================================================
// API ERRORS
// =============================================================================

/// Errors produced by [`crate::api::SocialApi`] transports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("{}", status_text(.status, .message.as_deref()))]
    Status { status: u16, message: Option<String> },

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The client is misconfigured (bad base URL, builder failure).
    #[error("client configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Build a status error, pulling a human-readable message out of `body`.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status { status, message: extract_message(body) }
    }

    /// The message carried by the failure itself, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        let raw = match self {
            Self::Network(msg) | Self::Decode(msg) | Self::Config(msg) => msg.as_str(),
            Self::Status { message, .. } => message.as_deref()?,
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }

    /// Message to show the user, falling back to `fallback` when the failure
    /// carries none.
    #[must_use]
    pub fn display_message(&self, fallback: &str) -> String {
        self.message().unwrap_or(fallback).to_owned()
    }

    /// HTTP status for rejected requests.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn status_text(status: &u16, message: Option<&str>) -> String {
    match message {
        Some(msg) => format!("{msg} (status {status})"),
        None => format!("request failed with status {status}"),
    }
}

/// Pull an error message out of a JSON error body.
///
/// Understands `{"message": "..."}`, `{"message": ["...", "..."]}` (validation
/// lists, joined with `"; "`) and `{"error": "..."}`.
#[must_use]
pub fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = match value.get("message") {
        Some(Value::String(msg)) => Some(msg.clone()),
        Some(Value::Array(items)) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() { None } else { Some(parts.join("; ")) }
        }
        _ => None,
    };
    message
        .or_else(|| value.get("error").and_then(Value::as_str).map(str::to_owned))
        .filter(|msg| !msg.trim().is_empty())
}

// =============================================================================
// STORAGE ERRORS
// =============================================================================

/// Errors produced by [`crate::session::SessionStorage`] backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session encode failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backend is not reachable in this environment.
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}
