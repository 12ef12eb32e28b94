//! API configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::ApiError;

pub const API_URL_ENV: &str = "SOCIAL_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base address of the REST API, without a trailing slash.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_URL.to_owned() }
    }
}

impl ApiConfig {
    /// Build from a base URL, validating its scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the URL is blank or not `http(s)://`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ApiError::Config("API base URL is empty".to_owned()));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ApiError::Config(format!("API base URL must start with http:// or https://: {trimmed}")));
        }
        Ok(Self { base_url: trimmed.to_owned() })
    }

    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `SOCIAL_API_URL`: default `http://localhost:3001`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the configured URL is invalid.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, compile-time values, tests).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the configured URL is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(API_URL_ENV) {
            Some(raw) if !raw.trim().is_empty() => Self::new(&raw),
            _ => Ok(Self::default()),
        }
    }

    /// Absolute URL for an API path such as `/posts`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
