//! Native REST transport over `reqwest`.
//!
//! Reads the persisted session token before every request and sends it as a
//! bearer credential. Non-2xx responses become [`ApiError::Status`] with the
//! server's message when the body carries one. No retries; timeouts are the
//! transport defaults.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;

use crate::api::{self, SocialApi};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::session::{self, SessionStorage};
use crate::types::{CreatePostRequest, LikeToggle, LoginRequest, LoginResponse, Post};

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct HttpClient<S> {
    http: reqwest::Client,
    config: ApiConfig,
    storage: S,
}

impl<S: SessionStorage> HttpClient<S> {
    /// Build a client for `config` that reads tokens from `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the HTTP client cannot be constructed.
    pub fn new(config: ApiConfig, storage: S) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build().map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self { http, config, storage })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, self.config.url(path));
        match session::read_token(&self.storage) {
            Some(token) => builder.header(AUTHORIZATION, session::bearer(&token)),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        if !(200..300).contains(&status) {
            tracing::debug!(status, "api request rejected");
            return Err(ApiError::from_status(status, &text));
        }

        parse_body(&text)
    }
}

#[async_trait::async_trait(?Send)]
impl<S: SessionStorage> SocialApi for HttpClient<S> {
    async fn login(&self, alias: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest { alias, password };
        self.send(self.request(reqwest::Method::POST, api::LOGIN_PATH).json(&body)).await
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.send(self.request(reqwest::Method::GET, api::POSTS_PATH)).await
    }

    async fn create_post(&self, message: &str) -> Result<Post, ApiError> {
        let body = CreatePostRequest { message };
        self.send(self.request(reqwest::Method::POST, api::POSTS_PATH).json(&body)).await
    }

    async fn toggle_like(&self, post_id: &str) -> Result<LikeToggle, ApiError> {
        let path = api::post_like_path(post_id);
        self.send(self.request(reqwest::Method::POST, &path)).await
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}
