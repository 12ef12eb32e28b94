//! REST transport for the browser.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, with the bearer token read
//! from `localStorage` before each request.
//! Elsewhere: stubs returning [`ApiError::Network`] since these calls are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure becomes an [`ApiError`] so the stores can turn it into a
//! display message; nothing here panics.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use social::api::{LOGIN_PATH, POSTS_PATH, SocialApi, post_like_path};
use social::config::{API_URL_ENV, ApiConfig};
use social::error::ApiError;
use social::types::{LikeToggle, LoginResponse, Post};

/// `SocialApi` transport backed by the browser's `fetch`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserApi {
    config: ApiConfig,
}

impl BrowserApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    /// Configure from `SOCIAL_API_URL` as baked in at build time.
    #[must_use]
    pub fn from_build_env() -> Self {
        let baked = option_env!("SOCIAL_API_URL");
        let config = ApiConfig::from_lookup(|key| if key == API_URL_ENV { baked.map(str::to_owned) } else { None })
            .unwrap_or_else(|e| {
                log::warn!("{e}; falling back to the default API URL");
                ApiConfig::default()
            });
        Self { config }
    }

    fn endpoint(&self, path: &str) -> String {
        self.config.url(path)
    }
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> ApiError {
    ApiError::Network("not available outside the browser".to_owned())
}

#[cfg(feature = "csr")]
mod transport {
    use gloo_net::http::{RequestBuilder, Response};
    use serde::de::DeserializeOwned;
    use social::error::ApiError;
    use social::session::{bearer, read_token};

    use crate::util::storage::LocalStorage;

    pub(super) fn authorize(builder: RequestBuilder) -> RequestBuilder {
        match read_token(&LocalStorage) {
            Some(token) => builder.header("Authorization", &bearer(&token)),
            None => builder,
        }
    }

    pub(super) fn network(err: gloo_net::Error) -> ApiError {
        ApiError::Network(err.to_string())
    }

    pub(super) async fn read<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        let ok = resp.ok();
        let text = resp.text().await.map_err(network)?;
        if !ok {
            return Err(ApiError::from_status(status, &text));
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait(?Send)]
impl SocialApi for BrowserApi {
    async fn login(&self, alias: &str, password: &str) -> Result<LoginResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            let body = social::types::LoginRequest { alias, password };
            let request = transport::authorize(gloo_net::http::Request::post(&self.endpoint(LOGIN_PATH)))
                .json(&body)
                .map_err(transport::network)?;
            let resp = request.send().await.map_err(transport::network)?;
            transport::read(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (alias, password, self.endpoint(LOGIN_PATH));
            Err(unavailable())
        }
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = transport::authorize(gloo_net::http::Request::get(&self.endpoint(POSTS_PATH)))
                .send()
                .await
                .map_err(transport::network)?;
            transport::read(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = self.endpoint(POSTS_PATH);
            Err(unavailable())
        }
    }

    async fn create_post(&self, message: &str) -> Result<Post, ApiError> {
        #[cfg(feature = "csr")]
        {
            let body = social::types::CreatePostRequest { message };
            let request = transport::authorize(gloo_net::http::Request::post(&self.endpoint(POSTS_PATH)))
                .json(&body)
                .map_err(transport::network)?;
            let resp = request.send().await.map_err(transport::network)?;
            transport::read(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = message;
            Err(unavailable())
        }
    }

    async fn toggle_like(&self, post_id: &str) -> Result<LikeToggle, ApiError> {
        #[cfg(feature = "csr")]
        {
            let url = self.endpoint(&post_like_path(post_id));
            let resp = transport::authorize(gloo_net::http::Request::post(&url))
                .send()
                .await
                .map_err(transport::network)?;
            transport::read(resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = post_like_path(post_id);
            Err(unavailable())
        }
    }
}
