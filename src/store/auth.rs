//! Auth-session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns the current session and mirrors its durable subset into a
//! [`SessionStorage`] after every change. Route guards and the posts feed read
//! [`AuthState`]; only the actions below write it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::api::SocialApi;
use crate::error::ApiError;
use crate::session::{self, PersistedSession, SessionStorage};
use crate::types::{LoginResponse, ProfileUpdate, User};

pub const LOGIN_FALLBACK: &str = "Failed to login";
pub const PROFILE_FALLBACK: &str = "Failed to update profile";

/// Coarse session phase derived from [`AuthState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    Anonymous,
    Authenticating,
    Authenticated,
    Error,
}

// =============================================================================
// STATE
// =============================================================================

/// Authentication state tracking the session and request status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl From<PersistedSession> for AuthState {
    /// A persisted entry missing its user or token restores as anonymous.
    fn from(persisted: PersistedSession) -> Self {
        match persisted {
            PersistedSession { user: Some(user), token: Some(token), is_authenticated: true } => Self {
                user: Some(user),
                token: Some(token),
                is_authenticated: true,
                loading: false,
                error: None,
            },
            _ => Self::default(),
        }
    }
}

impl AuthState {
    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        if self.loading && !self.is_authenticated {
            AuthPhase::Authenticating
        } else if self.is_authenticated {
            AuthPhase::Authenticated
        } else if self.error.is_some() {
            AuthPhase::Error
        } else {
            AuthPhase::Anonymous
        }
    }

    /// Durable subset written to session storage.
    #[must_use]
    pub fn snapshot(&self) -> PersistedSession {
        PersistedSession {
            user: self.user.clone(),
            token: self.token.clone(),
            is_authenticated: self.is_authenticated,
        }
    }

    /// Mark a request in flight and drop the previous error.
    pub fn begin_request(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Settle a login request.
    ///
    /// # Errors
    ///
    /// Hands the API failure back after recording its message.
    pub fn finish_login(&mut self, result: Result<LoginResponse, ApiError>) -> Result<(), ApiError> {
        self.loading = false;
        match result {
            Ok(LoginResponse { user, token }) => {
                self.user = Some(user);
                self.token = Some(token);
                self.is_authenticated = true;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.display_message(LOGIN_FALLBACK));
                Err(e)
            }
        }
    }

    /// Settle a profile update.
    ///
    /// # Errors
    ///
    /// Hands the API failure back after recording its message.
    pub fn finish_profile_update(&mut self, result: Result<User, ApiError>) -> Result<(), ApiError> {
        self.loading = false;
        match result {
            Ok(user) => {
                self.user = Some(user);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.display_message(PROFILE_FALLBACK));
                Err(e)
            }
        }
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
        self.error = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Auth state bound to an API transport and a session backend.
pub struct AuthStore<A, S> {
    api: A,
    storage: S,
    state: AuthState,
}

impl<A: SocialApi, S: SessionStorage> AuthStore<A, S> {
    /// Restore the persisted session before any action runs.
    pub fn restore(api: A, storage: S) -> Self {
        let state = AuthState::from(session::load_session(&storage));
        tracing::debug!(authenticated = state.is_authenticated, "auth session restored");
        Self { api, storage, state }
    }

    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Log in with `alias` and `password`.
    ///
    /// # Errors
    ///
    /// Returns the API failure; its message is also stored in `state().error`.
    pub async fn login(&mut self, alias: &str, password: &str) -> Result<(), ApiError> {
        self.state.begin_request();
        let result = self.api.login(alias, password).await;
        let outcome = self.state.finish_login(result);
        match &outcome {
            Ok(()) => tracing::info!(%alias, "logged in"),
            Err(e) => tracing::warn!(%alias, error = %e, "login failed"),
        }
        self.persist();
        outcome
    }

    pub fn logout(&mut self) {
        self.state.logout();
        tracing::info!("logged out");
        self.persist();
    }

    /// Apply `update` to the current user's name fields. No-op without a user.
    ///
    /// # Errors
    ///
    /// Returns the API failure; its message is also stored in `state().error`.
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> Result<(), ApiError> {
        let Some(current) = self.state.user.clone() else {
            return Ok(());
        };
        self.state.begin_request();
        let result = self.api.update_profile(&current, update).await;
        let outcome = self.state.finish_profile_update(result);
        if let Err(e) = &outcome {
            tracing::warn!(error = %e, "profile update failed");
        }
        self.persist();
        outcome
    }

    pub fn clear_error(&mut self) {
        self.state.clear_error();
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = session::save_session(&self.storage, &self.state.snapshot()) {
            tracing::warn!(error = %e, "failed to persist auth session");
        }
    }
}
