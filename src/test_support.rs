//! In-memory `SocialApi` and fixtures for store tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::SocialApi;
use crate::error::ApiError;
use crate::types::{LikeToggle, LoginResponse, Post, ProfileUpdate, User};

pub const PASSWORD: &str = "secret";

pub fn user(id: &str, alias: &str) -> User {
    User {
        id: id.to_owned(),
        first_name: "Ana".to_owned(),
        last_name: "García".to_owned(),
        alias: alias.to_owned(),
        birth_date: "1994-03-08".to_owned(),
        avatar: None,
    }
}

pub fn post(id: &str, message: &str) -> Post {
    Post {
        id: id.to_owned(),
        message: message.to_owned(),
        user: user("2", "ana"),
        created_at: "2024-05-01T10:00:00Z".to_owned(),
        likes_count: 0,
        liked_by_current_user: false,
    }
}

#[derive(Default)]
struct FakeState {
    users: Vec<User>,
    posts: Vec<Post>,
    next_id: u64,
    fail_next: Option<ApiError>,
    calls: Vec<String>,
}

/// Scriptable in-memory backend. Clones share state.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Rc<RefCell<FakeState>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account that accepts [`PASSWORD`].
    pub fn with_user(self, user: User) -> Self {
        self.state.borrow_mut().users.push(user);
        self
    }

    /// Seed the server-side post list (newest first).
    pub fn with_posts(self, posts: Vec<Post>) -> Self {
        self.state.borrow_mut().posts = posts;
        self
    }

    /// Make the next call fail with `err`.
    pub fn fail_next(&self, err: ApiError) {
        self.state.borrow_mut().fail_next = Some(err);
    }

    /// Overwrite the server's like state, as another client would.
    pub fn set_likes(&self, post_id: &str, liked: bool, likes_count: u64) {
        let mut state = self.state.borrow_mut();
        if let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) {
            post.liked_by_current_user = liked;
            post.likes_count = likes_count;
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    fn enter(&self, call: String) -> Result<(), ApiError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl SocialApi for FakeApi {
    async fn login(&self, alias: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.enter(format!("login {alias}"))?;
        let state = self.state.borrow();
        let user = state
            .users
            .iter()
            .find(|u| u.alias == alias && password == PASSWORD)
            .cloned()
            .ok_or(ApiError::Status { status: 401, message: Some("Invalid credentials".to_owned()) })?;
        Ok(LoginResponse { token: format!("token-{alias}"), user })
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.enter("fetch_posts".to_owned())?;
        Ok(self.state.borrow().posts.clone())
    }

    async fn create_post(&self, message: &str) -> Result<Post, ApiError> {
        self.enter(format!("create_post {message}"))?;
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let created = post(&format!("new-{}", state.next_id), message);
        state.posts.insert(0, created.clone());
        Ok(created)
    }

    async fn toggle_like(&self, post_id: &str) -> Result<LikeToggle, ApiError> {
        self.enter(format!("toggle_like {post_id}"))?;
        let mut state = self.state.borrow_mut();
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(ApiError::Status { status: 404, message: Some("Post not found".to_owned()) })?;
        post.liked_by_current_user = !post.liked_by_current_user;
        if post.liked_by_current_user {
            post.likes_count += 1;
        } else {
            post.likes_count = post.likes_count.saturating_sub(1);
        }
        Ok(LikeToggle { liked: post.liked_by_current_user, likes_count: post.likes_count })
    }

    async fn update_profile(&self, current: &User, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.enter("update_profile".to_owned())?;
        Ok(current.with_update(update))
    }
}
