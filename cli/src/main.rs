//! Terminal client for the social feed.
//!
//! Drives the same auth and posts stores as the browser client, with the
//! session kept as a JSON file under `--session-dir` so consecutive commands
//! share a login.


use std::path::PathBuf;

use clap::{Parser, Subcommand};
use social::format::{self, ComposeError};
use social::http::HttpClient;
use social::session::FileStorage;
use social::store::auth::AuthStore;
use social::store::posts::PostsStore;
use social::types::{Post, ProfileUpdate, User};
use social::config::{API_URL_ENV, DEFAULT_API_URL};
use social::{ApiConfig, ApiError};
use time::OffsetDateTime;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not logged in; run `login` first")]
    NotLoggedIn,
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("invalid message: {0}")]
    Compose(#[from] ComposeError),
}

#[derive(Parser, Debug)]
#[command(name = "social-cli", about = "Social feed command-line client")]
struct Cli {
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    base_url: String,

    #[arg(long, env = "SOCIAL_SESSION_DIR", default_value = ".social")]
    session_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Sign in and store the session.
    Login {
        #[arg(long)]
        alias: String,
        #[arg(long, env = "SOCIAL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List the feed, newest first.
    Posts,
    /// Publish a new post.
    Post { message: String },
    /// Toggle your like on a post.
    Like { post_id: String },
    /// Show the profile, or update name fields when flags are given.
    Profile {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
}

impl Command {
    /// Subcommand name for log fields; never includes argument values.
    fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::Posts => "posts",
            Self::Post { .. } => "post",
            Self::Like { .. } => "like",
            Self::Profile { .. } => "profile",
        }
    }
}

type Session = AuthStore<HttpClient<FileStorage>, FileStorage>;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let command = cli.command.name();
    tracing::debug!(command, base_url = %cli.base_url, session_dir = %cli.session_dir.display(), "dispatching");

    let outcome = run(cli).await;
    match &outcome {
        Ok(()) => tracing::debug!(command, "command finished"),
        Err(e) => tracing::debug!(command, error = %e, "command failed"),
    }
    outcome
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ApiConfig::new(&cli.base_url)?;
    let storage = FileStorage::new(cli.session_dir);
    let client = HttpClient::new(config, storage.clone())?;
    let mut auth = AuthStore::restore(client, storage);

    match cli.command {
        Command::Login { alias, password } => run_login(&mut auth, &alias, &password).await,
        Command::Logout => {
            auth.logout();
            println!("Logged out");
            Ok(())
        }
        Command::Whoami => {
            let user = signed_in(&auth)?;
            println!("{}", render_user(user));
            Ok(())
        }
        Command::Posts => run_posts(&auth).await,
        Command::Post { message } => run_post(&auth, &message).await,
        Command::Like { post_id } => run_like(&auth, &post_id).await,
        Command::Profile { first_name, last_name } => {
            run_profile(&mut auth, ProfileUpdate { first_name, last_name }).await
        }
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

async fn run_login(auth: &mut Session, alias: &str, password: &str) -> Result<(), CliError> {
    auth.login(alias, password).await?;
    let user = signed_in(auth)?;
    println!("Logged in as {} (@{})", user.display_name(), user.alias);
    Ok(())
}

async fn run_posts(auth: &Session) -> Result<(), CliError> {
    signed_in(auth)?;
    let mut posts = PostsStore::new(auth.api().clone());
    posts.fetch_posts().await?;
    if posts.posts().is_empty() {
        println!("No posts yet.");
        return Ok(());
    }
    let now = OffsetDateTime::now_utc();
    for post in posts.posts() {
        println!("{}\n", render_post(post, now));
    }
    Ok(())
}

async fn run_post(auth: &Session, message: &str) -> Result<(), CliError> {
    signed_in(auth)?;
    let message = format::check_message(message)?;
    let mut posts = PostsStore::new(auth.api().clone());
    posts.create_post(message).await?;
    if let Some(post) = posts.posts().first() {
        println!("Posted {}", post.id);
    }
    Ok(())
}

async fn run_like(auth: &Session, post_id: &str) -> Result<(), CliError> {
    signed_in(auth)?;
    let mut posts = PostsStore::new(auth.api().clone());
    posts.fetch_posts().await?;
    posts.toggle_like(post_id).await?;
    match posts.state().find(post_id) {
        Some(post) => println!("{} {}", like_marker(post.liked_by_current_user), format::likes_label(post.likes_count)),
        None => {
            tracing::debug!(%post_id, "liked post is not in the fetched feed");
            println!("Toggled like on {post_id}");
        }
    }
    Ok(())
}

async fn run_profile(auth: &mut Session, update: ProfileUpdate) -> Result<(), CliError> {
    signed_in(auth)?;
    if !update.is_empty() {
        auth.update_profile(&update).await?;
    }
    println!("{}", render_user(signed_in(auth)?));
    Ok(())
}

// =============================================================================
// RENDERING
// =============================================================================

fn signed_in(auth: &Session) -> Result<&User, CliError> {
    let state = auth.state();
    match (&state.user, state.is_authenticated) {
        (Some(user), true) => Ok(user),
        _ => Err(CliError::NotLoggedIn),
    }
}

fn like_marker(liked: bool) -> &'static str {
    if liked { "♥" } else { "♡" }
}

fn render_user(user: &User) -> String {
    format!(
        "{} (@{})\nBorn {}",
        user.display_name(),
        user.alias,
        format::format_birth_date(&user.birth_date)
    )
}

fn render_post(post: &Post, now: OffsetDateTime) -> String {
    format!(
        "[{}] {} (@{}) · {}\n  {}\n  {} {}",
        post.id,
        post.user.display_name(),
        post.user.alias,
        format::relative_time(&post.created_at, now),
        post.message,
        like_marker(post.liked_by_current_user),
        format::likes_label(post.likes_count),
    )
}
