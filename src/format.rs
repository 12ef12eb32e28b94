//! Compose validation and display formatting shared by the front ends.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Longest message the compose form accepts, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    #[error("message is empty")]
    Empty,
    #[error("message is {count} characters; the limit is {max}", max = MAX_MESSAGE_CHARS)]
    TooLong { count: usize },
}

/// Validate a draft and return the trimmed message to publish.
///
/// # Errors
///
/// Returns [`ComposeError`] when the draft is blank or over the limit.
pub fn check_message(raw: &str) -> Result<&str, ComposeError> {
    let count = raw.chars().count();
    if count > MAX_MESSAGE_CHARS {
        return Err(ComposeError::TooLong { count });
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ComposeError::Empty);
    }
    Ok(trimmed)
}

/// Human-friendly age of a post relative to `now`.
///
/// Unparseable timestamps are returned unchanged.
#[must_use]
pub fn relative_time(created_at: &str, now: OffsetDateTime) -> String {
    let Ok(created) = OffsetDateTime::parse(created_at, &Rfc3339) else {
        return created_at.to_owned();
    };
    let hours = (now - created).whole_hours();
    if hours < 1 {
        return "less than 1 hour ago".to_owned();
    }
    if hours < 24 {
        return format!("{hours} {} ago", plural(hours, "hour"));
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{days} {} ago", plural(days, "day"));
    }
    long_date(created.date())
}

/// Birthday as "Month D, YYYY"; accepts a plain date or an RFC 3339 timestamp.
#[must_use]
pub fn format_birth_date(raw: &str) -> String {
    let plain = format_description!("[year]-[month]-[day]");
    let date = OffsetDateTime::parse(raw, &Rfc3339)
        .map(OffsetDateTime::date)
        .or_else(|_| Date::parse(raw, &plain));
    match date {
        Ok(date) => long_date(date),
        Err(_) => raw.to_owned(),
    }
}

/// Uppercase initials of each word, for avatar fallbacks.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[must_use]
pub fn likes_label(count: u64) -> String {
    if count == 1 { "1 Like".to_owned() } else { format!("{count} Likes") }
}

fn long_date(date: Date) -> String {
    format!("{} {}, {}", date.month(), date.day(), date.year())
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 { unit.to_owned() } else { format!("{unit}s") }
}
