//! Reddit API clients and services for retrieving a user's posting history.

pub mod client;
pub mod service;
pub mod thing;

pub use client::Fetcher;
pub use thing::ContentItem;

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"reddit\.com/u(?:ser)?/([A-Za-z0-9_-]+)").expect("invalid username pattern")
});

/// The given URL does not point to a Reddit user profile.
#[derive(Debug, Error, PartialEq)]
#[error("could not extract username from URL: {0}")]
pub struct InvalidUrl(pub String);

/// Extracts a username from a Reddit profile URL.
///
/// Both the `/user/<name>` and `/u/<name>` profile URL shapes are
/// accepted, with or without a scheme or a `www.` prefix, and with or
/// without trailing path segments.
///
/// Returns an [`InvalidUrl`] error if no username can be isolated.
///
/// # Examples
///
/// ```
/// use redsona::reddit::extract_username;
/// let username = extract_username("https://www.reddit.com/user/alice/").unwrap();
/// assert_eq!(username, "alice");
/// ```
///
/// ```
/// use redsona::reddit::extract_username;
/// let username = extract_username("reddit.com/u/alice").unwrap();
/// assert_eq!(username, "alice");
/// ```
pub fn extract_username(profile_url: &str) -> Result<String, InvalidUrl> {
    USERNAME_RE
        .captures(profile_url)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| InvalidUrl(profile_url.to_string()))
}
