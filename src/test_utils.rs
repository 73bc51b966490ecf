// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for unit tests: canned content items, deterministic
//! services backed by fixture files, and a clock that never ticks.

use crate::clock::{Clock, DateTime, Utc};
use crate::http::{HTTPError, HTTPResult};
use crate::reddit::service::Service;
use crate::reddit::thing::{ContentItem, ItemKind};
use reqwest::StatusCode;
use std::cell::Cell;
use std::fs;

pub fn load_data(file: &str) -> String {
    fs::read_to_string(format!("tests/data/{file}.json")).expect("could not find test data")
}

fn item(id: &str, kind: ItemKind, body: &str, subreddit: &str) -> ContentItem {
    let created_utc = DateTime::parse_from_rfc3339("2025-05-23T10:13:00-07:00")
        .expect("invalid date supplied")
        .with_timezone(&Utc);
    ContentItem::new(
        id,
        kind,
        body,
        subreddit,
        created_utc,
        1,
        format!("https://reddit.com/r/{subreddit}/comments/{id}/"),
    )
}

/// A canned comment.
pub fn comment(id: &str, body: &str, subreddit: &str) -> ContentItem {
    item(id, ItemKind::Comment, body, subreddit)
}

/// A canned post.
pub fn post(id: &str, body: &str, subreddit: &str) -> ContentItem {
    item(id, ItemKind::Post, body, subreddit)
}

/// A service that reads listing pages from fixture files instead of the
/// network.
///
/// The first page for a suffix lives at `tests/data/listing_<suffix>.json`;
/// subsequent pages append the pagination cursor, as in
/// `tests/data/listing_<suffix>_t1_c6.json`.
pub struct TestService<'a> {
    suffix: &'a str,
}

impl<'a> TestService<'a> {
    pub fn new(suffix: &'a str) -> Self {
        Self { suffix }
    }
}

impl<'a> Service for TestService<'a> {
    fn user_listing(
        &self,
        _username: &str,
        _limit: u32,
        after: Option<&str>,
    ) -> HTTPResult<String> {
        let file = match after {
            None => format!("listing_{}", self.suffix),
            Some(after) => format!("listing_{}_{after}", self.suffix),
        };
        Ok(load_data(&file))
    }
}

/// A service for a user that does not exist.
pub struct NotFoundService;

impl Service for NotFoundService {
    fn user_listing(
        &self,
        _username: &str,
        _limit: u32,
        _after: Option<&str>,
    ) -> HTTPResult<String> {
        Err(HTTPError::Http(StatusCode::NOT_FOUND))
    }
}

/// A service whose first request fails with a rate-limit error and whose
/// subsequent requests succeed, for exercising the retry path.
pub struct FlakyService<'a> {
    inner: TestService<'a>,
    failed: Cell<bool>,
}

impl<'a> FlakyService<'a> {
    pub fn new(suffix: &'a str) -> Self {
        Self {
            inner: TestService::new(suffix),
            failed: Cell::new(false),
        }
    }
}

impl<'a> Service for FlakyService<'a> {
    fn user_listing(&self, username: &str, limit: u32, after: Option<&str>) -> HTTPResult<String> {
        if !self.failed.replace(true) {
            return Err(HTTPError::Http(StatusCode::TOO_MANY_REQUESTS));
        }
        self.inner.user_listing(username, limit, after)
    }
}

/// A service that always fails with a transient error.
pub struct UnavailableService;

impl Service for UnavailableService {
    fn user_listing(
        &self,
        _username: &str,
        _limit: u32,
        _after: Option<&str>,
    ) -> HTTPResult<String> {
        Err(HTTPError::Http(StatusCode::SERVICE_UNAVAILABLE))
    }
}

pub struct FrozenClock {
    datetime: DateTime<Utc>,
}

impl FrozenClock {
    pub fn new(datetime: DateTime<Utc>) -> Self {
        FrozenClock { datetime }
    }
}

impl Default for FrozenClock {
    fn default() -> Self {
        let datetime = DateTime::parse_from_rfc3339("2025-05-23T10:13:00-07:00")
            .expect("invalid date supplied")
            .with_timezone(&Utc);
        Self::new(datetime)
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.datetime
    }
}
