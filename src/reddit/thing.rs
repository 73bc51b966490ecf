// SPDX-License-Identifier: Apache-2.0

//! A "thing" in the Reddit sense.
//!
//! Historically in the Reddit API and its old source code, a "Thing" was
//! any element of the Reddit system: users, posts, comments, etc. This
//! module parses the JSON listing returned by `/user/<name>.json` into the
//! content items the classifier consumes.

use crate::text::convert_html_entities;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// An error parsing data from the Reddit API.
#[derive(Debug, Error)]
pub enum Error {
    /// The response body was not valid JSON for a Reddit listing.
    #[error("could not parse Reddit listing: {0}")]
    Json(#[from] serde_json::Error),
}

/// Whether a content item is a submitted post or a comment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Post,
    Comment,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Post => write!(f, "post"),
            ItemKind::Comment => write!(f, "comment"),
        }
    }
}

/// One unit of user-authored content: a post or a comment.
///
/// Immutable once parsed. Posts carry their title and self text joined
/// into a single body; comments carry their comment body. HTML entities
/// are decoded at parse time.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentItem {
    id: String,
    kind: ItemKind,
    body: String,
    subreddit: String,
    created_utc: DateTime<Utc>,
    score: i64,
    permalink: String,
}

impl ContentItem {
    /// Creates a content item directly.
    ///
    /// Generally items are produced by [`Page::parse`]; this constructor
    /// exists for callers that already hold the field values, such as
    /// tests.
    pub fn new(
        id: impl Into<String>,
        kind: ItemKind,
        body: impl Into<String>,
        subreddit: impl Into<String>,
        created_utc: DateTime<Utc>,
        score: i64,
        permalink: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            body: body.into(),
            subreddit: subreddit.into(),
            created_utc,
            score,
            permalink: permalink.into(),
        }
    }

    /// The item's Reddit id (without its `t1_`/`t3_` prefix).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the item is a post or a comment.
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The user-authored text of the item.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The subreddit the item was written in.
    pub fn subreddit(&self) -> &str {
        &self.subreddit
    }

    /// When the item was written.
    pub fn created_utc(&self) -> DateTime<Utc> {
        self.created_utc
    }

    /// The item's score (upvotes minus downvotes).
    pub fn score(&self) -> i64 {
        self.score
    }

    /// A permanent link to the item on reddit.com.
    pub fn permalink(&self) -> &str {
        &self.permalink
    }
}

impl crate::count::HasSubreddit for ContentItem {
    fn subreddit(&self) -> &str {
        &self.subreddit
    }
}

/// One page of a user's listing.
#[derive(Debug)]
pub struct Page {
    /// Pagination cursor for the next page, if Reddit reports one.
    pub after: Option<String>,

    /// The content items on the page, in listing order, with deleted and
    /// empty items already dropped.
    pub items: Vec<ContentItem>,

    /// The number of raw children on the page, before any were dropped.
    pub children: usize,
}

impl Page {
    /// Parses one page of the `/user/<name>.json` overview listing.
    ///
    /// Children of kind `t1` become comments and children of kind `t3`
    /// become posts; anything else is ignored. Items whose body is empty
    /// or reads `[deleted]` or `[removed]` are dropped.
    pub fn parse(data: &str) -> Result<Page, Error> {
        let listing: Listing = serde_json::from_str(data)?;
        let children = listing.data.children.len();
        let items = listing
            .data
            .children
            .into_iter()
            .filter_map(|child| child.into_item())
            .collect();
        Ok(Page {
            after: listing.data.after,
            items,
            children,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    after: Option<String>,
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    kind: String,
    data: ChildData,
}

#[derive(Debug, Deserialize)]
struct ChildData {
    id: String,

    #[serde(default)]
    title: String,

    #[serde(default)]
    selftext: String,

    #[serde(default)]
    body: String,

    #[serde(default)]
    subreddit: String,

    #[serde(default)]
    created_utc: f64,

    #[serde(default)]
    score: i64,

    #[serde(default)]
    permalink: String,
}

impl Child {
    fn into_item(self) -> Option<ContentItem> {
        let kind = match self.kind.as_str() {
            "t1" => ItemKind::Comment,
            "t3" => ItemKind::Post,
            _ => return None,
        };

        let body = match kind {
            ItemKind::Comment => convert_html_entities(&self.data.body),
            ItemKind::Post => {
                let title = convert_html_entities(&self.data.title);
                let selftext = convert_html_entities(&self.data.selftext);
                format!("{title} {selftext}").trim().to_string()
            }
        };

        if body.is_empty() || body.eq_ignore_ascii_case("[deleted]") || body.eq_ignore_ascii_case("[removed]") {
            return None;
        }

        let created_utc =
            DateTime::from_timestamp(self.data.created_utc as i64, 0).unwrap_or_default();

        Some(ContentItem {
            id: self.data.id,
            kind,
            body,
            subreddit: self.data.subreddit,
            created_utc,
            score: self.data.score,
            permalink: format!("https://reddit.com{}", self.data.permalink),
        })
    }
}
