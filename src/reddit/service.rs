// SPDX-License-Identifier: Apache-2.0

//! HTTPS connector for the Reddit API.
//!
//! Service structures in this module provide a low-level way to interact
//! with the Reddit API over HTTPS, essentially a specialized HTTPS client
//! specifically for Reddit.

use crate::http::{HTTPError, HTTPResult, HTTPService};
use reqwest::blocking::Client;
use reqwest::header;

/// A service for retrieving a Reddit user's overview listing.
///
/// Using this trait, clients can implement different ways of connecting
/// to the Reddit API, such as an actual connector for production code,
/// and a mocked connector for testing purposes.
pub trait Service {
    /// Performs a GET request for one page of the user's overview
    /// listing (posts and comments interleaved, newest first) and
    /// returns the raw JSON body.
    ///
    /// `limit` is the page size and `after` is the pagination cursor
    /// returned by the previous page, if any.
    fn user_listing(&self, username: &str, limit: u32, after: Option<&str>)
    -> HTTPResult<String>;
}

/// A service that contacts the Reddit API directly to retrieve information.
pub struct RedditService {
    client: Client,
}

impl HTTPService for RedditService {}

impl Default for RedditService {
    /// Creates a new Reddit service.
    fn default() -> Self {
        Self {
            client: Self::client(),
        }
    }
}

impl RedditService {
    fn uri(&self, username: &str, limit: u32, after: Option<&str>) -> String {
        let mut uri = format!("https://www.reddit.com/user/{username}.json?limit={limit}");
        if let Some(after) = after {
            uri.push_str(&format!("&after={after}"));
        }
        uri
    }
}

impl Service for RedditService {
    fn user_listing(
        &self,
        username: &str,
        limit: u32,
        after: Option<&str>,
    ) -> HTTPResult<String> {
        let uri = self.uri(username, limit, after);
        let resp = self.client.get(&uri).send()?;

        if !resp.status().is_success() {
            return Err(HTTPError::Http(resp.status()));
        }

        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .ok_or(HTTPError::MissingContentType)?
            .to_str()?;
        if !content_type.starts_with("application/json") {
            return Err(HTTPError::UnexpectedContentType(content_type.to_string()));
        }

        Ok(resp.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_returns_a_uri_for_the_first_page() {
        let service = RedditService::default();
        let actual_uri = service.uri("mipadi", 100, None);
        let expected_uri = "https://www.reddit.com/user/mipadi.json?limit=100";
        assert_eq!(actual_uri, expected_uri);
    }

    #[test]
    fn it_returns_a_uri_with_a_pagination_cursor() {
        let service = RedditService::default();
        let actual_uri = service.uri("mipadi", 25, Some("t1_abc123"));
        let expected_uri = "https://www.reddit.com/user/mipadi.json?limit=25&after=t1_abc123";
        assert_eq!(actual_uri, expected_uri);
    }
}
