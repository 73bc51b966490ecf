// SPDX-License-Identifier: Apache-2.0

//! Clients for reading a user's posting history from the Reddit API.

use crate::http::HTTPError;
use crate::reddit::service::{RedditService, Service};
use crate::reddit::thing::{self, ContentItem, Page};
use log::{info, warn};
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// The largest page size the Reddit listing endpoint will honor.
const PAGE_SIZE: u32 = 100;

/// The default delay between network calls, for rate-limit compliance.
const REQUEST_DELAY: Duration = Duration::from_secs(1);

/// A client error.
#[derive(Debug, Error)]
pub enum Error {
    /// The user has no accessible content (or does not exist).
    #[error("no accessible content for user '{0}'")]
    NotFound(String),

    /// A transient network or rate-limit failure that persisted through
    /// a retry.
    #[error("transient failure talking to Reddit: {0}")]
    Transient(HTTPError),

    /// A non-transient error from the underlying HTTP service.
    #[error("Service error: {0}")]
    Service(HTTPError),

    /// An error parsing listing data.
    #[error("Parse error: {0}")]
    Parse(#[from] thing::Error),
}

/// Retrieves a bounded, ordered sequence of a user's posts and comments.
///
/// The fetcher paginates through the user's overview listing with the
/// `after` cursor, sleeping between network calls to respect Reddit's
/// rate limits, and retries a transient failure exactly once before
/// giving up.
#[derive(Debug)]
pub struct Fetcher<S: Service> {
    service: S,
    delay: Duration,
}

impl Default for Fetcher<RedditService> {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher<RedditService> {
    /// Creates a fetcher that talks to the live Reddit API.
    pub fn new() -> Self {
        Self::with_service(RedditService::default())
    }
}

impl<S: Service> Fetcher<S> {
    /// Creates a fetcher backed by the given service implementation.
    pub fn with_service(service: S) -> Self {
        Self {
            service,
            delay: REQUEST_DELAY,
        }
    }

    /// Overrides the inter-request delay.
    ///
    /// Production code should leave the default in place; tests use a
    /// zero delay so paginated fixtures load instantly.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fetches up to `limit` of the user's most recent posts and
    /// comments, newest first. A limit of zero yields an empty sequence
    /// without contacting Reddit at all.
    ///
    /// Returns [`Error::NotFound`] if the user does not exist or has no
    /// accessible content, and [`Error::Transient`] if a network or
    /// rate-limit failure persists through one retry.
    pub fn fetch(&self, username: &str, limit: usize) -> Result<Vec<ContentItem>, Error> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut items: Vec<ContentItem> = Vec::new();
        let mut after: Option<String> = None;
        let mut requests = 0usize;

        while items.len() < limit {
            // The delay keys on requests made, not items kept: a page
            // whose children are all deleted still counts as a network
            // call.
            if requests > 0 {
                thread::sleep(self.delay);
            }
            requests += 1;

            let remaining = limit - items.len();
            let page_size = remaining.min(PAGE_SIZE as usize) as u32;
            let body = self.get_page(username, page_size, after.as_deref())?;
            let page = Page::parse(&body)?;

            info!(
                "fetched page of {} items for u/{username} ({} usable)",
                page.children,
                page.items.len()
            );

            let exhausted = page.children == 0 || page.after.is_none();
            items.extend(page.items);
            if exhausted {
                break;
            }
            after = page.after;
        }

        items.truncate(limit);
        if items.is_empty() {
            return Err(Error::NotFound(username.to_string()));
        }
        Ok(items)
    }

    /// Requests one listing page, retrying once after a delay if the
    /// failure looks transient.
    fn get_page(&self, username: &str, limit: u32, after: Option<&str>) -> Result<String, Error> {
        match self.service.user_listing(username, limit, after) {
            Ok(body) => Ok(body),
            Err(err) if err.is_not_found() => Err(Error::NotFound(username.to_string())),
            Err(err) if err.is_transient() => {
                warn!("transient failure fetching u/{username}, retrying once: {err}");
                thread::sleep(self.delay);
                match self.service.user_listing(username, limit, after) {
                    Ok(body) => Ok(body),
                    Err(retry_err) if retry_err.is_not_found() => {
                        Err(Error::NotFound(username.to_string()))
                    }
                    Err(retry_err) if retry_err.is_transient() => Err(Error::Transient(retry_err)),
                    Err(retry_err) => Err(Error::Service(retry_err)),
                }
            }
            Err(err) => Err(Error::Service(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    mod user_with_data {
        use crate::reddit::Fetcher;
        use crate::test_utils::TestService;
        use std::time::Duration;

        fn fetcher() -> Fetcher<TestService<'static>> {
            Fetcher::with_service(TestService::new("wanderer")).delay(Duration::ZERO)
        }

        #[test]
        fn it_fetches_all_pages() {
            let items = fetcher().fetch("wanderer", 100).unwrap();
            assert_eq!(items.len(), 8);
        }

        #[test]
        fn it_preserves_listing_order() {
            let items = fetcher().fetch("wanderer", 100).unwrap();
            assert_eq!(items[0].id(), "c1");
            assert_eq!(items.last().unwrap().id(), "p2");
        }

        #[test]
        fn it_never_exceeds_the_requested_limit() {
            let items = fetcher().fetch("wanderer", 4).unwrap();
            assert_eq!(items.len(), 4);
        }

        #[test]
        fn it_truncates_across_page_boundaries() {
            let items = fetcher().fetch("wanderer", 7).unwrap();
            assert_eq!(items.len(), 7);
        }

        #[test]
        fn it_returns_no_items_for_a_zero_limit() {
            let items = fetcher().fetch("wanderer", 0).unwrap();
            assert!(items.is_empty());
        }
    }

    mod user_with_deleted_content {
        use crate::reddit::Fetcher;
        use crate::test_utils::TestService;
        use std::time::{Duration, Instant};

        #[test]
        fn it_skips_pages_whose_children_are_all_deleted() {
            let fetcher = Fetcher::with_service(TestService::new("ghost")).delay(Duration::ZERO);
            let items = fetcher.fetch("ghost", 100).unwrap();
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].id(), "g2");
        }

        #[test]
        fn it_delays_between_requests_even_when_a_page_yields_no_items() {
            let delay = Duration::from_millis(50);
            let fetcher = Fetcher::with_service(TestService::new("ghost")).delay(delay);
            let start = Instant::now();
            let items = fetcher.fetch("ghost", 100).unwrap();
            assert_eq!(items.len(), 1);
            assert!(
                start.elapsed() >= delay,
                "second page was requested without the inter-request delay"
            );
        }
    }

    mod user_with_no_data {
        use crate::reddit::Fetcher;
        use crate::reddit::client::Error;
        use crate::test_utils::TestService;
        use std::time::Duration;

        #[test]
        fn it_fails_with_not_found() {
            let fetcher =
                Fetcher::with_service(TestService::new("empty")).delay(Duration::ZERO);
            let result = fetcher.fetch("nobody", 100);
            assert!(matches!(result, Err(Error::NotFound(_))));
        }
    }

    mod missing_user {
        use crate::reddit::Fetcher;
        use crate::reddit::client::Error;
        use crate::test_utils::NotFoundService;
        use std::time::Duration;

        #[test]
        fn it_fails_with_not_found() {
            let fetcher = Fetcher::with_service(NotFoundService).delay(Duration::ZERO);
            let result = fetcher.fetch("doesnotexist", 100);
            assert!(matches!(result, Err(Error::NotFound(_))));
        }
    }

    mod flaky_service {
        use crate::reddit::Fetcher;
        use crate::reddit::client::Error;
        use crate::test_utils::{FlakyService, UnavailableService};
        use std::time::Duration;

        #[test]
        fn it_retries_a_transient_failure_once() {
            let service = FlakyService::new("wanderer");
            let fetcher = Fetcher::with_service(service).delay(Duration::ZERO);
            let items = fetcher.fetch("wanderer", 100).unwrap();
            assert_eq!(items.len(), 8);
        }

        #[test]
        fn it_gives_up_after_one_retry() {
            let fetcher = Fetcher::with_service(UnavailableService).delay(Duration::ZERO);
            let result = fetcher.fetch("wanderer", 100);
            assert!(matches!(result, Err(Error::Transient(_))));
        }
    }
}
