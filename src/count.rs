//! General-purpose counting capabilities.

use counter::Counter;

/// A thing that is attached to a subreddit.
pub trait HasSubreddit {
    /// The subreddit the thing appears in.
    fn subreddit(&self) -> &str;
}

impl<T: HasSubreddit> HasSubreddit for &T {
    fn subreddit(&self) -> &str {
        (*self).subreddit()
    }
}

/// A pair of subreddit name and count.
pub type SubredditCount = (String, usize);

/// Groups content items by subreddit and provides a count of the number
/// of items in each subreddit.
#[derive(Debug)]
pub struct SubredditCounter {
    counts: Counter<String>,
}

impl SubredditCounter {
    /// Groups and counts content items.
    ///
    /// `iter` is an iterator over anything that has a subreddit attached
    /// to it.
    pub fn from_iter<T: HasSubreddit>(iter: impl Iterator<Item = T>) -> Self {
        let counts = iter
            .map(|item| String::from(item.subreddit()))
            .collect::<Counter<_>>();
        SubredditCounter { counts }
    }

    /// The `n` most active subreddits, most active first.
    ///
    /// Subreddits with equal counts are ordered by name, compared
    /// case-insensitively, so the result is deterministic.
    pub fn most_common(&self, n: usize) -> Vec<SubredditCount> {
        self.counts
            .most_common_tiebreaker(|lhs, rhs| Ord::cmp(&lhs.to_lowercase(), &rhs.to_lowercase()))
            .into_iter()
            .take(n)
            .collect()
    }
}
