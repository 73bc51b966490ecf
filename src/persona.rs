// SPDX-License-Identifier: Apache-2.0

//! The persona data model.
//!
//! A [`Persona`] is the complete, evidence-backed profile produced by one
//! classification run. It is built once and never mutated afterwards; the
//! reporter only reads from it.

use crate::count::SubredditCounter;
use crate::reddit::thing::{ContentItem, ItemKind};
use crate::rules::{CategoryRule, Section};
use chrono::{DateTime, Utc};
use itertools::{Itertools, MinMaxResult};

/// Traceable proof backing a persona claim: a reference to the content
/// item that produced a match, the trigger that matched, and a snippet of
/// the surrounding text.
#[derive(Clone, Debug, PartialEq)]
pub struct Evidence {
    source: usize,
    item_id: String,
    kind: ItemKind,
    subreddit: String,
    permalink: String,
    trigger: String,
    label: String,
    snippet: String,
}

impl Evidence {
    pub fn new(source: usize, item: &ContentItem, trigger: &str, label: &str, snippet: String) -> Self {
        Self {
            source,
            item_id: item.id().to_string(),
            kind: item.kind(),
            subreddit: item.subreddit().to_string(),
            permalink: item.permalink().to_string(),
            trigger: trigger.to_string(),
            label: label.to_string(),
            snippet,
        }
    }

    /// The index of the source item in the classified input sequence.
    pub fn source(&self) -> usize {
        self.source
    }

    /// The Reddit id of the source item.
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Whether the source item is a post or a comment.
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The subreddit the source item was written in.
    pub fn subreddit(&self) -> &str {
        &self.subreddit
    }

    /// A permanent link to the source item.
    pub fn permalink(&self) -> &str {
        &self.permalink
    }

    /// The trigger pattern that matched.
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// The reported value the match counts toward (the trigger's tag,
    /// or the trigger itself).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// A short excerpt of the text surrounding the match.
    pub fn snippet(&self) -> &str {
        &self.snippet
    }
}

/// One distinct value within an enumerable category, with the number of
/// items it matched in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraitValue {
    pub label: String,
    pub count: usize,
}

/// A category's inferred value.
#[derive(Clone, Debug, PartialEq)]
pub enum CategoryValue {
    /// Distinct matched values, ranked by frequency descending; ties keep
    /// first-occurrence order.
    Traits(Vec<TraitValue>),

    /// A single discrete label derived from a polarity score.
    Label(String),
}

/// The classified result for one category: its value, a confidence count,
/// and the evidence supporting it.
///
/// A result is only ever constructed with at least one piece of evidence;
/// categories with no matches are omitted from the persona entirely.
#[derive(Clone, Debug)]
pub struct CategoryResult {
    name: &'static str,
    label: &'static str,
    section: Section,
    value: CategoryValue,
    confidence: usize,
    evidence: Vec<Evidence>,
}

impl CategoryResult {
    pub fn new(
        rule: &CategoryRule,
        value: CategoryValue,
        confidence: usize,
        evidence: Vec<Evidence>,
    ) -> Self {
        Self {
            name: rule.name(),
            label: rule.label(),
            section: rule.section(),
            value,
            confidence,
            evidence,
        }
    }

    /// The category's dotted identifier, e.g. `interests.technology`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The category's human-readable report label.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// The report section the category belongs to.
    pub fn section(&self) -> Section {
        self.section
    }

    /// The category's inferred value.
    pub fn value(&self) -> &CategoryValue {
        &self.value
    }

    /// The raw match count backing the category.
    pub fn confidence(&self) -> usize {
        self.confidence
    }

    /// The evidence supporting the category, in input order (Reddit
    /// listings are newest first, so this is also recency order).
    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }
}

/// Top-level statistics about the analyzed content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SummaryStats {
    items: usize,
    posts: usize,
    comments: usize,
    mean_score: f64,
    top_subreddits: Vec<(String, usize)>,
    date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl SummaryStats {
    /// The number of most-active subreddits reported.
    const TOP_SUBREDDITS: usize = 5;

    /// Computes summary statistics over the input sequence.
    pub fn from_items(items: &[ContentItem]) -> Self {
        if items.is_empty() {
            return Self::default();
        }

        let posts = items.iter().filter(|i| i.kind() == ItemKind::Post).count();
        let comments = items.len() - posts;
        let mean_score = items.iter().map(|i| i.score()).sum::<i64>() as f64 / items.len() as f64;
        let top_subreddits =
            SubredditCounter::from_iter(items.iter()).most_common(Self::TOP_SUBREDDITS);
        let date_range = match items.iter().map(|i| i.created_utc()).minmax() {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(at) => Some((at, at)),
            MinMaxResult::MinMax(first, last) => Some((first, last)),
        };

        Self {
            items: items.len(),
            posts,
            comments,
            mean_score,
            top_subreddits,
            date_range,
        }
    }

    /// Total number of items analyzed.
    pub fn items(&self) -> usize {
        self.items
    }

    /// Number of posts analyzed.
    pub fn posts(&self) -> usize {
        self.posts
    }

    /// Number of comments analyzed.
    pub fn comments(&self) -> usize {
        self.comments
    }

    /// Mean score across all analyzed items.
    pub fn mean_score(&self) -> f64 {
        self.mean_score
    }

    /// The user's most active subreddits, most active first.
    pub fn top_subreddits(&self) -> &[(String, usize)] {
        &self.top_subreddits
    }

    /// The timestamps of the oldest and newest analyzed items.
    pub fn date_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.date_range
    }

    /// How the user engages, judged by the post/comment ratio: a heavy
    /// commenter, an original poster, or balanced between the two.
    ///
    /// `None` when no items were analyzed.
    pub fn engagement_style(&self) -> Option<&'static str> {
        if self.items == 0 {
            return None;
        }
        let style = if self.comments > self.posts * 3 {
            "More of a commenter than original poster"
        } else if self.posts > self.comments {
            "Prefers creating original content"
        } else {
            "Balanced between posting and commenting"
        };
        Some(style)
    }

    /// How the user's content is received, judged by the mean score.
    ///
    /// `None` when no items were analyzed.
    pub fn content_reception(&self) -> Option<&'static str> {
        if self.items == 0 {
            return None;
        }
        let reception = if self.mean_score > 10.0 {
            "Generally well-received content"
        } else if self.mean_score > 1.0 {
            "Moderately engaging content"
        } else {
            "Niche or less popular content"
        };
        Some(reception)
    }
}

/// The complete categorized, evidence-backed profile of a user.
#[derive(Clone, Debug)]
pub struct Persona {
    username: String,
    stats: SummaryStats,
    categories: Vec<CategoryResult>,
}

impl Persona {
    pub fn new(
        username: impl Into<String>,
        stats: SummaryStats,
        categories: Vec<CategoryResult>,
    ) -> Self {
        Self {
            username: username.into(),
            stats,
            categories,
        }
    }

    /// The Redditor's username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Summary statistics over the analyzed content.
    pub fn stats(&self) -> &SummaryStats {
        &self.stats
    }

    /// All populated categories, in taxonomy (report) order.
    pub fn categories(&self) -> &[CategoryResult] {
        &self.categories
    }

    /// The populated categories belonging to the given report section.
    pub fn in_section(&self, section: Section) -> impl Iterator<Item = &CategoryResult> {
        self.categories
            .iter()
            .filter(move |result| result.section() == section)
    }

    /// True if no category gathered any evidence.
    pub fn is_uncategorized(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    mod summary_stats {
        use super::super::*;
        use crate::test_utils::{comment, post};

        #[test]
        fn it_counts_posts_and_comments() {
            let items = vec![
                comment("c1", "one", "rust"),
                post("p1", "two", "rust"),
                comment("c2", "three", "python"),
            ];
            let stats = SummaryStats::from_items(&items);
            assert_eq!(stats.items(), 3);
            assert_eq!(stats.posts(), 1);
            assert_eq!(stats.comments(), 2);
        }

        #[test]
        fn it_ranks_subreddits_by_activity() {
            let items = vec![
                comment("c1", "one", "rust"),
                comment("c2", "two", "python"),
                comment("c3", "three", "rust"),
            ];
            let stats = SummaryStats::from_items(&items);
            assert_eq!(stats.top_subreddits()[0], (String::from("rust"), 2));
            assert_eq!(stats.top_subreddits()[1], (String::from("python"), 1));
        }

        #[test]
        fn it_is_zeroed_for_an_empty_sequence() {
            let stats = SummaryStats::from_items(&[]);
            assert_eq!(stats.items(), 0);
            assert_eq!(stats.posts(), 0);
            assert_eq!(stats.comments(), 0);
            assert_eq!(stats.mean_score(), 0.0);
            assert!(stats.top_subreddits().is_empty());
            assert!(stats.date_range().is_none());
        }

        #[test]
        fn it_computes_a_date_range() {
            let items = vec![comment("c1", "one", "rust"), comment("c2", "two", "rust")];
            let stats = SummaryStats::from_items(&items);
            let (first, last) = stats.date_range().unwrap();
            assert!(first <= last);
        }

        fn scored(id: &str, score: i64) -> ContentItem {
            ContentItem::new(
                id,
                ItemKind::Comment,
                "some text",
                "rust",
                Utc::now(),
                score,
                "https://reddit.com/r/rust/comments/x/",
            )
        }

        #[test]
        fn it_judges_a_heavy_commenter() {
            let items = vec![
                comment("c1", "one", "rust"),
                comment("c2", "two", "rust"),
                comment("c3", "three", "rust"),
                comment("c4", "four", "rust"),
                post("p1", "five", "rust"),
            ];
            let stats = SummaryStats::from_items(&items);
            assert_eq!(
                stats.engagement_style(),
                Some("More of a commenter than original poster")
            );
        }

        #[test]
        fn it_judges_an_original_poster() {
            let items = vec![
                post("p1", "one", "rust"),
                post("p2", "two", "rust"),
                comment("c1", "three", "rust"),
            ];
            let stats = SummaryStats::from_items(&items);
            assert_eq!(
                stats.engagement_style(),
                Some("Prefers creating original content")
            );
        }

        #[test]
        fn it_judges_a_balanced_engagement_style() {
            let items = vec![
                comment("c1", "one", "rust"),
                comment("c2", "two", "rust"),
                post("p1", "three", "rust"),
            ];
            let stats = SummaryStats::from_items(&items);
            assert_eq!(
                stats.engagement_style(),
                Some("Balanced between posting and commenting")
            );
        }

        #[test]
        fn it_judges_content_reception_from_the_mean_score() {
            let hot = SummaryStats::from_items(&[scored("c1", 30), scored("c2", 10)]);
            assert_eq!(
                hot.content_reception(),
                Some("Generally well-received content")
            );

            let mild = SummaryStats::from_items(&[scored("c1", 2), scored("c2", 4)]);
            assert_eq!(mild.content_reception(), Some("Moderately engaging content"));

            let cold = SummaryStats::from_items(&[scored("c1", 1), scored("c2", 0)]);
            assert_eq!(cold.content_reception(), Some("Niche or less popular content"));
        }

        #[test]
        fn it_has_no_behavior_labels_for_an_empty_sequence() {
            let stats = SummaryStats::from_items(&[]);
            assert!(stats.engagement_style().is_none());
            assert!(stats.content_reception().is_none());
        }
    }
}
