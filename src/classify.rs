// SPDX-License-Identifier: Apache-2.0

//! The classification core: turns a sequence of content items into a
//! [`Persona`].
//!
//! Classification is pure and total: it performs no I/O, never fails on
//! malformed or empty text (such items simply match nothing), and the
//! same input always produces the same persona. Matching itself is
//! exposed through [`match_rule`] so rule behavior can be tested in
//! isolation, without a network or a full classifier.

use crate::persona::{CategoryResult, CategoryValue, Evidence, Persona, SummaryStats, TraitValue};
use crate::reddit::thing::ContentItem;
use crate::rules::{self, CategoryRule, Polarity, RuleKind, Trigger};
use crate::text::snippet;
use log::{debug, info};
use std::cmp::Reverse;
use std::ops::Range;

/// How many bytes of surrounding text an evidence snippet keeps on each
/// side of a match.
const SNIPPET_CONTEXT: usize = 40;

/// A scalar category's score must clear this magnitude before either pole
/// is claimed; anything closer to zero reports the mixed label.
const SCALAR_THRESHOLD: f64 = 0.25;

/// One trigger match within a single text.
#[derive(Debug)]
pub struct RuleMatch<'r> {
    /// The trigger that matched.
    pub trigger: &'r Trigger,

    /// The byte range of the match within the text.
    pub range: Range<usize>,
}

/// Scans `text` against every trigger of `rule` and returns the matches.
///
/// Each trigger matches at most once, so repeating a word within one item
/// never inflates its count; distinct triggers may all match the same
/// text. Matching is case-insensitive. Empty text matches nothing.
pub fn match_rule<'r>(text: &str, rule: &'r CategoryRule) -> Vec<RuleMatch<'r>> {
    rule.triggers()
        .iter()
        .filter_map(|trigger| {
            trigger
                .find(text)
                .map(|range| RuleMatch { trigger, range })
        })
        .collect()
}

/// Classifies content items against a fixed rule taxonomy.
#[derive(Debug)]
pub struct Classifier<'r> {
    rules: &'r [CategoryRule],
}

impl Default for Classifier<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier<'static> {
    /// A classifier over the built-in taxonomy.
    pub fn new() -> Self {
        Self {
            rules: rules::taxonomy(),
        }
    }
}

impl<'r> Classifier<'r> {
    /// A classifier over a bespoke rule set.
    pub fn with_rules(rules: &'r [CategoryRule]) -> Self {
        Self { rules }
    }

    /// Builds a persona for `username` from the given content items.
    ///
    /// Every category that gathered at least one match appears in the
    /// result with its evidence; categories with no matches are omitted.
    /// An empty input sequence yields a persona with zeroed summary
    /// statistics and no categories.
    pub fn classify(&self, username: &str, items: &[ContentItem]) -> Persona {
        let stats = SummaryStats::from_items(items);
        let categories: Vec<CategoryResult> = self
            .rules
            .iter()
            .filter_map(|rule| self.classify_rule(rule, items))
            .collect();
        info!(
            "classified {} items into {} populated categories",
            items.len(),
            categories.len()
        );
        Persona::new(username, stats, categories)
    }

    fn classify_rule(&self, rule: &CategoryRule, items: &[ContentItem]) -> Option<CategoryResult> {
        let mut evidence: Vec<Evidence> = Vec::new();
        let mut traits: Vec<TraitValue> = Vec::new();
        let mut positive = 0usize;
        let mut negative = 0usize;

        for (index, item) in items.iter().enumerate() {
            for m in match_rule(item.body(), rule) {
                let excerpt = snippet(item.body(), m.range, SNIPPET_CONTEXT);
                evidence.push(Evidence::new(
                    index,
                    item,
                    m.trigger.pattern_text(),
                    m.trigger.label(),
                    excerpt,
                ));

                match traits.iter_mut().find(|t| t.label == m.trigger.label()) {
                    Some(t) => t.count += 1,
                    None => traits.push(TraitValue {
                        label: m.trigger.label().to_string(),
                        count: 1,
                    }),
                }

                match m.trigger.polarity() {
                    Polarity::Positive => positive += 1,
                    Polarity::Negative => negative += 1,
                    Polarity::Neutral => {}
                }
            }
        }

        if evidence.is_empty() {
            return None;
        }

        let confidence = evidence.len();
        debug!("{}: {} matches", rule.name(), confidence);

        let value = match rule.kind() {
            RuleKind::Enumerable => {
                // Stable sort keeps first-occurrence order for equal counts.
                traits.sort_by_key(|t| Reverse(t.count));
                CategoryValue::Traits(traits)
            }
            RuleKind::Scalar {
                positive: pos_label,
                negative: neg_label,
                mixed,
            } => {
                let score = (positive as f64 - negative as f64) / confidence as f64;
                let label = if score >= SCALAR_THRESHOLD {
                    pos_label
                } else if score <= -SCALAR_THRESHOLD {
                    neg_label
                } else {
                    mixed
                };
                CategoryValue::Label(label.to_string())
            }
        };

        Some(CategoryResult::new(rule, value, confidence, evidence))
    }
}
