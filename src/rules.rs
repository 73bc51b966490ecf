// SPDX-License-Identifier: Apache-2.0

//! The persona taxonomy: the fixed table of categories and the trigger
//! patterns that feed them.
//!
//! Categories differ only in data, so there is no per-category type here;
//! a single [`CategoryRule`] structure parameterizes the classifier. The
//! built-in taxonomy is compiled once, at first use, and is read-only
//! afterwards.

use regex::{Regex, RegexBuilder};
use std::ops::Range;
use std::sync::LazyLock;

/// The report section a category belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Demographics,
    Interests,
    Personality,
    Communication,
    Lifestyle,
    Values,
    Behavior,
    Skills,
}

impl Section {
    /// All sections, in the order they appear in the rendered report.
    pub const ALL: [Section; 8] = [
        Section::Demographics,
        Section::Interests,
        Section::Personality,
        Section::Communication,
        Section::Lifestyle,
        Section::Values,
        Section::Behavior,
        Section::Skills,
    ];

    /// The section's report heading.
    pub fn title(self) -> &'static str {
        match self {
            Section::Demographics => "DEMOGRAPHICS",
            Section::Interests => "INTERESTS & HOBBIES",
            Section::Personality => "PERSONALITY TRAITS",
            Section::Communication => "COMMUNICATION STYLE",
            Section::Lifestyle => "LIFESTYLE PREFERENCES",
            Section::Values => "VALUES & BELIEFS",
            Section::Behavior => "ONLINE BEHAVIOR",
            Section::Skills => "TECHNICAL PROFICIENCY",
        }
    }
}

/// How a trigger contributes to a scalar category's score.
///
/// Neutral triggers only count toward evidence and frequency; positive
/// and negative triggers additionally pull a scalar category toward one
/// of its two poles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    Neutral,
    Positive,
    Negative,
}

/// How a category derives its reported value.
#[derive(Clone, Copy, Debug)]
pub enum RuleKind {
    /// The value is the set of distinct matched triggers (or trigger
    /// tags), ranked by match frequency.
    Enumerable,

    /// The value is one of three labels chosen by the balance of
    /// positive- and negative-polarity matches.
    Scalar {
        positive: &'static str,
        negative: &'static str,
        mixed: &'static str,
    },
}

/// A single trigger pattern within a category.
#[derive(Debug)]
pub struct Trigger {
    pattern: &'static str,
    regex: Regex,
    tag: Option<&'static str>,
    polarity: Polarity,
}

impl Trigger {
    /// A literal keyword trigger, matched case-insensitively on word
    /// boundaries.
    pub fn keyword(pattern: &'static str) -> Self {
        Self::build(pattern, &keyword_source(pattern), None, Polarity::Neutral)
    }

    /// A keyword trigger whose matches are reported under `tag` instead
    /// of the keyword itself. Several triggers may share one tag.
    pub fn tagged(pattern: &'static str, tag: &'static str) -> Self {
        Self::build(pattern, &keyword_source(pattern), Some(tag), Polarity::Neutral)
    }

    /// A keyword trigger with a scalar polarity.
    pub fn polar(pattern: &'static str, polarity: Polarity) -> Self {
        Self::build(pattern, &keyword_source(pattern), None, polarity)
    }

    /// A raw regular-expression trigger, reported under `tag`.
    pub fn pattern(pattern: &'static str, tag: &'static str) -> Self {
        Self::build(pattern, pattern, Some(tag), Polarity::Neutral)
    }

    fn build(
        pattern: &'static str,
        source: &str,
        tag: Option<&'static str>,
        polarity: Polarity,
    ) -> Self {
        let regex = RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .expect("invalid trigger pattern");
        Self {
            pattern,
            regex,
            tag,
            polarity,
        }
    }

    /// The trigger pattern as written in the taxonomy.
    pub fn pattern_text(&self) -> &'static str {
        self.pattern
    }

    /// The value this trigger reports under: its tag if it has one,
    /// otherwise the pattern itself.
    pub fn label(&self) -> &'static str {
        self.tag.unwrap_or(self.pattern)
    }

    /// The trigger's scalar polarity.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// The byte range of the first match of this trigger in `text`,
    /// if any. A trigger matches at most once per text, so repeated
    /// occurrences within one item never double-count.
    pub fn find(&self, text: &str) -> Option<Range<usize>> {
        self.regex.find(text).map(|m| m.range())
    }
}

/// Escapes a keyword into a regex source string, anchoring it on word
/// boundaries where the keyword itself starts or ends with a word
/// character (a boundary after a symbol like `+` would never match).
fn keyword_source(pattern: &str) -> String {
    let escaped = regex::escape(pattern);
    let lead = if pattern.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
        r"\b"
    } else {
        ""
    };
    let trail = if pattern.ends_with(|c: char| c.is_alphanumeric() || c == '_') {
        r"\b"
    } else {
        ""
    };
    format!("{lead}{escaped}{trail}")
}

/// A named persona category and its trigger patterns.
#[derive(Debug)]
pub struct CategoryRule {
    name: &'static str,
    label: &'static str,
    section: Section,
    kind: RuleKind,
    triggers: Vec<Trigger>,
}

impl CategoryRule {
    /// Creates a category rule.
    ///
    /// Generally rules come from [`taxonomy()`]; this constructor exists
    /// so the classifier can be driven by bespoke rule sets in tests.
    pub fn new(
        name: &'static str,
        label: &'static str,
        section: Section,
        kind: RuleKind,
        triggers: Vec<Trigger>,
    ) -> Self {
        Self {
            name,
            label,
            section,
            kind,
            triggers,
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

    /// How the category derives its value.
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// The category's trigger patterns.
    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }
}

/// The built-in taxonomy, in report order.
pub fn taxonomy() -> &'static [CategoryRule] {
    &TAXONOMY
}

static TAXONOMY: LazyLock<Vec<CategoryRule>> = LazyLock::new(build_taxonomy);

fn build_taxonomy() -> Vec<CategoryRule> {
    use Polarity::{Negative, Positive};
    use RuleKind::{Enumerable, Scalar};
    use Trigger as T;

    vec![
        CategoryRule::new(
            "demographics.age",
            "Age indicators",
            Section::Demographics,
            Enumerable,
            vec![
                T::tagged("college", "young"),
                T::tagged("university", "young"),
                T::tagged("student", "young"),
                T::tagged("freshman", "young"),
                T::tagged("sophomore", "young"),
                T::pattern(r"\bin my (?:late |early )?(?:teens|20s)\b", "young"),
                T::tagged("mortgage", "adult"),
                T::tagged("marriage", "adult"),
                T::tagged("my kids", "adult"),
                T::tagged("career", "adult"),
                T::pattern(r"\bin my (?:late |early )?[34]0s\b", "adult"),
                T::tagged("retirement", "senior"),
                T::tagged("retired", "senior"),
                T::tagged("grandkids", "senior"),
                T::tagged("pension", "senior"),
                T::pattern(r"\bin my (?:late |early )?[567]0s\b", "senior"),
            ],
        ),
        CategoryRule::new(
            "demographics.location",
            "Location indicators",
            Section::Demographics,
            Enumerable,
            vec![
                T::keyword("usa"),
                T::keyword("canada"),
                T::keyword("australia"),
                T::keyword("germany"),
                T::keyword("france"),
                T::keyword("california"),
                T::keyword("texas"),
                T::keyword("new york"),
                T::keyword("london"),
                T::keyword("toronto"),
            ],
        ),
        CategoryRule::new(
            "interests.technology",
            "Technology",
            Section::Interests,
            Enumerable,
            vec![
                T::keyword("programming"),
                T::keyword("software"),
                T::keyword("coding"),
                T::keyword("open source"),
                T::keyword("gadget"),
            ],
        ),
        CategoryRule::new(
            "interests.gaming",
            "Gaming",
            Section::Interests,
            Enumerable,
            vec![
                T::keyword("gaming"),
                T::keyword("xbox"),
                T::keyword("playstation"),
                T::keyword("nintendo"),
                T::keyword("steam"),
                T::keyword("rpg"),
            ],
        ),
        CategoryRule::new(
            "interests.fitness",
            "Fitness",
            Section::Interests,
            Enumerable,
            vec![
                T::keyword("fitness"),
                T::keyword("gym"),
                T::keyword("workout"),
                T::keyword("bodybuilding"),
                T::keyword("cardio"),
            ],
        ),
        CategoryRule::new(
            "interests.finance",
            "Finance",
            Section::Interests,
            Enumerable,
            vec![
                T::keyword("investing"),
                T::keyword("stocks"),
                T::keyword("crypto"),
                T::keyword("bitcoin"),
                T::keyword("index fund"),
            ],
        ),
        CategoryRule::new(
            "interests.entertainment",
            "Entertainment",
            Section::Interests,
            Enumerable,
            vec![
                T::keyword("movies"),
                T::keyword("netflix"),
                T::keyword("music"),
                T::keyword("books"),
                T::keyword("anime"),
            ],
        ),
        CategoryRule::new(
            "interests.creative",
            "Creative pursuits",
            Section::Interests,
            Enumerable,
            vec![
                T::keyword("photography"),
                T::keyword("drawing"),
                T::keyword("painting"),
                T::keyword("writing"),
                T::keyword("woodworking"),
            ],
        ),
        CategoryRule::new(
            "personality.sentiment",
            "Overall sentiment",
            Section::Personality,
            Scalar {
                positive: "Generally positive and optimistic",
                negative: "More critical or analytical",
                mixed: "Balanced emotional expression",
            },
            vec![
                T::polar("love", Positive),
                T::polar("great", Positive),
                T::polar("awesome", Positive),
                T::polar("amazing", Positive),
                T::polar("excellent", Positive),
                T::polar("wonderful", Positive),
                T::polar("hate", Negative),
                T::polar("terrible", Negative),
                T::polar("awful", Negative),
                T::polar("annoying", Negative),
                T::polar("worst", Negative),
                T::polar("garbage", Negative),
            ],
        ),
        CategoryRule::new(
            "communication.tone",
            "Tone",
            Section::Communication,
            Scalar {
                positive: "Formal and professional",
                negative: "Casual and informal",
                mixed: "Mixed formal and informal",
            },
            vec![
                T::polar("furthermore", Positive),
                T::polar("however", Positive),
                T::polar("therefore", Positive),
                T::polar("consequently", Positive),
                T::polar("moreover", Positive),
                T::polar("nevertheless", Positive),
                T::polar("lol", Negative),
                T::polar("omg", Negative),
                T::polar("wtf", Negative),
                T::polar("tbh", Negative),
                T::polar("imo", Negative),
                T::polar("lmao", Negative),
                T::polar("gonna", Negative),
            ],
        ),
        CategoryRule::new(
            "lifestyle.fitness",
            "Fitness oriented",
            Section::Lifestyle,
            Enumerable,
            vec![
                T::keyword("gym"),
                T::keyword("workout"),
                T::keyword("exercise"),
                T::keyword("protein"),
                T::keyword("marathon"),
            ],
        ),
        CategoryRule::new(
            "lifestyle.food",
            "Food enthusiast",
            Section::Lifestyle,
            Enumerable,
            vec![
                T::keyword("cooking"),
                T::keyword("recipe"),
                T::keyword("restaurant"),
                T::keyword("baking"),
                T::keyword("meal prep"),
            ],
        ),
        CategoryRule::new(
            "lifestyle.travel",
            "Traveler",
            Section::Lifestyle,
            Enumerable,
            vec![
                T::keyword("travel"),
                T::keyword("trip"),
                T::keyword("vacation"),
                T::keyword("flight"),
                T::keyword("backpacking"),
            ],
        ),
        CategoryRule::new(
            "lifestyle.home",
            "Homebody",
            Section::Lifestyle,
            Enumerable,
            vec![
                T::keyword("netflix"),
                T::keyword("cozy"),
                T::keyword("staying in"),
                T::keyword("board games"),
                T::keyword("my couch"),
            ],
        ),
        CategoryRule::new(
            "values.privacy",
            "Privacy conscious",
            Section::Values,
            Enumerable,
            vec![
                T::keyword("privacy"),
                T::keyword("surveillance"),
                T::keyword("tracking"),
                T::keyword("encryption"),
                T::keyword("data collection"),
            ],
        ),
        CategoryRule::new(
            "values.environment",
            "Environmentally conscious",
            Section::Values,
            Enumerable,
            vec![
                T::keyword("climate"),
                T::keyword("sustainability"),
                T::keyword("renewable"),
                T::keyword("recycling"),
                T::keyword("carbon"),
            ],
        ),
        CategoryRule::new(
            "values.community",
            "Community oriented",
            Section::Values,
            Enumerable,
            vec![
                T::keyword("volunteer"),
                T::keyword("community"),
                T::keyword("donate"),
                T::keyword("mutual aid"),
                T::keyword("support group"),
            ],
        ),
        CategoryRule::new(
            "values.progress",
            "Technology optimist",
            Section::Values,
            Enumerable,
            vec![
                T::keyword("innovation"),
                T::keyword("automation"),
                T::keyword("breakthrough"),
                T::keyword("futurism"),
            ],
        ),
        CategoryRule::new(
            "behavior.engagement",
            "Engagement habits",
            Section::Behavior,
            Enumerable,
            vec![
                T::keyword("karma"),
                T::keyword("upvote"),
                T::keyword("downvote"),
                T::keyword("crosspost"),
                T::keyword("repost"),
                T::keyword("lurker"),
                T::keyword("cake day"),
            ],
        ),
        CategoryRule::new(
            "skills.languages",
            "Programming languages",
            Section::Skills,
            Enumerable,
            vec![
                T::keyword("python"),
                T::keyword("javascript"),
                T::keyword("typescript"),
                T::keyword("java"),
                T::keyword("c++"),
                T::keyword("ruby"),
                T::keyword("rust"),
                T::keyword("golang"),
                T::keyword("php"),
            ],
        ),
        CategoryRule::new(
            "skills.web",
            "Web technologies",
            Section::Skills,
            Enumerable,
            vec![
                T::keyword("html"),
                T::keyword("css"),
                T::keyword("react"),
                T::keyword("angular"),
                T::keyword("vue"),
                T::keyword("node.js"),
                T::keyword("django"),
            ],
        ),
        CategoryRule::new(
            "skills.tools",
            "Tools & platforms",
            Section::Skills,
            Enumerable,
            vec![
                T::keyword("git"),
                T::keyword("docker"),
                T::keyword("kubernetes"),
                T::keyword("aws"),
                T::keyword("linux"),
                T::keyword("mysql"),
                T::keyword("postgres"),
                T::keyword("mongodb"),
            ],
        ),
        CategoryRule::new(
            "skills.concepts",
            "Concepts",
            Section::Skills,
            Enumerable,
            vec![
                T::keyword("algorithm"),
                T::keyword("database"),
                T::keyword("api"),
                T::keyword("machine learning"),
                T::keyword("blockchain"),
                T::keyword("compiler"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    mod triggers {
        use super::super::*;

        #[test]
        fn it_matches_keywords_case_insensitively() {
            let trigger = Trigger::keyword("python");
            assert!(trigger.find("I love Python!").is_some());
        }

        #[test]
        fn it_matches_on_word_boundaries() {
            let trigger = Trigger::keyword("java");
            assert!(trigger.find("java is fine").is_some());
            assert!(trigger.find("javascript is fine").is_none());
        }

        #[test]
        fn it_matches_keywords_ending_in_symbols() {
            let trigger = Trigger::keyword("c++");
            assert!(trigger.find("i write c++ at work").is_some());
        }

        #[test]
        fn it_returns_the_byte_range_of_the_match() {
            let trigger = Trigger::keyword("docker");
            let range = trigger.find("we use Docker here").unwrap();
            assert_eq!(range, 7..13);
        }

        #[test]
        fn it_reports_under_its_tag_when_tagged() {
            let trigger = Trigger::tagged("college", "young");
            assert_eq!(trigger.label(), "young");
            assert_eq!(trigger.pattern_text(), "college");
        }

        #[test]
        fn it_reports_under_its_pattern_when_untagged() {
            let trigger = Trigger::keyword("docker");
            assert_eq!(trigger.label(), "docker");
        }

        #[test]
        fn it_matches_raw_patterns() {
            let trigger = Trigger::pattern(r"\bin my (?:late |early )?(?:teens|20s)\b", "young");
            assert!(trigger.find("I'm in my early 20s").is_some());
            assert!(trigger.find("in my 50s now").is_none());
        }
    }

    mod taxonomy {
        use super::super::*;

        #[test]
        fn it_compiles_all_built_in_rules() {
            assert!(!taxonomy().is_empty());
        }

        #[test]
        fn it_covers_every_report_section() {
            for section in Section::ALL {
                assert!(
                    taxonomy().iter().any(|rule| rule.section() == section),
                    "no rule for section {section:?}"
                );
            }
        }

        #[test]
        fn it_gives_every_rule_at_least_one_trigger() {
            for rule in taxonomy() {
                assert!(!rule.triggers().is_empty(), "{} has no triggers", rule.name());
            }
        }

        #[test]
        fn it_gives_scalar_rules_polarized_triggers() {
            for rule in taxonomy() {
                if let RuleKind::Scalar { .. } = rule.kind() {
                    assert!(
                        rule.triggers()
                            .iter()
                            .all(|t| t.polarity() != Polarity::Neutral),
                        "{} has a neutral trigger",
                        rule.name()
                    );
                }
            }
        }
    }
}
