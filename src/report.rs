// SPDX-License-Identifier: Apache-2.0

//! Renders a [`Persona`] into the plain-text persona report.
//!
//! The report has a fixed section order: an overview, the eight persona
//! sections, and a numbered citation list. Every claim line carries the
//! bracketed indices of the citations that back it; a claim with no
//! citation is never emitted. Rendering is a pure function of the persona
//! and the clock, so rendering the same persona twice produces identical
//! output.

use crate::clock::Clock;
use crate::persona::{CategoryResult, CategoryValue, Evidence, Persona};
use crate::rules::Section;
use indoc::formatdoc;
use std::fs;
use std::path::Path;
use thiserror::Error;

const WIDTH: usize = 65;

const DISCLAIMER: &str = "This persona is generated from publicly available Reddit posts and \
comments using keyword and pattern matching. It reflects patterns in digital behavior and may \
not fully represent the individual's actual personality or circumstances.";

/// An error writing the rendered report.
#[derive(Debug, Error)]
pub enum Error {
    /// The report file could not be written.
    #[error("could not write report to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Writes a rendered report to `path`.
pub fn write(path: &Path, report: &str) -> Result<(), Error> {
    fs::write(path, report).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Renders the persona as a plain-text report.
///
/// `clock` supplies the generation timestamp in the header; inject a
/// fixed clock to make output reproducible.
pub fn render(persona: &Persona, profile_url: &str, clock: &impl Clock) -> String {
    let citations = Citations::index(persona);

    let mut sections = Vec::new();
    sections.push(header(persona, profile_url, clock));
    sections.push(overview(persona));
    for section in Section::ALL {
        sections.push(persona_section(persona, section, &citations));
    }
    sections.push(citation_list(&citations));
    sections.push(disclaimer());

    let mut report = sections.join("\n\n");
    report.push('\n');
    report
}

/// A numbering of every evidence entry in the persona, in the order the
/// report walks them.
struct Citations<'p> {
    entries: Vec<&'p Evidence>,
}

impl<'p> Citations<'p> {
    fn index(persona: &'p Persona) -> Self {
        let entries = persona
            .categories()
            .iter()
            .flat_map(|result| result.evidence())
            .collect();
        Self { entries }
    }

    /// The 1-based citation number of an evidence entry.
    ///
    /// Evidence entries are unique per (category, item, trigger), so
    /// pointer identity is enough to find the entry.
    fn number(&self, evidence: &Evidence) -> usize {
        self.entries
            .iter()
            .position(|e| std::ptr::eq(*e, evidence))
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    fn markers<'a>(&self, evidence: impl Iterator<Item = &'a Evidence>) -> String {
        evidence
            .map(|e| format!("[{}]", self.number(e)))
            .collect::<Vec<_>>()
            .join("")
    }
}

fn heading(title: &str) -> String {
    let rule = "=".repeat(WIDTH);
    format!("{rule}\n{title:^width$}\n{rule}", width = WIDTH)
}

fn header(persona: &Persona, profile_url: &str, clock: &impl Clock) -> String {
    formatdoc! {"
        {heading}
        Generated on: {timestamp} UTC
        Profile URL:  {profile_url}
        Username:     u/{username}",
        heading = heading("REDDIT USER PERSONA ANALYSIS"),
        timestamp = clock.now().format("%Y-%m-%d %H:%M:%S"),
        username = persona.username(),
    }
}

fn overview(persona: &Persona) -> String {
    let stats = persona.stats();

    let subreddits = if stats.top_subreddits().is_empty() {
        String::from("n/a")
    } else {
        stats
            .top_subreddits()
            .iter()
            .map(|(name, count)| format!("r/{name} ({count})"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let date_range = match stats.date_range() {
        Some((first, last)) => format!(
            "{} to {}",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        ),
        None => String::from("n/a"),
    };

    formatdoc! {"
        {heading}
        Posts analyzed:          {posts}
        Comments analyzed:       {comments}
        Average score:           {score:.2}
        Engagement style:        {engagement}
        Content reception:       {reception}
        Most active subreddits:  {subreddits}
        Activity range:          {date_range}",
        heading = heading("USER OVERVIEW"),
        posts = stats.posts(),
        comments = stats.comments(),
        score = stats.mean_score(),
        engagement = stats.engagement_style().unwrap_or("n/a"),
        reception = stats.content_reception().unwrap_or("n/a"),
    }
}

fn persona_section(persona: &Persona, section: Section, citations: &Citations) -> String {
    let results: Vec<&CategoryResult> = persona.in_section(section).collect();

    let body = if results.is_empty() {
        String::from("Insufficient evidence in this category.")
    } else {
        results
            .iter()
            .map(|result| category_block(result, citations))
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    format!("{}\n{}", heading(section.title()), body)
}

fn category_block(result: &CategoryResult, citations: &Citations) -> String {
    match result.value() {
        CategoryValue::Traits(traits) => {
            let lines = traits
                .iter()
                .map(|t| {
                    let mentions = if t.count == 1 { "mention" } else { "mentions" };
                    let markers = citations.markers(
                        result
                            .evidence()
                            .iter()
                            .filter(|e| e.label() == t.label),
                    );
                    format!("  - {} ({} {mentions}) {markers}", t.label, t.count)
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}:\n{lines}", result.label())
        }
        CategoryValue::Label(label) => {
            let matches = if result.confidence() == 1 {
                "match"
            } else {
                "matches"
            };
            let markers = citations.markers(result.evidence().iter());
            format!(
                "{}: {label} ({} {matches}) {markers}",
                result.label(),
                result.confidence()
            )
        }
    }
}

fn citation_list(citations: &Citations) -> String {
    let body = if citations.entries.is_empty() {
        String::from("No citations available.")
    } else {
        citations
            .entries
            .iter()
            .enumerate()
            .map(|(i, evidence)| {
                formatdoc! {r#"
                    [{n}] Matched "{trigger}" in a {kind} in r/{subreddit}
                        "{snippet}"
                        {permalink}"#,
                    n = i + 1,
                    trigger = evidence.trigger(),
                    kind = evidence.kind(),
                    subreddit = evidence.subreddit(),
                    snippet = evidence.snippet(),
                    permalink = evidence.permalink(),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!("{}\n{body}", heading("CITATIONS & EVIDENCE"))
}

fn disclaimer() -> String {
    format!("{}\n{}", heading("DISCLAIMER"), textwrap::fill(DISCLAIMER, WIDTH))
}
