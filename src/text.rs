//! Helpful utilities for working with text.

use htmlentity::entity::{self, ICodedDataTrait};
use std::ops::Range;

/// Converts HTML entities into their single-character equivalents.
///
/// For example, Reddit returns "&" as "&amp;", ">" as "&gt;",
/// and "<" as "&lt;"; this function will convert those HTML
/// entities into single, human-readable characters.
///
/// Leading and trailing whitespace will also be trimmed from the string.
///
/// # Examples
///
/// ```
/// use redsona::text::convert_html_entities;
/// let raw = "&lt;This &amp; That&gt;";
/// let converted = convert_html_entities(raw);
/// assert_eq!(converted, "<This & That>");
/// ```
///
/// ```
/// use redsona::text::convert_html_entities;
/// let raw = "  &lt;This &amp; That&gt;  ";
/// let converted = convert_html_entities(raw);
/// assert_eq!(converted, "<This & That>");
/// ```
///
/// ```
/// use redsona::text::convert_html_entities;
/// let raw = "A Plaintext Post";
/// let converted = convert_html_entities(raw);
/// assert_eq!(converted, raw);
/// ```
pub fn convert_html_entities(text: &str) -> String {
    let text = text.trim();
    entity::decode(text.as_bytes())
        .to_string()
        .unwrap_or(text.to_string())
}

/// Extracts a short, single-line snippet of `text` surrounding the byte
/// `range` of a match.
///
/// Up to `context` bytes on each side of the match are included, widened
/// to the nearest character boundary so multi-byte characters are never
/// split. Runs of whitespace (including newlines) collapse to a single
/// space, and an ellipsis marks each side that was truncated.
///
/// # Examples
///
/// ```
/// use redsona::text::snippet;
/// let text = "I have been learning rust for a few months now";
/// let s = snippet(text, 21..25, 10);
/// assert_eq!(s, "...learning rust for a few...");
/// ```
pub fn snippet(text: &str, range: Range<usize>, context: usize) -> String {
    let mut start = range.start.saturating_sub(context);
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = range.end.saturating_add(context).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }

    let body = text[start..end].split_whitespace().collect::<Vec<_>>().join(" ");

    let mut s = String::new();
    if start > 0 {
        s.push_str("...");
    }
    s.push_str(&body);
    if end < text.len() {
        s.push_str("...");
    }
    s
}

#[cfg(test)]
mod tests {
    mod snippets {
        use super::super::*;

        #[test]
        fn it_returns_the_whole_text_when_it_is_short() {
            let text = "i love python";
            let actual = snippet(text, 7..13, 30);
            assert_eq!(actual, "i love python");
        }

        #[test]
        fn it_truncates_long_text_on_both_sides() {
            let text = "the quick brown fox jumped over the lazy dog one more time";
            let actual = snippet(text, 20..26, 6);
            assert_eq!(actual, "...n fox jumped over...");
        }

        #[test]
        fn it_collapses_newlines_into_spaces() {
            let text = "first line\nsecond\nthird";
            let actual = snippet(text, 11..17, 30);
            assert_eq!(actual, "first line second third");
        }

        #[test]
        fn it_respects_multibyte_character_boundaries() {
            let text = "crème brûlée is my favorite dessert";
            // "favorite" starts at byte 21; a context of 3 would land inside
            // the two-byte "û" sequence without the boundary adjustment.
            let start = text.find("is").unwrap();
            let actual = snippet(text, start..start + 2, 3);
            assert!(actual.contains("is"));
        }
    }
}
