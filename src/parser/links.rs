//! Inline link micro-syntax
//!
//! Two dialects are understood:
//!
//! - slot messages: a trailing `text @https://url` turns the whole message into
//!   a link, and `[label @https://url]` embeds a link inside the text
//! - multi-text segments: `[LINK:https://url|label]`
//!
//! Anything that does not match is left untouched.

use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::LazyLock;

use crate::models::Anchor;

// Pre-compiled regex patterns
static FULL_LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+@(https?://\S+)$").unwrap());

static INLINE_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\s?)\[([^\]]+?)\s*@(https?://[^\s\]]+)\](\s?)").unwrap()
});

static MARKER_LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[LINK:([^|\]]+)\|([^\]]+)\]").unwrap());

/// Split a whole-message link `text @url` into `(text, url)`
///
/// Messages containing `[` never qualify, since they use the inline dialect.
///
/// # Examples
///
/// ```
/// use utility_bar::parser::links::split_full_link;
///
/// assert_eq!(
///     split_full_link("Sale ends soon @https://x.io"),
///     Some(("Sale ends soon", "https://x.io"))
/// );
/// assert_eq!(split_full_link("No link here"), None);
/// ```
pub fn split_full_link(message: &str) -> Option<(&str, &str)> {
    if message.contains('[') {
        return None;
    }
    let caps = FULL_LINK_REGEX.captures(message)?;
    let text = caps.get(1)?.as_str().trim();
    let url = caps.get(2)?.as_str().trim();
    Some((text, url))
}

/// Replace every `[label @url]` with an inline anchor
///
/// A single space on either side of the brackets is kept exactly as written.
pub fn replace_inline_links(message: &str, underline: bool) -> String {
    INLINE_LINK_REGEX
        .replace_all(message, |caps: &Captures<'_>| {
            let anchor = Anchor {
                href: &caps[3],
                label: &caps[2],
                underline,
            };
            format!("{}{}{}", &caps[1], anchor.to_markup(), &caps[4])
        })
        .into_owned()
}

/// Replace every `[LINK:url|label]` marker with an underlined anchor
pub fn replace_link_markers(segment: &str) -> String {
    MARKER_LINK_REGEX
        .replace_all(segment, |caps: &Captures<'_>| {
            Anchor {
                href: &caps[1],
                label: &caps[2],
                underline: true,
            }
            .to_markup()
        })
        .into_owned()
}

/// Split a multi-text list on `|`, keeping `[LINK:url|label]` markers whole
///
/// Only separators inside a complete marker are skipped; a stray `[` does
/// not affect splitting.
///
/// # Examples
///
/// ```
/// use utility_bar::parser::links::split_segments;
///
/// let parts = split_segments("Free shipping | [LINK:https://x.io|Shop] now");
/// assert_eq!(parts, vec!["Free shipping ", " [LINK:https://x.io|Shop] now"]);
/// ```
pub fn split_segments(text: &str) -> Vec<&str> {
    let markers: Vec<Range<usize>> = MARKER_LINK_REGEX
        .find_iter(text)
        .map(|m| m.range())
        .collect();

    let mut segments = Vec::new();
    let mut start = 0;
    for (i, _) in text.match_indices('|') {
        if markers.iter().any(|marker| marker.contains(&i)) {
            continue;
        }
        segments.push(&text[start..i]);
        start = i + 1;
    }
    segments.push(&text[start..]);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_link_requires_http_scheme() {
        assert_eq!(split_full_link("Mail us @support"), None);
        assert_eq!(split_full_link("Go @ftp://x.io"), None);
        assert_eq!(split_full_link("Go @http://x.io"), Some(("Go", "http://x.io")));
    }

    #[test]
    fn test_full_link_needs_trailing_url() {
        assert_eq!(split_full_link("Visit @https://x.io today"), None);
    }

    #[test]
    fn test_full_link_rejected_with_brackets() {
        assert_eq!(split_full_link("See [this @https://a.io] @https://b.io"), None);
    }

    #[test]
    fn test_inline_link_preserves_spaces() {
        let out = replace_inline_links("Get [20% off @https://x.io] today", true);
        assert_eq!(
            out,
            r#"Get <a href="https://x.io" style="color: inherit; text-decoration: underline; font-weight: bold;">20% off</a> today"#
        );
    }

    #[test]
    fn test_inline_link_without_spaces() {
        let out = replace_inline_links("([here @https://x.io])", false);
        assert_eq!(
            out,
            r#"(<a href="https://x.io" style="color: inherit; text-decoration: none; font-weight: bold;">here</a>)"#
        );
    }

    #[test]
    fn test_inline_link_multiple() {
        let out = replace_inline_links("[a @https://a.io] and [b @https://b.io]", true);
        assert_eq!(out.matches("<a href=").count(), 2);
        assert!(out.contains("</a> and <a"));
    }

    #[test]
    fn test_malformed_brackets_pass_through() {
        let text = "Use code [SAVE10] or [broken @notaurl]";
        assert_eq!(replace_inline_links(text, true), text);
    }

    #[test]
    fn test_link_marker() {
        let out = replace_link_markers("Shop [LINK:https://x.io/sale|now]!");
        assert_eq!(
            out,
            r#"Shop <a href="https://x.io/sale" style="color: inherit; text-decoration: underline; font-weight: bold;">now</a>!"#
        );
    }

    #[test]
    fn test_link_marker_malformed() {
        assert_eq!(replace_link_markers("[LINK:https://x.io]"), "[LINK:https://x.io]");
    }

    #[test]
    fn test_split_segments_plain() {
        assert_eq!(split_segments("A|B|C"), vec!["A", "B", "C"]);
        assert_eq!(split_segments("solo"), vec!["solo"]);
        assert_eq!(split_segments("A||B"), vec!["A", "", "B"]);
    }

    #[test]
    fn test_split_segments_unclosed_bracket_still_splits() {
        assert_eq!(
            split_segments("Use code [SAVE10 | Free shipping | New arrivals"),
            vec!["Use code [SAVE10 ", " Free shipping ", " New arrivals"]
        );
        assert_eq!(split_segments("[promo]|B"), vec!["[promo]", "B"]);
    }
}
