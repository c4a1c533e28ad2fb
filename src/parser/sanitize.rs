//! Markup-to-text helpers for non-browser output
//!
//! Console renderers and log lines show the visible text of a message rather
//! than its markup.

use regex::Regex;
use std::sync::LazyLock;

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Visible text of a piece of markup
///
/// Strips tags, decodes HTML entities and collapses whitespace.
///
/// # Examples
///
/// ```
/// use utility_bar::parser::sanitize::plain_text;
///
/// let markup = r#"Save <a href="https://x.io">20%&nbsp;off</a>  today"#;
/// assert_eq!(plain_text(markup), "Save 20% off today");
/// ```
pub fn plain_text(markup: &str) -> String {
    let stripped = TAG_REGEX.replace_all(markup, "");
    let decoded = html_escape::decode_html_entities(&stripped);
    WHITESPACE_REGEX.replace_all(decoded.trim(), " ").into_owned()
}

/// Split visible text into the characters animated by the letter fade
///
/// Spaces become non-breaking so they keep their width inside inline blocks.
pub fn letters(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| if c == ' ' { '\u{00A0}' } else { c })
        .map(String::from)
        .collect()
}
