//! Message resolution
//!
//! Turns the content fields of a [`BarConfig`] into the ordered list of
//! [`Message`]s the bar cycles through.
//!
//! # Priority
//!
//! The first source producing at least one message wins; there is no
//! fallthrough once a source is chosen.
//!
//! 1. Slot messages (`message1` .. `message5`, with optional `link1` .. `link5`)
//! 2. `multipleText`, a `|`-separated list using `[LINK:url|text]` markers
//! 3. `barText` as the only message, taken verbatim
//!
//! Resolution is pure: the same configuration always yields the same list.

pub mod links;
pub mod sanitize;

use serde::Serialize;
use std::fmt;

use crate::config::{BarConfig, Slot};
use crate::models::{Anchor, Message};

pub use sanitize::plain_text;

/// Which configuration field the messages came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageSource {
    Slots,
    MultipleText,
    BarText,
    /// No content field produced anything
    Empty,
}

impl MessageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slots => "slots",
            Self::MultipleText => "multiple-text",
            Self::BarText => "bar-text",
            Self::Empty => "empty",
        }
    }
}

impl fmt::Display for MessageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the ordered message list for a bar
///
/// An empty list means there is nothing to show; callers fall back to the raw
/// `barText`.
///
/// # Examples
///
/// ```
/// use utility_bar::config::BarConfig;
/// use utility_bar::parser::resolve;
///
/// let config = BarConfig {
///     multiple_text: "A | B|C ".to_string(),
///     ..Default::default()
/// };
/// let messages = resolve(&config);
/// assert_eq!(messages.len(), 3);
/// assert_eq!(messages[1].markup(), "B");
/// ```
pub fn resolve(config: &BarConfig) -> Vec<Message> {
    resolve_with_source(config).1
}

/// Resolve messages and report which source produced them
pub fn resolve_with_source(config: &BarConfig) -> (MessageSource, Vec<Message>) {
    let messages = slot_messages(config);
    if !messages.is_empty() {
        return (MessageSource::Slots, messages);
    }

    let messages = multiple_text_messages(&config.multiple_text);
    if !messages.is_empty() {
        return (MessageSource::MultipleText, messages);
    }

    if !config.bar_text.is_empty() {
        return (MessageSource::BarText, vec![Message::new(config.bar_text.as_str())]);
    }

    (MessageSource::Empty, Vec::new())
}

/// Build one message per non-empty slot, in slot order
pub fn slot_messages(config: &BarConfig) -> Vec<Message> {
    config
        .slots()
        .iter()
        .filter(|slot| !slot.message.trim().is_empty())
        .map(|slot| slot_message(slot, config.link_underline))
        .collect()
}

fn slot_message(slot: &Slot<'_>, underline: bool) -> Message {
    // Whole message is a link: "text @https://url"
    if let Some((text, url)) = links::split_full_link(slot.message) {
        return Message::new(
            Anchor {
                href: url,
                label: text,
                underline,
            }
            .to_markup(),
        );
    }

    // Separate link field wraps the whole message
    if !slot.link.is_empty() {
        return Message::new(
            Anchor {
                href: slot.link,
                label: slot.message,
                underline,
            }
            .to_markup(),
        );
    }

    Message::new(links::replace_inline_links(slot.message, underline))
}

/// Split `multipleText` into trimmed segments with link markers substituted
pub fn multiple_text_messages(text: &str) -> Vec<Message> {
    if text.is_empty() {
        return Vec::new();
    }

    links::split_segments(text)
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| Message::new(links::replace_link_markers(segment)))
        .collect()
}
