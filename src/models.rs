// Core data structures for the announcement bar

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placeholder replaced with the live countdown text
pub const TIMER_TOKEN: &str = "[TIMER]";

/// A piece of renderable bar markup (plain text or text wrapping anchors)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(String);

impl Message {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Raw markup
    pub fn markup(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the message carries the countdown placeholder
    pub fn has_timer(&self) -> bool {
        self.0.contains(TIMER_TOKEN)
    }

    /// Markup with every placeholder replaced by `countdown`
    pub fn with_timer(&self, countdown: &str) -> String {
        self.0.replace(TIMER_TOKEN, countdown)
    }

    pub fn into_markup(self) -> String {
        self.0
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Message {
    fn from(markup: &str) -> Self {
        Self::new(markup)
    }
}

/// Link embedded in a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor<'a> {
    pub href: &'a str,
    pub label: &'a str,
    pub underline: bool,
}

impl Anchor<'_> {
    /// Render as an inline anchor inheriting the bar color
    pub fn to_markup(&self) -> String {
        let decoration = if self.underline { "underline" } else { "none" };
        format!(
            r#"<a href="{}" style="color: inherit; text-decoration: {decoration}; font-weight: bold;">{}</a>"#,
            html_escape::encode_double_quoted_attribute(self.href),
            self.label
        )
    }
}

/// Time left until the countdown end, recomputed every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CountdownState {
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
    Expired,
}

impl CountdownState {
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

/// Animation used when advancing between messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideDirection {
    Horizontal,
    Vertical,
    #[default]
    Fade,
    FadeLetter,
}

impl SlideDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Fade => "fade",
            Self::FadeLetter => "fade-letter",
        }
    }

    /// Parse a direction name, falling back to fade for anything unknown
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "horizontal" => Self::Horizontal,
            "vertical" => Self::Vertical,
            "fade-letter" => Self::FadeLetter,
            _ => Self::Fade,
        }
    }
}

impl fmt::Display for SlideDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Unknown names deserialize as fade rather than failing the whole file
impl<'de> Deserialize<'de> for SlideDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}

impl FromStr for SlideDirection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Where the bar is attached on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    Top,
    Bottom,
    #[default]
    TopFixed,
    BottomFixed,
}

impl Placement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::TopFixed => "top-fixed",
            Self::BottomFixed => "bottom-fixed",
        }
    }

    /// Create from string, unknown values fall back to top-fixed
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "bottom-fixed" => Self::BottomFixed,
            _ => Self::TopFixed,
        }
    }

    /// Only `bottom-fixed` pins the bar to the bottom edge
    pub fn is_bottom(&self) -> bool {
        matches!(self, Self::BottomFixed)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Placement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_timer_substitution() {
        let msg = Message::new("Ends in [TIMER] - hurry, [TIMER]!");
        assert!(msg.has_timer());
        assert_eq!(msg.with_timer("01:02"), "Ends in 01:02 - hurry, 01:02!");
    }

    #[test]
    fn test_timer_token_is_case_sensitive() {
        let msg = Message::new("Ends in [timer]");
        assert!(!msg.has_timer());
        assert_eq!(msg.with_timer("x"), "Ends in [timer]");
    }

    #[test]
    fn test_anchor_markup() {
        let anchor = Anchor {
            href: "https://x.io",
            label: "Shop",
            underline: false,
        };
        assert_eq!(
            anchor.to_markup(),
            r#"<a href="https://x.io" style="color: inherit; text-decoration: none; font-weight: bold;">Shop</a>"#
        );
    }

    #[test]
    fn test_anchor_escapes_href_quotes() {
        let anchor = Anchor {
            href: "https://x.io/?q=\"a\"",
            label: "Q",
            underline: true,
        };
        assert!(anchor.to_markup().contains("href=\"https://x.io/?q=&quot;a&quot;\""));
    }

    #[test]
    fn test_slide_direction_parse() {
        assert_eq!(SlideDirection::parse("horizontal"), SlideDirection::Horizontal);
        assert_eq!(SlideDirection::parse("VERTICAL"), SlideDirection::Vertical);
        assert_eq!(SlideDirection::parse("fade-letter"), SlideDirection::FadeLetter);
        assert_eq!(SlideDirection::parse("spin"), SlideDirection::Fade);
        assert_eq!(SlideDirection::default(), SlideDirection::Fade);
    }

    #[test]
    fn test_placement_parse() {
        assert_eq!(Placement::parse("bottom-fixed"), Placement::BottomFixed);
        assert!(Placement::parse("bottom-fixed").is_bottom());
        assert!(!Placement::parse("bottom").is_bottom());
        assert_eq!(Placement::parse("nowhere"), Placement::TopFixed);
    }
}
