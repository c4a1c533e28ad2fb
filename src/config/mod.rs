//! Configuration management for the announcement bar
//!
//! A bar is configured by a flat set of named options. They usually arrive as
//! `data-utility-*` attributes on the embedding script element, but can also be
//! loaded from a TOML file. Either way the result is an immutable [`BarConfig`]
//! that is resolved once and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::models::{Placement, SlideDirection};

/// Number of discrete message slots
pub const SLOT_COUNT: usize = 5;

/// Attribute prefix used on the embedding element
pub const ATTRIBUTE_PREFIX: &str = "data-utility-";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// None of the content fields carry text
    #[error("barText, multipleText, or at least one message is required")]
    MissingContent,

    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Attribute given on the command line is not `key=value`
    #[error("Invalid attribute '{0}', expected key=value")]
    InvalidAttribute(String),
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bar content, timer and presentation options
    pub bar: BarConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

/// Resolved configuration of one announcement bar
///
/// Field names follow the attribute names of the embedding element
/// (`data-utility-<name>`), which is also the key format of the `[bar]`
/// table in TOML files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BarConfig {
    // Content
    #[serde(rename = "text")]
    pub bar_text: String,
    #[serde(rename = "link")]
    pub bar_link: String,
    pub multiple_text: String,
    pub message1: String,
    pub message2: String,
    pub message3: String,
    pub message4: String,
    pub message5: String,
    pub link1: String,
    pub link2: String,
    pub link3: String,
    pub link4: String,
    pub link5: String,
    pub link_underline: bool,

    // Countdown
    pub timer_end: String,
    pub timer_format: String,

    // Rotation
    /// Seconds between messages, zero or less disables rotation
    pub slide_interval: i64,
    /// Transition duration in milliseconds
    pub slide_speed: u64,
    pub slide_direction: SlideDirection,
    pub slide_easing: String,
    pub auto_start: bool,
    pub pause_on_hover: bool,

    // Presentation, passed through to the renderer
    pub bg_color: String,
    pub text_color: String,
    #[serde(rename = "height")]
    pub bar_height: String,
    pub placement: Placement,
    pub font_size: String,
    pub font_weight: String,
    pub font_family: String,
    pub padding: String,
    pub border_radius: String,
    pub border: String,
    pub box_shadow: String,
    pub text_align: String,
    pub line_height: String,
    pub letter_spacing: String,
    pub text_transform: String,
    pub opacity: String,
    pub transition: String,
    pub z_index: String,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            bar_text: String::new(),
            bar_link: String::new(),
            multiple_text: String::new(),
            message1: String::new(),
            message2: String::new(),
            message3: String::new(),
            message4: String::new(),
            message5: String::new(),
            link1: String::new(),
            link2: String::new(),
            link3: String::new(),
            link4: String::new(),
            link5: String::new(),
            link_underline: true,
            timer_end: String::new(),
            timer_format: String::from("hh:mm:ss"),
            slide_interval: 0,
            slide_speed: 3000,
            slide_direction: SlideDirection::default(),
            slide_easing: String::from("ease-in-out"),
            auto_start: true,
            pause_on_hover: true,
            bg_color: String::from("#ff4757"),
            text_color: String::from("#ffffff"),
            bar_height: String::from("40px"),
            placement: Placement::default(),
            font_size: String::from("14px"),
            font_weight: String::from("500"),
            font_family: String::from("Arial, sans-serif"),
            padding: String::from("0 20px"),
            border_radius: String::from("0"),
            border: String::from("none"),
            box_shadow: String::from("none"),
            text_align: String::from("center"),
            line_height: String::from("1.4"),
            letter_spacing: String::from("normal"),
            text_transform: String::from("none"),
            opacity: String::from("1"),
            transition: String::from("all 0.3s ease"),
            z_index: String::from("9999"),
        }
    }
}

/// One (message, link) slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    pub message: &'a str,
    pub link: &'a str,
}

impl BarConfig {
    /// Build a configuration from the attributes of the embedding element
    ///
    /// Keys may carry the full `data-utility-` prefix, just `utility-`, or be
    /// bare. Empty values keep the default, as do numbers that do not start
    /// with an integer.
    pub fn from_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in attributes {
            config.apply_attribute(key.as_ref(), value.as_ref());
        }
        config
    }

    /// Apply a single attribute on top of the current values
    pub fn apply_attribute(&mut self, key: &str, value: &str) {
        let key = key.trim();
        let name = key
            .strip_prefix(ATTRIBUTE_PREFIX)
            .or_else(|| key.strip_prefix("utility-"))
            .unwrap_or(key);

        // Booleans default to true unless explicitly "false"
        match name {
            "link-underline" => {
                self.link_underline = value != "false";
                return;
            }
            "auto-start" => {
                self.auto_start = value != "false";
                return;
            }
            "pause-on-hover" => {
                self.pause_on_hover = value != "false";
                return;
            }
            _ => {}
        }

        if value.is_empty() {
            return;
        }

        let target = match name {
            "text" => &mut self.bar_text,
            "link" => &mut self.bar_link,
            "multiple-text" => &mut self.multiple_text,
            "message1" => &mut self.message1,
            "message2" => &mut self.message2,
            "message3" => &mut self.message3,
            "message4" => &mut self.message4,
            "message5" => &mut self.message5,
            "link1" => &mut self.link1,
            "link2" => &mut self.link2,
            "link3" => &mut self.link3,
            "link4" => &mut self.link4,
            "link5" => &mut self.link5,
            "timer-end" => &mut self.timer_end,
            "timer-format" => &mut self.timer_format,
            "slide-easing" => &mut self.slide_easing,
            "bg-color" => &mut self.bg_color,
            "text-color" => &mut self.text_color,
            "height" => &mut self.bar_height,
            "font-size" => &mut self.font_size,
            "font-weight" => &mut self.font_weight,
            "font-family" => &mut self.font_family,
            "padding" => &mut self.padding,
            "border-radius" => &mut self.border_radius,
            "border" => &mut self.border,
            "box-shadow" => &mut self.box_shadow,
            "text-align" => &mut self.text_align,
            "line-height" => &mut self.line_height,
            "letter-spacing" => &mut self.letter_spacing,
            "text-transform" => &mut self.text_transform,
            "opacity" => &mut self.opacity,
            "transition" => &mut self.transition,
            "z-index" => &mut self.z_index,
            "slide-direction" => {
                self.slide_direction = SlideDirection::parse(value);
                return;
            }
            "placement" => {
                self.placement = Placement::parse(value);
                return;
            }
            "slide-interval" => {
                match parse_int_prefix(value) {
                    Some(secs) => self.slide_interval = secs,
                    None => tracing::warn!(key, value, "Ignoring non-numeric slide interval"),
                }
                return;
            }
            "slide-speed" => {
                match parse_int_prefix(value).filter(|ms| *ms > 0) {
                    Some(ms) => self.slide_speed = ms as u64,
                    None => tracing::warn!(key, value, "Ignoring invalid slide speed"),
                }
                return;
            }
            _ => {
                tracing::debug!(key, "Ignoring unknown bar attribute");
                return;
            }
        };
        *target = value.to_string();
    }

    /// The five message slots in order
    pub fn slots(&self) -> [Slot<'_>; SLOT_COUNT] {
        [
            Slot { message: &self.message1, link: &self.link1 },
            Slot { message: &self.message2, link: &self.link2 },
            Slot { message: &self.message3, link: &self.link3 },
            Slot { message: &self.message4, link: &self.link4 },
            Slot { message: &self.message5, link: &self.link5 },
        ]
    }

    /// Whether any slot carries a non-blank message
    pub fn has_slot_messages(&self) -> bool {
        self.slots().iter().any(|slot| !slot.message.trim().is_empty())
    }

    /// Whether `multipleText` has at least one non-blank segment
    pub fn has_multiple_text(&self) -> bool {
        self.multiple_text
            .split('|')
            .any(|segment| !segment.trim().is_empty())
    }

    /// Check the content precondition
    ///
    /// # Errors
    /// Returns `ConfigError::MissingContent` when barText is empty and
    /// multipleText and every slot message are blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bar_text.is_empty() && !self.has_multiple_text() && !self.has_slot_messages() {
            return Err(ConfigError::MissingContent);
        }
        Ok(())
    }

    /// Interval between rotation steps, `None` when rotation is disabled
    #[must_use]
    pub fn slide_interval(&self) -> Option<Duration> {
        u64::try_from(self.slide_interval)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Transition duration
    #[must_use]
    pub fn slide_speed(&self) -> Duration {
        Duration::from_millis(self.slide_speed)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Split a `key=value` pair as given on the command line
pub fn parse_attribute(pair: &str) -> Result<(String, String), ConfigError> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidAttribute(pair.to_string()))?;
    if key.trim().is_empty() {
        return Err(ConfigError::InvalidAttribute(pair.to_string()));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

/// Leading integer of a string, the way page scripts read numeric attributes
fn parse_int_prefix(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
