//! Inline style declarations for the bar, its slides and their transitions

use serde::Serialize;

use super::{style_map, StyleMap};
use crate::config::BarConfig;
use crate::models::SlideDirection;
use crate::scheduler::RotationSettings;

/// Keyframes and classes used by rotating slides
pub const SLIDE_STYLESHEET: &str = "\
@keyframes fadeInLetter {
  from { opacity: 0; transform: translateY(10px); }
  to { opacity: 1; transform: translateY(0); }
}
@keyframes fadeOutLetter {
  from { opacity: 1; transform: translateY(0); }
  to { opacity: 0; transform: translateY(-10px); }
}
.utility-slide {
  position: absolute;
  top: 0;
  left: 0;
  width: 100%;
  height: 100%;
  display: flex;
  align-items: center;
  justify-content: center;
  will-change: transform, opacity;
}
.letter {
  display: inline-block;
  white-space: pre;
}
";

/// Staggered per-letter keyframe animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LetterAnimation {
    pub keyframes: &'static str,
    pub duration_ms: u32,
    /// Extra delay per letter index
    pub step_ms: u32,
}

impl LetterAnimation {
    pub const FADE_IN: Self = Self {
        keyframes: "fadeInLetter",
        duration_ms: 300,
        step_ms: 30,
    };

    pub const FADE_OUT: Self = Self {
        keyframes: "fadeOutLetter",
        duration_ms: 300,
        step_ms: 20,
    };

    /// `animation` value for the letter at `index`
    ///
    /// # Examples
    ///
    /// ```
    /// use utility_bar::render::LetterAnimation;
    ///
    /// assert_eq!(LetterAnimation::FADE_IN.declaration(3), "fadeInLetter 300ms 90ms both");
    /// ```
    pub fn declaration(&self, index: usize) -> String {
        format!(
            "{} {}ms {}ms both",
            self.keyframes,
            self.duration_ms,
            index as u64 * u64::from(self.step_ms)
        )
    }
}

/// Inline styles of the bar container
pub fn container_styles(config: &BarConfig) -> StyleMap {
    let mut styles = style_map([
        ("position", "fixed".to_string()),
        ("z-index", config.z_index.clone()),
        ("width", "100%".to_string()),
        ("height", config.bar_height.clone()),
        ("background-color", config.bg_color.clone()),
        ("color", config.text_color.clone()),
        ("display", "flex".to_string()),
        ("align-items", "center".to_string()),
        ("justify-content", "center".to_string()),
        ("font-size", config.font_size.clone()),
        ("font-weight", config.font_weight.clone()),
        ("font-family", config.font_family.clone()),
        ("text-align", config.text_align.clone()),
        ("box-sizing", "border-box".to_string()),
        ("padding", config.padding.clone()),
        ("line-height", config.line_height.clone()),
        ("border-radius", config.border_radius.clone()),
        ("border", config.border.clone()),
        ("box-shadow", config.box_shadow.clone()),
        ("letter-spacing", config.letter_spacing.clone()),
        ("text-transform", config.text_transform.clone()),
        ("opacity", config.opacity.clone()),
        ("transition", config.transition.clone()),
    ]);

    let cursor = if config.bar_link.is_empty() { "default" } else { "pointer" };
    styles.insert("cursor", cursor.to_string());

    if config.placement.is_bottom() {
        styles.insert("bottom", "0".to_string());
    } else {
        styles.insert("top", "0".to_string());
    }
    styles
}

/// Styles of the link element wrapping a clickable bar
pub fn link_wrapper_styles() -> StyleMap {
    style_map([
        ("text-decoration", "none"),
        ("color", "inherit"),
        ("display", "flex"),
        ("width", "100%"),
        ("height", "100%"),
        ("align-items", "center"),
        ("justify-content", "center"),
    ])
}

/// Styles of the element holding the slides
pub fn slider_container_styles() -> StyleMap {
    style_map([
        ("display", "flex"),
        ("width", "100%"),
        ("height", "100%"),
        ("overflow", "hidden"),
        ("position", "relative"),
    ])
}

/// Styles a slide starts with
pub fn initial_slide_styles(settings: &RotationSettings, active: bool) -> StyleMap {
    let mut styles = style_map([
        ("opacity", (if active { "1" } else { "0" }).to_string()),
        (
            "transition",
            format!("all {}ms {}", settings.speed.as_millis(), settings.easing),
        ),
        ("pointer-events", (if active { "auto" } else { "none" }).to_string()),
    ]);

    if !active {
        match settings.direction {
            SlideDirection::Horizontal => {
                styles.insert("transform", "translateX(100%)".to_string());
            }
            SlideDirection::Vertical => {
                styles.insert("transform", "translateY(100%)".to_string());
            }
            SlideDirection::Fade | SlideDirection::FadeLetter => {}
        }
    }
    styles
}

/// Styles moving the outgoing slide away and the incoming one into place
pub fn transition_styles(direction: SlideDirection) -> (StyleMap, StyleMap) {
    let mut outgoing = style_map([("opacity", "0"), ("pointer-events", "none")]);
    let mut incoming = style_map([("opacity", "1"), ("pointer-events", "auto")]);

    match direction {
        SlideDirection::Horizontal => {
            outgoing.insert("transform", "translateX(-100%)".to_string());
            incoming.insert("transform", "translateX(0)".to_string());
        }
        SlideDirection::Vertical => {
            outgoing.insert("transform", "translateY(-100%)".to_string());
            incoming.insert("transform", "translateY(0)".to_string());
        }
        SlideDirection::Fade | SlideDirection::FadeLetter => {}
    }
    (outgoing, incoming)
}
