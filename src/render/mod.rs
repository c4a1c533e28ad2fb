//! Rendering collaborator interface
//!
//! The bar never touches a document tree. It describes what should change as
//! a stream of [`RenderIntent`]s and hands them to a [`Renderer`], which may
//! paint a real page, print to a terminal, or just record them.

pub mod console;
pub mod styles;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::Result;

pub use console::{ConsoleRenderer, OutputFormat, RecordingRenderer};
pub use styles::LetterAnimation;

/// CSS declarations keyed by property name
pub type StyleMap = BTreeMap<&'static str, String>;

/// Build a [`StyleMap`] from `(property, value)` pairs
pub fn style_map<I, V>(pairs: I) -> StyleMap
where
    I: IntoIterator<Item = (&'static str, V)>,
    V: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k, v.into())).collect()
}

/// One rotating slide as initially created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideNode {
    pub markup: String,
    pub styles: StyleMap,
    pub active: bool,
    /// Visible characters animated one by one, set only for letter fades
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letters: Option<Vec<String>>,
}

/// A change the renderer should apply to the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum RenderIntent {
    /// Add the slide and letter keyframes to the document head
    InjectStylesheet { css: String },
    /// Replace the bar container's inline styles
    SetContainerStyles { styles: StyleMap },
    /// Replace the static bar's inner markup
    SetContent { markup: String },
    /// Create the sliding container and its slides
    CreateSlides {
        container: StyleMap,
        slides: Vec<SlideNode>,
    },
    /// Replace one slide's inner markup
    UpdateSlide { index: usize, markup: String },
    /// Merge styles into one slide
    SetSlideStyles { index: usize, styles: StyleMap },
    /// Restart the per-letter animation of one slide
    AnimateLetters {
        index: usize,
        animation: LetterAnimation,
    },
    /// Wrap the bar in a link element
    WrapInLink { href: String, styles: StyleMap },
    /// Insert the bar as the first child of the page body
    Insert,
    /// Remove the bar from the page
    Remove,
}

impl RenderIntent {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InjectStylesheet { .. } => "inject_stylesheet",
            Self::SetContainerStyles { .. } => "set_container_styles",
            Self::SetContent { .. } => "set_content",
            Self::CreateSlides { .. } => "create_slides",
            Self::UpdateSlide { .. } => "update_slide",
            Self::SetSlideStyles { .. } => "set_slide_styles",
            Self::AnimateLetters { .. } => "animate_letters",
            Self::WrapInLink { .. } => "wrap_in_link",
            Self::Insert => "insert",
            Self::Remove => "remove",
        }
    }
}

/// Receiver of render intents
pub trait Renderer {
    /// Apply one intent
    ///
    /// # Errors
    /// Failures are reported to the caller, which logs them and keeps going;
    /// a failed paint never stops the bar.
    fn apply(&mut self, intent: RenderIntent) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn apply(&mut self, intent: RenderIntent) -> Result<()> {
        (**self).apply(intent)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn apply(&mut self, intent: RenderIntent) -> Result<()> {
        (**self).apply(intent)
    }
}
