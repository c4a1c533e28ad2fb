//! Renderers that do not need a browser
//!
//! [`RecordingRenderer`] keeps every intent plus a small model of the page
//! state they produce; tests assert against it. [`ConsoleRenderer`] writes
//! intents to a terminal or any other writer, as text or JSON lines.

use std::io::{self, Write};

use super::{RenderIntent, Renderer, StyleMap};
use crate::error::Result;
use crate::parser::plain_text;

/// Renderer that records intents and tracks the resulting bar state
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    intents: Vec<RenderIntent>,
    content: Option<String>,
    slides: Vec<String>,
    slide_styles: Vec<StyleMap>,
    link: Option<String>,
    inserted: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every intent received so far
    pub fn intents(&self) -> &[RenderIntent] {
        &self.intents
    }

    /// Drain the recorded intents, keeping the tracked state
    pub fn take_intents(&mut self) -> Vec<RenderIntent> {
        std::mem::take(&mut self.intents)
    }

    /// Markup of the static bar
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Current markup of every slide
    pub fn slides(&self) -> &[String] {
        &self.slides
    }

    /// Current merged styles of a slide
    pub fn slide_styles(&self, index: usize) -> Option<&StyleMap> {
        self.slide_styles.get(index)
    }

    /// Index of the slide currently shown (opacity 1)
    pub fn visible_slide(&self) -> Option<usize> {
        self.slide_styles
            .iter()
            .position(|styles| styles.get("opacity").is_some_and(|o| o == "1"))
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Whether the bar is currently on the page
    pub fn is_inserted(&self) -> bool {
        self.inserted
    }
}

impl Renderer for RecordingRenderer {
    fn apply(&mut self, intent: RenderIntent) -> Result<()> {
        match &intent {
            RenderIntent::SetContent { markup } => self.content = Some(markup.clone()),
            RenderIntent::CreateSlides { slides, .. } => {
                self.slides = slides.iter().map(|s| s.markup.clone()).collect();
                self.slide_styles = slides.iter().map(|s| s.styles.clone()).collect();
            }
            RenderIntent::UpdateSlide { index, markup } => {
                if let Some(slide) = self.slides.get_mut(*index) {
                    slide.clone_from(markup);
                }
            }
            RenderIntent::SetSlideStyles { index, styles } => {
                if let Some(current) = self.slide_styles.get_mut(*index) {
                    current.extend(styles.iter().map(|(k, v)| (*k, v.clone())));
                }
            }
            RenderIntent::WrapInLink { href, .. } => self.link = Some(href.clone()),
            RenderIntent::Insert => self.inserted = true,
            RenderIntent::Remove => self.inserted = false,
            RenderIntent::InjectStylesheet { .. }
            | RenderIntent::SetContainerStyles { .. }
            | RenderIntent::AnimateLetters { .. } => {}
        }
        self.intents.push(intent);
        Ok(())
    }
}

/// Output format of the console renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable lines showing visible text
    #[default]
    Text,
    /// One JSON object per intent
    Json,
}

impl OutputFormat {
    /// Parse a format name; anything but `json` is text
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Renderer writing intents to a terminal
pub struct ConsoleRenderer<W: Write = io::Stdout> {
    out: W,
    format: OutputFormat,
}

impl ConsoleRenderer<io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn describe(intent: &RenderIntent) -> Option<String> {
        let line = match intent {
            RenderIntent::SetContent { markup } => format!("bar      | {}", plain_text(markup)),
            RenderIntent::CreateSlides { slides, .. } => {
                let mut line = format!("slides   | {} created", slides.len());
                for (i, slide) in slides.iter().enumerate() {
                    let marker = if slide.active { '*' } else { ' ' };
                    line.push_str(&format!("\n  {marker}[{i}] {}", plain_text(&slide.markup)));
                }
                line
            }
            RenderIntent::UpdateSlide { index, markup } => {
                format!("slide[{index}] | {}", plain_text(markup))
            }
            RenderIntent::SetSlideStyles { index, styles } => match styles.get("opacity") {
                Some(opacity) if opacity == "1" => format!("slide[{index}] | shown"),
                Some(_) => format!("slide[{index}] | hidden"),
                None => return None,
            },
            RenderIntent::WrapInLink { href, .. } => format!("link     | {href}"),
            RenderIntent::Insert => "bar      | inserted".to_string(),
            RenderIntent::Remove => "bar      | removed".to_string(),
            RenderIntent::InjectStylesheet { .. }
            | RenderIntent::SetContainerStyles { .. }
            | RenderIntent::AnimateLetters { .. } => return None,
        };
        Some(line)
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn apply(&mut self, intent: RenderIntent) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, &intent)?;
                writeln!(self.out)?;
            }
            OutputFormat::Text => {
                if let Some(line) = Self::describe(&intent) {
                    writeln!(self.out, "{line}")?;
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }
}
