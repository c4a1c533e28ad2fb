//! Bar Controller
//!
//! One [`BarController`] is one live announcement bar. It owns the resolved
//! message list, the rotation scheduler and the countdown tick, and turns
//! every host callback into render intents:
//!
//! ```text
//! mount ──► resolve ──► layout (static | rotating) ──► insert
//!                                   │
//!            on_timer(handle) ◄─────┴───── host timers
//!              ├─ countdown tick ──► [TIMER] substitution / "Sale Ended"
//!              └─ rotation advance ─► outgoing + incoming slide styles
//! ```
//!
//! Several controllers may share one host; each only reacts to the handles
//! it scheduled itself.

use std::time::Duration;

use crate::config::BarConfig;
use crate::countdown::{CountdownTarget, TimerFormat};
use crate::error::Result;
use crate::host::{TimerHandle, TimerHost};
use crate::models::{CountdownState, Message, SlideDirection};
use crate::parser;
use crate::render::styles::{
    self, container_styles, initial_slide_styles, link_wrapper_styles, slider_container_styles,
};
use crate::render::{LetterAnimation, RenderIntent, Renderer, SlideNode};
use crate::scheduler::{Advance, RotationPhase, RotationScheduler, RotationSettings};

/// Text shown once the countdown has run out
pub const EXPIRED_TEXT: &str = "Sale Ended";

/// Period of the countdown tick
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// How messages are laid out in the bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One fixed message
    Static,
    /// Stacked slides advanced by the rotation scheduler
    Rotating,
}

/// A live announcement bar
pub struct BarController<R: Renderer> {
    renderer: R,
    messages: Vec<Message>,
    layout: Layout,
    rotation: RotationScheduler,
    target: CountdownTarget,
    timer_format: TimerFormat,
    countdown: Option<TimerHandle>,
    expired: bool,
    mounted: bool,
}

impl<R: Renderer> BarController<R> {
    /// Build the bar, paint it and start its timers
    ///
    /// # Errors
    /// Returns `ConfigError::MissingContent` when the configuration has
    /// nothing to show; no intent is emitted and no timer is scheduled.
    pub fn mount(config: &BarConfig, renderer: R, host: &mut dyn TimerHost) -> Result<Self> {
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Announcement bar not initialized");
            return Err(e.into());
        }

        let (source, messages) = parser::resolve_with_source(config);
        let settings = RotationSettings::from_config(config);
        let rotation = RotationScheduler::new(messages.len(), settings);
        let layout = if rotation.can_rotate() {
            Layout::Rotating
        } else {
            Layout::Static
        };

        let mut bar = Self {
            renderer,
            messages,
            layout,
            rotation,
            target: CountdownTarget::parse(&config.timer_end),
            timer_format: TimerFormat::new(config.timer_format.clone()),
            countdown: None,
            expired: false,
            mounted: true,
        };

        tracing::info!(
            source = %source,
            messages = bar.messages.len(),
            layout = ?bar.layout,
            countdown = %bar.target,
            "Mounting announcement bar"
        );

        bar.paint(config);
        bar.rotation.start(host);
        bar.start_countdown(host);
        Ok(bar)
    }

    // ========================================================================
    // Host callbacks
    // ========================================================================

    /// Dispatch a fired host timer; returns whether this bar owned it
    pub fn on_timer(&mut self, handle: TimerHandle, host: &mut dyn TimerHost) -> bool {
        if !self.mounted {
            return false;
        }

        if self.countdown == Some(handle) {
            self.tick_countdown(host);
            return true;
        }

        if self.rotation.owns(handle) {
            if let Some(step) = self.rotation.on_timer(handle, host) {
                self.show_advance(step);
            }
            return true;
        }
        false
    }

    /// Pointer entered the bar
    pub fn pointer_enter(&mut self, host: &mut dyn TimerHost) -> bool {
        self.mounted && self.rotation.pointer_enter(host)
    }

    /// Pointer left the bar
    pub fn pointer_leave(&mut self, host: &mut dyn TimerHost) -> bool {
        self.mounted && self.rotation.pointer_leave(host)
    }

    /// Release both timers and remove the bar; repeated calls do nothing
    pub fn teardown(&mut self, host: &mut dyn TimerHost) {
        if !self.mounted {
            return;
        }
        self.mounted = false;

        if let Some(handle) = self.countdown.take() {
            host.clear(handle);
        }
        self.rotation.destroy(host);
        self.emit(RenderIntent::Remove);
        tracing::info!("Announcement bar torn down");
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn active_index(&self) -> usize {
        self.rotation.active_index()
    }

    pub fn phase(&self) -> RotationPhase {
        self.rotation.phase()
    }

    /// Whether the countdown has reached its terminal display
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Handle of the pending countdown tick
    pub fn countdown_handle(&self) -> Option<TimerHandle> {
        self.countdown
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    // ========================================================================
    // Painting
    // ========================================================================

    fn paint(&mut self, config: &BarConfig) {
        self.emit(RenderIntent::SetContainerStyles {
            styles: container_styles(config),
        });

        match self.layout {
            Layout::Rotating => self.paint_slides(),
            Layout::Static => {
                let markup = self
                    .messages
                    .first()
                    .map(|m| m.markup().to_string())
                    .unwrap_or_else(|| config.bar_text.clone());
                self.emit(RenderIntent::SetContent { markup });
            }
        }

        if !config.bar_link.is_empty() {
            self.emit(RenderIntent::WrapInLink {
                href: config.bar_link.clone(),
                styles: link_wrapper_styles(),
            });
        }
        self.emit(RenderIntent::Insert);
    }

    fn paint_slides(&mut self) {
        let settings = self.rotation.settings();
        let split_letters = settings.direction == SlideDirection::FadeLetter;
        let slides = self
            .messages
            .iter()
            .enumerate()
            .map(|(i, message)| SlideNode {
                markup: message.markup().to_string(),
                styles: initial_slide_styles(settings, i == 0),
                active: i == 0,
                letters: split_letters
                    .then(|| parser::sanitize::letters(&parser::plain_text(message.markup()))),
            })
            .collect();

        self.emit(RenderIntent::InjectStylesheet {
            css: styles::SLIDE_STYLESHEET.to_string(),
        });
        self.emit(RenderIntent::CreateSlides {
            container: slider_container_styles(),
            slides,
        });
        if split_letters {
            self.emit(RenderIntent::AnimateLetters {
                index: 0,
                animation: LetterAnimation::FADE_IN,
            });
        }
    }

    fn show_advance(&mut self, step: Advance) {
        let direction = self.rotation.settings().direction;
        let (outgoing, incoming) = styles::transition_styles(direction);

        if direction == SlideDirection::FadeLetter {
            self.emit(RenderIntent::AnimateLetters {
                index: step.from,
                animation: LetterAnimation::FADE_OUT,
            });
        }
        self.emit(RenderIntent::SetSlideStyles {
            index: step.from,
            styles: outgoing,
        });
        self.emit(RenderIntent::SetSlideStyles {
            index: step.to,
            styles: incoming,
        });
        if direction == SlideDirection::FadeLetter {
            self.emit(RenderIntent::AnimateLetters {
                index: step.to,
                animation: LetterAnimation::FADE_IN,
            });
        }
    }

    fn emit(&mut self, intent: RenderIntent) {
        let kind = intent.kind();
        if let Err(e) = self.renderer.apply(intent) {
            tracing::warn!(
                intent = kind,
                category = e.category().as_str(),
                recoverable = e.is_recoverable(),
                error = %e,
                "Renderer rejected intent"
            );
        }
    }

    // ========================================================================
    // Countdown
    // ========================================================================

    fn start_countdown(&mut self, host: &mut dyn TimerHost) {
        if !self.target.is_some() {
            return;
        }

        self.tick_countdown(host);
        if !self.expired {
            self.countdown = Some(host.set_interval(COUNTDOWN_TICK));
        }
    }

    fn tick_countdown(&mut self, host: &mut dyn TimerHost) {
        if self.expired {
            return;
        }

        match self.target.state_at(host.now()) {
            None => {}
            Some(CountdownState::Expired) => self.expire(host),
            Some(state) => {
                let text = self.timer_format.render(&state);
                self.show_countdown(&text);
            }
        }
    }

    fn show_countdown(&mut self, text: &str) {
        let updates: Vec<(usize, String)> = self
            .messages
            .iter()
            .enumerate()
            .filter(|(_, m)| m.has_timer())
            .map(|(i, m)| (i, m.with_timer(text)))
            .collect();

        for (index, markup) in updates {
            match self.layout {
                Layout::Rotating => self.emit(RenderIntent::UpdateSlide { index, markup }),
                Layout::Static if index == 0 => self.emit(RenderIntent::SetContent { markup }),
                Layout::Static => {}
            }
        }
    }

    fn expire(&mut self, host: &mut dyn TimerHost) {
        self.expired = true;
        if let Some(handle) = self.countdown.take() {
            host.clear(handle);
        }

        match self.layout {
            Layout::Rotating => {
                for index in 0..self.messages.len() {
                    self.emit(RenderIntent::UpdateSlide {
                        index,
                        markup: EXPIRED_TEXT.to_string(),
                    });
                }
            }
            Layout::Static => self.emit(RenderIntent::SetContent {
                markup: EXPIRED_TEXT.to_string(),
            }),
        }
        tracing::info!("Countdown expired");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::host::SimulatedHost;
    use crate::render::RecordingRenderer;
    use chrono::{TimeZone, Utc};

    fn host() -> SimulatedHost {
        SimulatedHost::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
    }

    fn rotating_config() -> BarConfig {
        let mut config = BarConfig::default();
        config.multiple_text = "A|B|C".to_string();
        config.slide_interval = 5;
        config
    }

    #[test]
    fn test_mount_rejects_missing_content() {
        let mut host = host();
        let result = BarController::mount(&BarConfig::default(), RecordingRenderer::new(), &mut host);
        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(host.pending(), 0);
    }

    struct ClosedOutput {
        attempts: usize,
    }

    impl Renderer for ClosedOutput {
        fn apply(&mut self, _intent: RenderIntent) -> Result<()> {
            self.attempts += 1;
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into())
        }
    }

    #[test]
    fn test_renderer_failures_do_not_stop_the_bar() {
        let mut host = host();
        let mut bar =
            BarController::mount(&rotating_config(), ClosedOutput { attempts: 0 }, &mut host).unwrap();
        let painted = bar.renderer().attempts;
        assert!(painted > 0);

        host.advance(Duration::from_secs(5), |handle, host| {
            bar.on_timer(handle, host);
        });
        assert!(bar.renderer().attempts > painted);
        assert_eq!(bar.active_index(), 1);
    }

    #[test]
    fn test_static_layout_paints_first_message() {
        let mut host = host();
        let mut config = BarConfig::default();
        config.bar_text = "Free shipping".to_string();
        let bar = BarController::mount(&config, RecordingRenderer::new(), &mut host).unwrap();

        assert_eq!(bar.layout(), Layout::Static);
        assert_eq!(bar.renderer().content(), Some("Free shipping"));
        assert!(bar.renderer().is_inserted());
        assert_eq!(bar.phase(), RotationPhase::Idle);
        assert_eq!(host.pending(), 0);
    }

    #[test]
    fn test_multiple_messages_without_interval_stay_static() {
        let mut host = host();
        let mut config = rotating_config();
        config.slide_interval = 0;
        let bar = BarController::mount(&config, RecordingRenderer::new(), &mut host).unwrap();
        assert_eq!(bar.layout(), Layout::Static);
        assert_eq!(bar.renderer().content(), Some("A"));
    }

    #[test]
    fn test_rotating_layout_advances() {
        let mut host = host();
        let mut bar =
            BarController::mount(&rotating_config(), RecordingRenderer::new(), &mut host).unwrap();
        assert_eq!(bar.layout(), Layout::Rotating);
        assert_eq!(bar.renderer().visible_slide(), Some(0));

        host.advance(Duration::from_secs(5), |handle, host| {
            bar.on_timer(handle, host);
        });
        assert_eq!(bar.active_index(), 1);
        assert_eq!(bar.renderer().visible_slide(), Some(1));
    }

    #[test]
    fn test_bar_link_wraps() {
        let mut host = host();
        let mut config = BarConfig::default();
        config.bar_text = "Hi".to_string();
        config.bar_link = "https://x.io".to_string();
        let bar = BarController::mount(&config, RecordingRenderer::new(), &mut host).unwrap();
        assert_eq!(bar.renderer().link(), Some("https://x.io"));
    }

    #[test]
    fn test_fade_letter_animates_both_slides() {
        let mut host = host();
        let mut config = rotating_config();
        config.slide_direction = SlideDirection::FadeLetter;
        let mut bar = BarController::mount(&config, RecordingRenderer::new(), &mut host).unwrap();
        let created = bar.renderer_mut().take_intents().into_iter().find_map(|i| match i {
            RenderIntent::CreateSlides { slides, .. } => Some(slides),
            _ => None,
        });
        let slides = created.unwrap();
        assert_eq!(slides[0].letters, Some(vec!["A".to_string()]));

        host.advance(Duration::from_secs(5), |handle, host| {
            bar.on_timer(handle, host);
        });
        let animations: Vec<_> = bar
            .renderer()
            .intents()
            .iter()
            .filter_map(|intent| match intent {
                RenderIntent::AnimateLetters { index, animation } => Some((*index, *animation)),
                _ => None,
            })
            .collect();
        assert_eq!(
            animations,
            vec![(0, LetterAnimation::FADE_OUT), (1, LetterAnimation::FADE_IN)]
        );
    }

    #[test]
    fn test_countdown_substitutes_timer() {
        let mut host = host();
        let mut config = BarConfig::default();
        config.bar_text = "Ends in [TIMER]".to_string();
        config.timer_end = "2025-01-01T01:02:03Z".to_string();
        let mut bar = BarController::mount(&config, RecordingRenderer::new(), &mut host).unwrap();
        assert_eq!(bar.renderer().content(), Some("Ends in 01:02:03"));

        host.advance(Duration::from_secs(1), |handle, host| {
            bar.on_timer(handle, host);
        });
        assert_eq!(bar.renderer().content(), Some("Ends in 01:02:02"));
    }

    #[test]
    fn test_already_expired_schedules_nothing() {
        let mut host = host();
        let mut config = BarConfig::default();
        config.bar_text = "Ends in [TIMER]".to_string();
        config.timer_end = "2024-12-31T00:00:00Z".to_string();
        let bar = BarController::mount(&config, RecordingRenderer::new(), &mut host).unwrap();
        assert!(bar.is_expired());
        assert_eq!(bar.renderer().content(), Some(EXPIRED_TEXT));
        assert_eq!(bar.countdown_handle(), None);
        assert_eq!(host.pending(), 0);
    }

    #[test]
    fn test_invalid_timer_end_reads_as_expired() {
        let mut host = host();
        let mut config = BarConfig::default();
        config.bar_text = "Ends in [TIMER]".to_string();
        config.timer_end = "soon".to_string();
        let bar = BarController::mount(&config, RecordingRenderer::new(), &mut host).unwrap();
        assert!(bar.is_expired());
        assert_eq!(bar.renderer().content(), Some(EXPIRED_TEXT));
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut host = host();
        let mut config = rotating_config();
        config.timer_end = "2025-01-02T00:00:00Z".to_string();
        let mut bar = BarController::mount(&config, RecordingRenderer::new(), &mut host).unwrap();
        assert_eq!(host.pending(), 2);

        bar.teardown(&mut host);
        bar.teardown(&mut host);
        assert_eq!(host.pending(), 0);
        assert_eq!(bar.phase(), RotationPhase::Destroyed);
        assert!(!bar.renderer().is_inserted());
        let removals = bar
            .renderer()
            .intents()
            .iter()
            .filter(|i| matches!(i, RenderIntent::Remove))
            .count();
        assert_eq!(removals, 1);
    }

    #[test]
    fn test_foreign_handle_is_ignored() {
        let mut host = host();
        let mut bar =
            BarController::mount(&rotating_config(), RecordingRenderer::new(), &mut host).unwrap();
        let foreign = host.set_timeout(Duration::from_secs(1));
        assert!(!bar.on_timer(foreign, &mut host));
        assert_eq!(bar.active_index(), 0);
    }
}
