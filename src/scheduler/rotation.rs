//! Rotation state machine

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::config::BarConfig;
use crate::host::{TimerHandle, TimerHost};
use crate::models::SlideDirection;

/// Lifecycle phase of a rotation scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPhase {
    /// Constructed, not advancing
    Idle,
    /// Auto-advance active
    Running,
    /// Suspended by pointer hover
    Paused,
    /// Torn down; no further transitions
    Destroyed,
}

impl RotationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for RotationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rotation parameters taken from the bar configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationSettings {
    /// Time between advances; `None` disables rotation
    pub interval: Option<Duration>,
    /// Transition duration
    pub speed: Duration,
    pub direction: SlideDirection,
    pub easing: String,
    pub auto_start: bool,
    pub pause_on_hover: bool,
}

impl RotationSettings {
    pub fn from_config(config: &BarConfig) -> Self {
        Self {
            interval: config.slide_interval(),
            speed: config.slide_speed(),
            direction: config.slide_direction,
            easing: config.slide_easing.clone(),
            auto_start: config.auto_start,
            pause_on_hover: config.pause_on_hover,
        }
    }
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self::from_config(&BarConfig::default())
    }
}

/// One advance step: `from` animates out, `to` animates in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Advance {
    pub from: usize,
    pub to: usize,
}

/// Cyclic message rotation with pause-on-hover
#[derive(Debug)]
pub struct RotationScheduler {
    settings: RotationSettings,
    count: usize,
    active_index: usize,
    phase: RotationPhase,
    pending: Option<TimerHandle>,
}

impl RotationScheduler {
    /// Create an idle scheduler over `count` messages
    pub fn new(count: usize, settings: RotationSettings) -> Self {
        Self {
            settings,
            count,
            active_index: 0,
            phase: RotationPhase::Idle,
            pending: None,
        }
    }

    pub fn settings(&self) -> &RotationSettings {
        &self.settings
    }

    pub fn phase(&self) -> RotationPhase {
        self.phase
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the scheduler is waiting on a timer
    pub fn pending_handle(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Whether `handle` is this scheduler's pending advance
    pub fn owns(&self, handle: TimerHandle) -> bool {
        self.pending == Some(handle)
    }

    /// More than one message and a positive interval
    pub fn can_rotate(&self) -> bool {
        self.count > 1 && self.settings.interval.is_some()
    }

    /// Leave `Idle` if auto-start applies; returns whether rotation started
    pub fn start(&mut self, host: &mut dyn TimerHost) -> bool {
        if self.phase != RotationPhase::Idle || !self.settings.auto_start || !self.can_rotate() {
            return false;
        }

        self.phase = RotationPhase::Running;
        self.schedule(host);
        tracing::debug!(
            count = self.count,
            interval_ms = self.interval().as_millis() as u64,
            direction = %self.settings.direction,
            "Rotation started"
        );
        true
    }

    /// Handle a fired timer; advances when it is ours
    pub fn on_timer(&mut self, handle: TimerHandle, host: &mut dyn TimerHost) -> Option<Advance> {
        if !self.owns(handle) {
            return None;
        }
        self.pending = None;
        if self.phase != RotationPhase::Running {
            return None;
        }

        let step = self.advance();
        self.schedule(host);
        Some(step)
    }

    /// Suspend on hover, keeping the active index
    pub fn pointer_enter(&mut self, host: &mut dyn TimerHost) -> bool {
        if !self.settings.pause_on_hover || self.phase != RotationPhase::Running {
            return false;
        }

        self.cancel(host);
        self.phase = RotationPhase::Paused;
        tracing::debug!(active_index = self.active_index, "Rotation paused");
        true
    }

    /// Resume after hover with a full interval
    pub fn pointer_leave(&mut self, host: &mut dyn TimerHost) -> bool {
        if !self.settings.pause_on_hover
            || !self.settings.auto_start
            || self.phase != RotationPhase::Paused
        {
            return false;
        }

        self.phase = RotationPhase::Running;
        self.schedule(host);
        tracing::debug!(active_index = self.active_index, "Rotation resumed");
        true
    }

    /// Release the pending timer and stop for good; safe to repeat
    pub fn destroy(&mut self, host: &mut dyn TimerHost) {
        if self.phase == RotationPhase::Destroyed {
            return;
        }
        self.cancel(host);
        self.phase = RotationPhase::Destroyed;
    }

    fn advance(&mut self) -> Advance {
        let from = self.active_index;
        self.active_index = (self.active_index + 1) % self.count;
        tracing::trace!(from, to = self.active_index, "Rotation advanced");
        Advance {
            from,
            to: self.active_index,
        }
    }

    fn interval(&self) -> Duration {
        self.settings.interval.unwrap_or_default()
    }

    fn schedule(&mut self, host: &mut dyn TimerHost) {
        self.cancel(host);
        self.pending = Some(host.set_timeout(self.interval()));
    }

    fn cancel(&mut self, host: &mut dyn TimerHost) {
        if let Some(handle) = self.pending.take() {
            host.clear(handle);
        }
    }
}
