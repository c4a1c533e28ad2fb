//! Timer and event host
//!
//! The bar never owns an event loop. It asks a [`TimerHost`] to schedule
//! one-shot or repeating callbacks and receives a [`TimerHandle`] back; when a
//! timer fires, whoever drives the host hands that handle to the bar.
//!
//! Callbacks run serially: a tick always completes before the next one of any
//! kind is dispatched, so the bar needs no locking.
//!
//! - [`SimulatedHost`] - virtual clock, used by tests and the `simulate` command
//! - [`RealtimeHost`] - tokio-driven wall clock, used by the `run` command

pub mod queue;
pub mod realtime;
pub mod simulated;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

pub use queue::TimerQueue;
pub use realtime::RealtimeHost;
pub use simulated::SimulatedHost;

/// Opaque handle to a pending callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Wall-clock instant `elapsed_ms` after `origin`, clamped to the latest representable time
pub(crate) fn wall_clock(origin: DateTime<Utc>, elapsed_ms: u64) -> DateTime<Utc> {
    let offset = ChronoDuration::milliseconds(i64::try_from(elapsed_ms).unwrap_or(i64::MAX));
    origin
        .checked_add_signed(offset)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Host facility for scheduling and cancelling timed callbacks
pub trait TimerHost {
    /// Current wall-clock time as seen by the host
    fn now(&self) -> DateTime<Utc>;

    /// Fire once after `delay`
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle;

    /// Fire every `period` until cleared
    fn set_interval(&mut self, period: Duration) -> TimerHandle;

    /// Cancel a pending timer; unknown or already-fired handles are ignored
    fn clear(&mut self, handle: TimerHandle);
}
