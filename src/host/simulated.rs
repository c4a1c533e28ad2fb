//! Deterministic host with a virtual clock

use chrono::{DateTime, Utc};
use std::time::Duration;

use super::{millis, wall_clock, TimerHandle, TimerHost, TimerQueue};

/// Host whose clock only moves when told to
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use std::time::Duration;
/// use utility_bar::host::{SimulatedHost, TimerHost};
///
/// let mut host = SimulatedHost::new(Utc::now());
/// let tick = host.set_interval(Duration::from_secs(1));
///
/// let mut fired = Vec::new();
/// host.advance(Duration::from_millis(3500), |handle, _host| fired.push(handle));
/// assert_eq!(fired, vec![tick, tick, tick]);
/// ```
#[derive(Debug)]
pub struct SimulatedHost {
    origin: DateTime<Utc>,
    elapsed_ms: u64,
    queue: TimerQueue,
}

impl SimulatedHost {
    pub fn new(origin: DateTime<Utc>) -> Self {
        Self {
            origin,
            elapsed_ms: 0,
            queue: TimerQueue::new(),
        }
    }

    /// Virtual time elapsed since the origin
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.queue.is_pending(handle)
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Move the clock forward by `by`, firing every timer that comes due
    ///
    /// The clock is set to each timer's due time before its callback runs, so
    /// callbacks that reschedule see the exact firing instant. Returns the
    /// number of callbacks fired.
    pub fn advance<F>(&mut self, by: Duration, mut on_fire: F) -> usize
    where
        F: FnMut(TimerHandle, &mut Self),
    {
        let deadline = self.elapsed_ms.saturating_add(millis(by));
        let mut fired = 0;

        while let Some((handle, due_ms)) = self.queue.pop_due(deadline) {
            self.elapsed_ms = self.elapsed_ms.max(due_ms);
            on_fire(handle, self);
            fired += 1;
        }

        self.elapsed_ms = deadline;
        fired
    }

    /// Advance straight to the next pending timer and fire only that one
    pub fn fire_next<F>(&mut self, on_fire: F) -> Option<TimerHandle>
    where
        F: FnOnce(TimerHandle, &mut Self),
    {
        let due = self.queue.next_due()?;
        let (handle, due_ms) = self.queue.pop_due(due)?;
        self.elapsed_ms = self.elapsed_ms.max(due_ms);
        on_fire(handle, self);
        Some(handle)
    }
}

impl TimerHost for SimulatedHost {
    fn now(&self) -> DateTime<Utc> {
        wall_clock(self.origin, self.elapsed_ms)
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerHandle {
        self.queue
            .schedule(self.elapsed_ms.saturating_add(millis(delay)), None)
    }

    fn set_interval(&mut self, period: Duration) -> TimerHandle {
        self.queue
            .schedule(self.elapsed_ms.saturating_add(millis(period)), Some(period))
    }

    fn clear(&mut self, handle: TimerHandle) {
        self.queue.cancel(handle);
    }
}
