//! Wall-clock host driven by the tokio timer

use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

use super::{millis, wall_clock, TimerHandle, TimerHost, TimerQueue};

/// Why a [`RealtimeHost::run`] loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The configured time limit elapsed
    DeadlineReached,
    /// The shutdown future resolved (e.g. Ctrl-C)
    Shutdown,
}

/// Host backed by real time
///
/// All callbacks are dispatched from the task calling [`RealtimeHost::run`],
/// one at a time.
#[derive(Debug)]
pub struct RealtimeHost {
    origin: Instant,
    origin_wall: DateTime<Utc>,
    queue: TimerQueue,
}

impl RealtimeHost {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            origin_wall: Utc::now(),
            queue: TimerQueue::new(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        millis(Instant::now().duration_since(self.origin))
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Dispatch timers as they come due until `limit` elapses or `shutdown` resolves
    pub async fn run<F, S>(&mut self, limit: Option<Duration>, shutdown: S, mut on_fire: F) -> RunOutcome
    where
        F: FnMut(TimerHandle, &mut Self),
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let deadline = limit.and_then(|limit| self.origin.checked_add(limit));

        loop {
            while let Some((handle, _)) = self.queue.pop_due(self.elapsed_ms()) {
                on_fire(handle, self);
            }

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return RunOutcome::DeadlineReached;
            }

            let next = self
                .queue
                .next_due()
                .and_then(|due| self.origin.checked_add(Duration::from_millis(due)));
            let wake = match (next, deadline) {
                (Some(next), Some(deadline)) => Some(next.min(deadline)),
                (next, deadline) => next.or(deadline),
            };

            match wake {
                Some(wake) => {
                    tokio::select! {
                        _ = sleep_until(wake) => {}
                        _ = &mut shutdown => return RunOutcome::Shutdown,
                    }
                }
                None => {
                    shutdown.as_mut().await;
                    return RunOutcome::Shutdown;
                }
            }
        }
    }
}

impl Default for RealtimeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerHost for RealtimeHost {
    fn now(&self) -> DateTime<Utc> {
        wall_clock(self.origin_wall, self.elapsed_ms())
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerHandle {
        let due = self.elapsed_ms().saturating_add(millis(delay));
        self.queue.schedule(due, None)
    }

    fn set_interval(&mut self, period: Duration) -> TimerHandle {
        let due = self.elapsed_ms().saturating_add(millis(period));
        self.queue.schedule(due, Some(period))
    }

    fn clear(&mut self, handle: TimerHandle) {
        self.queue.cancel(handle);
    }
}
