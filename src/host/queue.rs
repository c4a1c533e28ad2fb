//! Ordered set of pending timers
//!
//! Timers are keyed by due time (milliseconds since the host origin) and then
//! by creation order, so two timers due at the same instant fire in the order
//! they were scheduled.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use super::{millis, TimerHandle};

#[derive(Debug, Clone, Copy)]
struct Entry {
    due_ms: u64,
    period_ms: Option<u64>,
}

/// Pending one-shot and repeating timers
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    by_due: BTreeMap<(u64, u64), ()>,
    entries: HashMap<u64, Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a timer due at `due_ms`, repeating every `period` if given
    pub fn schedule(&mut self, due_ms: u64, period: Option<Duration>) -> TimerHandle {
        self.next_id += 1;
        let id = self.next_id;
        // A zero period would fire forever at the same instant
        let period_ms = period.map(|p| millis(p).max(1));
        self.entries.insert(id, Entry { due_ms, period_ms });
        self.by_due.insert((due_ms, id), ());
        TimerHandle::new(id)
    }

    /// Remove a timer; returns whether it was pending
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.remove(&handle.id()) {
            Some(entry) => {
                self.by_due.remove(&(entry.due_ms, handle.id()));
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.contains_key(&handle.id())
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<u64> {
        self.by_due.keys().next().map(|(due, _)| *due)
    }

    /// Pop the earliest timer due at or before `now_ms`
    ///
    /// Repeating timers are re-armed one period after their due time.
    /// Returns the handle together with the instant it was due.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerHandle, u64)> {
        let (due_ms, id) = *self.by_due.keys().next()?;
        if due_ms > now_ms {
            return None;
        }
        self.by_due.remove(&(due_ms, id));

        let entry = self.entries.get_mut(&id)?;
        match entry.period_ms {
            Some(period) => match due_ms.checked_add(period) {
                Some(next) => {
                    entry.due_ms = next;
                    self.by_due.insert((next, id), ());
                }
                // Next firing lies past the end of the clock
                None => {
                    self.entries.remove(&id);
                }
            },
            None => {
                self.entries.remove(&id);
            }
        }
        Some((TimerHandle::new(id), due_ms))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_past_end_of_clock_is_dropped() {
        let mut queue = TimerQueue::new();
        let tick = queue.schedule(u64::MAX - 1, Some(Duration::from_millis(10)));
        assert_eq!(queue.pop_due(u64::MAX), Some((tick, u64::MAX - 1)));
        assert!(!queue.is_pending(tick));
        assert_eq!(queue.pop_due(u64::MAX), None);
    }

    #[test]
    fn test_huge_period_saturates() {
        let mut queue = TimerQueue::new();
        let tick = queue.schedule(0, Some(Duration::MAX));
        assert_eq!(queue.pop_due(0), Some((tick, 0)));
        assert_eq!(queue.next_due(), Some(u64::MAX));
    }

    #[test]
    fn test_pop_in_due_order() {
        let mut queue = TimerQueue::new();
        let late = queue.schedule(500, None);
        let early = queue.schedule(100, None);

        assert_eq!(queue.next_due(), Some(100));
        assert_eq!(queue.pop_due(50), None);
        assert_eq!(queue.pop_due(1000), Some((early, 100)));
        assert_eq!(queue.pop_due(1000), Some((late, 500)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_same_due_fires_in_creation_order() {
        let mut queue = TimerQueue::new();
        let first = queue.schedule(100, None);
        let second = queue.schedule(100, None);
        assert_eq!(queue.pop_due(100).map(|(h, _)| h), Some(first));
        assert_eq!(queue.pop_due(100).map(|(h, _)| h), Some(second));
    }

    #[test]
    fn test_interval_rearms() {
        let mut queue = TimerQueue::new();
        let tick = queue.schedule(1000, Some(Duration::from_secs(1)));

        assert_eq!(queue.pop_due(2500), Some((tick, 1000)));
        assert_eq!(queue.pop_due(2500), Some((tick, 2000)));
        assert_eq!(queue.pop_due(2500), None);
        assert_eq!(queue.next_due(), Some(3000));
        assert!(queue.is_pending(tick));
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        let handle = queue.schedule(100, Some(Duration::from_millis(100)));
        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));
        assert_eq!(queue.pop_due(u64::MAX), None);
    }
}
