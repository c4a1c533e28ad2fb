//! Countdown engine
//!
//! Computes the time left until a configured end timestamp and renders it
//! through a user template such as `hh:mm:ss` or `d days hh:mm`.
//!
//! The engine is a pure function of `(now, end)`; it keeps no state between
//! ticks. Policy such as showing "Sale Ended" after expiry belongs to the bar
//! controller.

pub mod format;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;

use crate::models::CountdownState;

pub use format::{format, TimerFormat};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Naive formats accepted for timer ends without an offset, read as local time
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parsed `timerEnd` option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTarget {
    /// No timer configured
    None,
    /// Valid end instant
    At(DateTime<Utc>),
    /// Timestamp that could not be parsed; always reads as expired
    Invalid,
}

impl CountdownTarget {
    /// Parse an ISO-8601 style timestamp
    ///
    /// Accepts RFC 3339 (`2025-12-31T23:59:59Z`, `...+09:00`), date-times
    /// without an offset (host local time) and bare dates (UTC midnight).
    ///
    /// # Examples
    ///
    /// ```
    /// use utility_bar::countdown::CountdownTarget;
    ///
    /// assert!(matches!(CountdownTarget::parse("2025-12-31T00:00:00Z"), CountdownTarget::At(_)));
    /// assert_eq!(CountdownTarget::parse(""), CountdownTarget::None);
    /// assert_eq!(CountdownTarget::parse("next friday"), CountdownTarget::Invalid);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Self::At(dt.with_timezone(&Utc));
        }

        for fmt in LOCAL_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
                if let Some(local) = Local.from_local_datetime(&naive).earliest() {
                    return Self::At(local.with_timezone(&Utc));
                }
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Self::At(Utc.from_utc_datetime(&midnight));
            }
        }

        tracing::warn!(timer_end = raw, "Unparsable timer end, countdown treated as expired");
        Self::Invalid
    }

    pub fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Countdown state at `now`; `None` when no timer is configured
    pub fn state_at(&self, now: DateTime<Utc>) -> Option<CountdownState> {
        match self {
            Self::None => None,
            Self::At(end) => Some(remaining(*end, now)),
            Self::Invalid => Some(CountdownState::Expired),
        }
    }
}

impl fmt::Display for CountdownTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::At(end) => write!(f, "{}", end.to_rfc3339()),
            Self::Invalid => f.write_str("invalid"),
        }
    }
}

/// Time remaining from `now` until `end`
///
/// Components are truncated, never rounded. A difference of zero or less is
/// [`CountdownState::Expired`].
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use utility_bar::countdown::remaining;
/// use utility_bar::models::CountdownState;
///
/// let now = Utc::now();
/// let state = remaining(now + Duration::milliseconds(90_061_000), now);
/// assert_eq!(
///     state,
///     CountdownState::Remaining { days: 1, hours: 1, minutes: 1, seconds: 1 }
/// );
/// assert_eq!(remaining(now, now), CountdownState::Expired);
/// ```
pub fn remaining(end: DateTime<Utc>, now: DateTime<Utc>) -> CountdownState {
    let diff = end.signed_duration_since(now).num_milliseconds();
    if diff <= 0 {
        return CountdownState::Expired;
    }

    CountdownState::Remaining {
        days: diff / MS_PER_DAY,
        hours: diff % MS_PER_DAY / MS_PER_HOUR,
        minutes: diff % MS_PER_HOUR / MS_PER_MINUTE,
        seconds: diff % MS_PER_MINUTE / MS_PER_SECOND,
    }
}
