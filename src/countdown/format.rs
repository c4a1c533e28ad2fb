//! Countdown template rendering
//!
//! A template is scanned once for maximal runs of ASCII letters. Each run is
//! checked against an ordered rule list and replaced by the first rule that
//! matches it exactly; runs matching no rule (words such as `days`) and all
//! other characters pass through unchanged. Since every run is looked at only
//! once, substituted digits can never be matched again by a later rule.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::models::CountdownState;

static LETTER_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]+").unwrap());

/// Countdown component a token renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Days,
    Hours,
    Minutes,
    Seconds,
}

/// How a token matches a letter run
#[derive(Debug, Clone, Copy)]
enum Pattern {
    /// One or more repetitions of the character
    RunOf(char),
    /// Exactly this text
    Exact(&'static str),
}

impl Pattern {
    fn matches(&self, run: &str) -> bool {
        match self {
            Self::RunOf(c) => !run.is_empty() && run.chars().all(|r| r == *c),
            Self::Exact(text) => run == *text,
        }
    }
}

/// Rule table, in precedence order
const RULES: &[(Pattern, Field, bool)] = &[
    (Pattern::RunOf('d'), Field::Days, false),
    (Pattern::Exact("hh"), Field::Hours, true),
    (Pattern::Exact("h"), Field::Hours, false),
    (Pattern::Exact("mm"), Field::Minutes, true),
    (Pattern::Exact("m"), Field::Minutes, false),
    (Pattern::Exact("ss"), Field::Seconds, true),
    (Pattern::Exact("s"), Field::Seconds, false),
];

/// A countdown template such as `hh:mm:ss`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerFormat {
    template: String,
}

impl TimerFormat {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render a countdown state; expired renders as an empty string
    pub fn render(&self, state: &CountdownState) -> String {
        format(state, &self.template)
    }
}

impl Default for TimerFormat {
    fn default() -> Self {
        Self::new("hh:mm:ss")
    }
}

/// Render `state` through `template`
///
/// Tokens are matched against whole runs of letters, so fields must be
/// separated by non-letters. A run that is not exactly a token (`hhmmss`,
/// `hhh`, `days`) is copied through literally.
///
/// # Examples
///
/// ```
/// use utility_bar::countdown::format;
/// use utility_bar::models::CountdownState;
///
/// let state = CountdownState::Remaining { days: 0, hours: 1, minutes: 2, seconds: 3 };
/// assert_eq!(format(&state, "hh:mm:ss"), "01:02:03");
/// assert_eq!(format(&state, "d days hh:mm"), "0 days 01:02");
/// assert_eq!(format(&CountdownState::Expired, "hh:mm:ss"), "");
/// ```
pub fn format(state: &CountdownState, template: &str) -> String {
    let CountdownState::Remaining {
        days,
        hours,
        minutes,
        seconds,
    } = *state
    else {
        return String::new();
    };

    LETTER_RUN_REGEX
        .replace_all(template, |caps: &Captures<'_>| {
            let run = &caps[0];
            let Some((_, field, padded)) = RULES.iter().find(|(pattern, _, _)| pattern.matches(run))
            else {
                return run.to_string();
            };
            let value = match field {
                Field::Days => days,
                Field::Hours => hours,
                Field::Minutes => minutes,
                Field::Seconds => seconds,
            };
            if *padded {
                format!("{value:02}")
            } else {
                value.to_string()
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(days: i64, hours: i64, minutes: i64, seconds: i64) -> CountdownState {
        CountdownState::Remaining {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    #[test]
    fn test_padded_clock() {
        assert_eq!(format(&state(0, 1, 2, 3), "hh:mm:ss"), "01:02:03");
    }

    #[test]
    fn test_unpadded_tokens() {
        assert_eq!(format(&state(0, 1, 2, 3), "h:m:s"), "1:2:3");
    }

    #[test]
    fn test_days_run() {
        assert_eq!(format(&state(12, 4, 0, 9), "dd:hh:mm:ss"), "12:04:00:09");
        assert_eq!(format(&state(3, 0, 0, 0), "ddd"), "3");
    }

    #[test]
    fn test_words_are_literal() {
        assert_eq!(format(&state(0, 1, 2, 3), "d days hh:mm"), "0 days 01:02");
        assert_eq!(
            format(&state(2, 5, 30, 0), "d days, h hours"),
            "2 days, 5 hours"
        );
    }

    #[test]
    fn test_separators_pass_through() {
        assert_eq!(format(&state(1, 2, 3, 4), "[d] hh/mm-ss!"), "[1] 02/03-04!");
    }

    #[test]
    fn test_unseparated_runs_stay_literal() {
        let remaining = state(0, 1, 2, 3);
        assert_eq!(format(&remaining, "hhmmss"), "hhmmss");
        assert_eq!(format(&remaining, "hhh"), "hhh");
        assert_eq!(format(&remaining, "hh mm ss"), "01 02 03");
    }

    #[test]
    fn test_large_values_are_not_truncated() {
        assert_eq!(format(&state(400, 23, 59, 59), "d:hh"), "400:23");
    }

    #[test]
    fn test_expired_is_empty() {
        assert_eq!(format(&CountdownState::Expired, "d days"), "");
    }

    #[test]
    fn test_timer_format_default() {
        let fmt = TimerFormat::default();
        assert_eq!(fmt.template(), "hh:mm:ss");
        assert_eq!(fmt.render(&state(0, 0, 0, 7)), "00:00:07");
    }
}
