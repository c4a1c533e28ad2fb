use anyhow::{bail, Result};
use chrono::{DateTime, Utc};

use utility_bar::bar::EXPIRED_TEXT;
use utility_bar::countdown::{CountdownTarget, TimerFormat};

pub fn countdown(end: &str, template: &str, now: Option<&str>) -> Result<()> {
    let now = match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc),
        None => Utc::now(),
    };

    let target = CountdownTarget::parse(end);
    let Some(state) = target.state_at(now) else {
        bail!("No end timestamp given");
    };

    tracing::debug!(end = %target, now = %now, state = ?state, "Computed countdown");
    if state.is_expired() {
        println!("{EXPIRED_TEXT}");
    } else {
        println!("{}", TimerFormat::new(template).render(&state));
    }
    Ok(())
}
