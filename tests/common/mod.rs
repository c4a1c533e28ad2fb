//! Common test utilities

use chrono::{DateTime, TimeZone, Utc};
use utility_bar::bar::BarController;
use utility_bar::config::BarConfig;
use utility_bar::host::SimulatedHost;
use utility_bar::render::RecordingRenderer;

/// Fixed virtual start instant
pub fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn host() -> SimulatedHost {
    SimulatedHost::new(origin())
}

/// Config with one slot message
#[allow(dead_code)]
pub fn single_message(text: &str) -> BarConfig {
    BarConfig {
        message1: text.to_string(),
        ..Default::default()
    }
}

/// Config rotating through `A|B|C` every `interval` seconds
#[allow(dead_code)]
pub fn rotating(interval: i64) -> BarConfig {
    BarConfig {
        multiple_text: "A|B|C".to_string(),
        slide_interval: interval,
        ..Default::default()
    }
}

/// Mount a bar with a recording renderer, panicking on failure
#[allow(dead_code)]
pub fn mount(config: &BarConfig, host: &mut SimulatedHost) -> BarController<RecordingRenderer> {
    BarController::mount(config, RecordingRenderer::new(), host).unwrap()
}

/// Advance the host, dispatching every fired timer to `bar`
#[allow(dead_code)]
pub fn advance(
    bar: &mut BarController<RecordingRenderer>,
    host: &mut SimulatedHost,
    secs: u64,
) -> usize {
    host.advance(std::time::Duration::from_secs(secs), |handle, host| {
        bar.on_timer(handle, host);
    })
}
