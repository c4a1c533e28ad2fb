use anyhow::Result;
use chrono::{DateTime, Utc};
use std::time::Duration;

use utility_bar::bar::BarController;
use utility_bar::config::BarConfig;
use utility_bar::host::SimulatedHost;
use utility_bar::render::{ConsoleRenderer, OutputFormat, Renderer};

/// Seconds (from start) during which the pointer hovers the bar
#[derive(Debug, Clone, Copy)]
pub struct HoverWindow {
    pub at: u64,
    pub for_secs: u64,
}

impl HoverWindow {
    /// Second at which the pointer leaves again
    pub fn until(&self) -> u64 {
        self.at.saturating_add(self.for_secs)
    }

    pub fn enters_at(&self, second: u64) -> bool {
        second == self.at
    }

    pub fn leaves_at(&self, second: u64) -> bool {
        second == self.until()
    }
}

/// Apply the pointer events that happen once the clock reads `second`
fn apply_hover<R: Renderer>(
    bar: &mut BarController<R>,
    host: &mut SimulatedHost,
    hover: Option<HoverWindow>,
    second: u64,
) {
    let Some(hover) = hover else {
        return;
    };
    if hover.enters_at(second) {
        bar.pointer_enter(host);
    }
    if hover.leaves_at(second) {
        bar.pointer_leave(host);
    }
}

pub fn simulate(
    config: &BarConfig,
    seconds: u64,
    hover: Option<HoverWindow>,
    start: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    let origin = match start {
        Some(raw) => DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc),
        None => Utc::now(),
    };

    let mut host = SimulatedHost::new(origin);
    let renderer = ConsoleRenderer::stdout(output);
    let mut bar = BarController::mount(config, renderer, &mut host)?;

    apply_hover(&mut bar, &mut host, hover, 0);
    for second in 1..=seconds {
        if output == OutputFormat::Text {
            println!("-- t+{second}s");
        }
        host.advance(Duration::from_secs(1), |handle, host| {
            bar.on_timer(handle, host);
        });
        apply_hover(&mut bar, &mut host, hover, second);
    }

    tracing::info!(
        seconds,
        active_index = bar.active_index(),
        phase = %bar.phase(),
        expired = bar.is_expired(),
        "Simulation finished"
    );
    bar.teardown(&mut host);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_window_edges() {
        let hover = HoverWindow { at: 3, for_secs: 4 };
        assert!(hover.enters_at(3));
        assert!(!hover.leaves_at(3));
        assert!(hover.leaves_at(7));
        assert!(!hover.enters_at(7));
    }

    #[test]
    fn test_hover_window_end_saturates() {
        let hover = HoverWindow {
            at: u64::MAX - 1,
            for_secs: u64::MAX,
        };
        assert_eq!(hover.until(), u64::MAX);
        assert!(hover.leaves_at(u64::MAX));
    }

    #[test]
    fn test_hover_lands_after_the_clock_moves() {
        let config = BarConfig {
            multiple_text: "A|B|C".to_string(),
            slide_interval: 5,
            ..Default::default()
        };
        let mut host = SimulatedHost::new(Utc::now());
        let renderer = ConsoleRenderer::new(Vec::new(), OutputFormat::Json);
        let mut bar = BarController::mount(&config, renderer, &mut host).unwrap();
        let hover = Some(HoverWindow { at: 5, for_secs: 2 });

        for second in 1..=5 {
            host.advance(Duration::from_secs(1), |handle, host| {
                bar.on_timer(handle, host);
            });
            apply_hover(&mut bar, &mut host, hover, second);
        }
        // The slide due at t+5s has already moved before the pointer arrives
        assert_eq!(bar.active_index(), 1);
    }
}
