use anyhow::Result;
use std::time::Duration;

use utility_bar::bar::BarController;
use utility_bar::config::BarConfig;
use utility_bar::host::realtime::RunOutcome;
use utility_bar::host::RealtimeHost;
use utility_bar::render::{ConsoleRenderer, OutputFormat};

pub async fn run(config: &BarConfig, duration: Option<u64>, output: OutputFormat) -> Result<()> {
    let mut host = RealtimeHost::new();
    let renderer = ConsoleRenderer::stdout(output);
    let mut bar = BarController::mount(config, renderer, &mut host)?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    let outcome = host
        .run(duration.map(Duration::from_secs), shutdown, |handle, host| {
            bar.on_timer(handle, host);
        })
        .await;

    match outcome {
        RunOutcome::DeadlineReached => tracing::info!("Run deadline reached"),
        RunOutcome::Shutdown => tracing::info!("Interrupted, shutting down"),
    }
    bar.teardown(&mut host);
    Ok(())
}
