mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::HoverWindow;
use utility_bar::render::OutputFormat;

#[derive(Parser)]
#[command(
    name = "utility-bar",
    version,
    about = "Rotating announcement bar with live countdown",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); defaults to the config file's setting
    #[arg(long, global = true)]
    log_format: Option<String>,
}

/// Where the bar configuration comes from
#[derive(Args)]
struct ConfigArgs {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bar attribute as key=value (e.g. slide-interval=5), repeatable
    #[arg(short, long = "attr", value_name = "KEY=VALUE")]
    attrs: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve and print the bar's messages
    Preview {
        #[command(flatten)]
        source: ConfigArgs,

        /// Print messages as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print the formatted time remaining until a timestamp
    Countdown {
        /// End timestamp (RFC 3339, local date-time or date)
        #[arg(short, long)]
        end: String,

        /// Format template
        #[arg(short, long, default_value = "hh:mm:ss")]
        format: String,

        /// Evaluate at this RFC 3339 instant instead of now
        #[arg(long)]
        now: Option<String>,
    },

    /// Drive a bar on a virtual clock and print what it paints
    Simulate {
        #[command(flatten)]
        source: ConfigArgs,

        /// Virtual seconds to simulate
        #[arg(short, long, default_value = "30")]
        seconds: u64,

        /// Second at which the pointer enters the bar
        #[arg(long)]
        hover_at: Option<u64>,

        /// How long the pointer stays, in seconds
        #[arg(long, default_value = "5")]
        hover_for: u64,

        /// Virtual start instant (RFC 3339), defaults to now
        #[arg(long)]
        start: Option<String>,

        /// Intent output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,
    },

    /// Drive a bar in real time until the duration elapses or Ctrl-C
    Run {
        #[command(flatten)]
        source: ConfigArgs,

        /// Stop after this many seconds
        #[arg(short, long)]
        duration: Option<u64>,

        /// Intent output format (text, json)
        #[arg(short, long, default_value = "text")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configuration is needed before logging so the file can pick the format
    let config = match &cli.command {
        Commands::Preview { source, .. }
        | Commands::Simulate { source, .. }
        | Commands::Run { source, .. } => {
            commands::load_config(source.config.as_deref(), &source.attrs)?
        }
        Commands::Countdown { .. } => utility_bar::config::Config::default(),
    };

    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    match cli.command {
        Commands::Preview { json, .. } => {
            tracing::info!(json = %json, "Starting preview command");
            commands::preview(&config.bar, json)?;
        }

        Commands::Countdown { end, format, now } => {
            tracing::info!(end = %end, format = %format, "Starting countdown command");
            commands::countdown(&end, &format, now.as_deref())?;
        }

        Commands::Simulate {
            seconds,
            hover_at,
            hover_for,
            start,
            output,
            ..
        } => {
            tracing::info!(
                seconds = %seconds,
                hover_at = ?hover_at,
                hover_for = %hover_for,
                "Starting simulate command"
            );
            let hover = hover_at.map(|at| HoverWindow {
                at,
                for_secs: hover_for,
            });
            commands::simulate(
                &config.bar,
                seconds,
                hover,
                start.as_deref(),
                OutputFormat::parse(&output),
            )?;
        }

        Commands::Run {
            duration, output, ..
        } => {
            tracing::info!(duration = ?duration, "Starting run command");
            commands::run(&config.bar, duration, OutputFormat::parse(&output)).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("utility_bar=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("utility_bar={level},warn"))?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
