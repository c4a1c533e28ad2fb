//! utility-bar - Rotating announcement bar with countdown timer
//!
//! The core of a fixed-position announcement strip: it resolves configured
//! messages (with two inline-link dialects), rotates between them with
//! directional transitions and pause-on-hover, and splices a live countdown
//! into any message carrying the `[TIMER]` placeholder.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Bar configuration, attribute ingestion and TOML loading
//! - [`models`] - Core data structures and types
//! - [`parser`] - Message resolution and inline link syntax
//! - [`countdown`] - Remaining-time computation and format templates
//! - [`scheduler`] - Rotation state machine
//! - [`host`] - Timer facilities (simulated clock and tokio real time)
//! - [`render`] - Render intents and the renderers consuming them
//! - [`bar`] - The controller tying everything together
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use utility_bar::bar::BarController;
//! use utility_bar::config::BarConfig;
//! use utility_bar::host::SimulatedHost;
//! use utility_bar::render::RecordingRenderer;
//!
//! let config = BarConfig::from_attributes([
//!     ("data-utility-multiple-text", "Free shipping|New arrivals"),
//!     ("data-utility-slide-interval", "5"),
//! ]);
//!
//! let mut host = SimulatedHost::new(Utc::now());
//! let mut bar = BarController::mount(&config, RecordingRenderer::new(), &mut host)?;
//! host.advance(std::time::Duration::from_secs(5), |handle, host| {
//!     bar.on_timer(handle, host);
//! });
//! assert_eq!(bar.active_index(), 1);
//! # Ok::<(), utility_bar::Error>(())
//! ```

pub mod bar;
pub mod config;
pub mod countdown;
pub mod error;
pub mod host;
pub mod models;
pub mod parser;
pub mod render;
pub mod scheduler;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::bar::BarController;
    pub use crate::config::{BarConfig, Config};
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::host::{SimulatedHost, TimerHandle, TimerHost};
    pub use crate::models::{CountdownState, Message, SlideDirection};
    pub use crate::render::{RenderIntent, Renderer};
    pub use crate::scheduler::{RotationPhase, RotationScheduler};
}

// Direct re-exports for convenience
pub use error::{Error, Result};
pub use models::{CountdownState, Message};
