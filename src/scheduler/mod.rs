//! Message rotation scheduling
//!
//! The [`RotationScheduler`] decides which message is active and when the
//! bar advances to the next one. It is a small state machine:
//!
//! ```text
//!            start (autoStart, >1 message, interval > 0)
//!   Idle ─────────────────────────────────────────────▶ Running ◀──┐
//!    │                                                  │    ▲     │ advance
//!    │                                     pointer-enter│    │     │ (every interval)
//!    │                                                  ▼    │     │
//!    │                                                 Paused ─────┘
//!    │                                                   pointer-leave
//!    ▼
//!  Destroyed ◀──────────────── teardown (from any state)
//! ```
//!
//! The scheduler owns at most one pending timer handle at a time: the next
//! advance. Cancelling it is all pausing or teardown needs to do.

pub mod rotation;

pub use rotation::{Advance, RotationPhase, RotationScheduler, RotationSettings};
