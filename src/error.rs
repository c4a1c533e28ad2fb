//! Unified error handling for the utility-bar crate
//!
//! Domain errors live next to the code that raises them ([`ConfigError`] in
//! [`crate::config`]); this module folds them into a single [`Error`] so the
//! binary and embedders only need to handle one type.
//!
//! Nothing here ever crosses into the host page as a panic: a bar that cannot
//! initialize reports one error and renders nothing.

use std::io;
use thiserror::Error;

pub use crate::config::ConfigError;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Missing or invalid configuration
    Config,
    /// Writing or encoding renderer output
    Output,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Output => "output",
        }
    }
}

/// Unified error type for the utility-bar crate
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check if this error is recoverable (retrying may succeed)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Config(_) => false,
            Self::Io(_) => true, // I/O errors are often transient
            Self::Json(_) => false,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::Config,
            Self::Io(_) | Self::Json(_) => ErrorCategory::Output,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
