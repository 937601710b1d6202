//! Error types for the Pomodoro timer.

use thiserror::Error;

/// Message shown inline when the durations cannot start a session.
pub const INVALID_DURATIONS: &str = "Enter valid work and break time";

/// Errors that can occur while running the timer.
#[derive(Debug, Error)]
pub enum PomodoroError {
    /// User-supplied durations were empty, non-numeric or zero.
    #[error("{0}")]
    InvalidInput(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The terminal could not be set up or drawn to.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A desktop notification could not be dispatched.
    #[error("Notification error: {0}")]
    Notification(String),

    /// JSON serialization failed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The countdown task or async runtime failed.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PomodoroError {
    /// The standard invalid-durations error.
    #[must_use]
    pub fn invalid_durations() -> Self {
        Self::InvalidInput(INVALID_DURATIONS.to_string())
    }

    /// Whether this error is a local validation failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
