//! Logging setup.
//!
//! The full-screen interface owns the terminal, so it logs to a file. The
//! headless commands log to stderr. `POMODORO_LOG` takes an `EnvFilter`
//! directive and overrides the level chosen from `--verbose`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::PomodoroError;

/// Environment variable holding a filter directive.
pub const LOG_ENV: &str = "POMODORO_LOG";

/// Where log records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error.
    Stderr,
    /// Append to a file.
    File(PathBuf),
}

impl LogTarget {
    /// Level used when `POMODORO_LOG` is unset.
    #[must_use]
    pub const fn default_level(&self, verbose: bool) -> &'static str {
        match (self, verbose) {
            (_, true) => "debug",
            (Self::Stderr, false) => "warn",
            (Self::File(_), false) => "info",
        }
    }
}

fn filter(target: &LogTarget, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(target.default_level(verbose)))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(target: &LogTarget, verbose: bool) -> Result<(), PomodoroError> {
    let env_filter = filter(target, verbose);

    let result = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    result.map_err(|e| PomodoroError::Config(format!("Failed to initialise logging: {e}")))
}
