//! Configuration management for the Pomodoro timer.
//!
//! This module loads read-only configuration from `~/.pomodoro/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, NotificationConfig, TimerConfig, UiConfig};
