//! Configuration settings.
//!
//! Settings are loaded from `~/.pomodoro/config.yaml`. The file is optional
//! and never written; every field has a default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PomodoroError;
use crate::features::focus::BASE_TITLE;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Initial durations.
    pub timer: TimerConfig,
    /// Desktop notification settings.
    pub notifications: NotificationConfig,
    /// Interface settings.
    pub ui: UiConfig,
}

/// Initial values for the duration inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Work period in minutes.
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    /// Break period in minutes.
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

/// Desktop notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationConfig {
    /// Show desktop notifications at phase boundaries.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Application name reported to the notification daemon.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// How long a notification stays up, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,
}

/// Interface settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Window title while idle.
    #[serde(default = "default_title")]
    pub title: String,
}

// Default value functions for serde
const fn default_work_minutes() -> u32 {
    50
}

const fn default_break_minutes() -> u32 {
    10
}

const fn default_true() -> bool {
    true
}

fn default_app_name() -> String {
    BASE_TITLE.to_string()
}

const fn default_timeout_secs() -> u32 {
    5
}

fn default_title() -> String {
    BASE_TITLE.to_string()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            app_name: default_app_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, PomodoroError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomodoroError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            PomodoroError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Render the effective configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, PomodoroError> {
        serde_yaml::to_string(self)
            .map_err(|e| PomodoroError::Config(format!("Failed to serialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.timer.work_minutes, 50);
        assert_eq!(config.timer.break_minutes, 10);
        assert!(config.notifications.enabled);
        assert_eq!(config.notifications.app_name, "Pomodoro Timer");
        assert_eq!(config.notifications.timeout_secs, 5);
        assert_eq!(config.ui.title, "Pomodoro Timer");
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        // Should return defaults when file doesn't exist
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        // Write a partial config (only some fields)
        let partial_yaml = r"
timer:
  work_minutes: 45
notifications:
  enabled: false
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.timer.work_minutes, 45);
        assert!(!config.notifications.enabled);
        // Defaults should be used for missing fields
        assert_eq!(config.timer.break_minutes, 10);
        assert_eq!(config.notifications.timeout_secs, 5);
        assert_eq!(config.ui.title, "Pomodoro Timer");
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "timer: [not, a, map]").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_yaml_round_trips_defaults() {
        let yaml = Config::default().to_yaml().unwrap();
        assert!(yaml.contains("work_minutes: 50"));
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
