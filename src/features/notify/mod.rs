//! Desktop notifications for phase transitions.
//!
//! Notification delivery is best-effort: the timer loop calls [`dispatch`],
//! which logs and drops any failure.

mod desktop;

pub use desktop::DesktopNotifier;

use crate::config::NotificationConfig;
use crate::error::PomodoroError;

/// A notification to show at a phase boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub message: String,
}

impl Notice {
    /// Create a notice.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Sent when a work phase runs to completion.
    #[must_use]
    pub fn work_ended() -> Self {
        Self::new("Work session ended", "Enjoy your break!")
    }

    /// Sent when a break phase runs to completion.
    #[must_use]
    pub fn break_ended() -> Self {
        Self::new("Break ended", "Enjoy your work!")
    }
}

/// A sink for desktop notifications.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Show a notification. Implementations must not block for long.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be handed off.
    fn notify(&self, notice: &Notice) -> Result<(), PomodoroError>;
}

/// Notifier used when notifications are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), PomodoroError> {
        tracing::debug!(title = %notice.title, "notifications disabled, skipping");
        Ok(())
    }
}

/// Send a notice, swallowing any failure.
pub fn dispatch(notifier: &dyn Notifier, notice: &Notice) {
    if let Err(e) = notifier.notify(notice) {
        tracing::warn!(title = %notice.title, error = %e, "failed to send notification");
    }
}

/// Build the notifier described by the configuration.
#[must_use]
pub fn from_config(config: &NotificationConfig) -> std::sync::Arc<dyn Notifier> {
    if config.enabled {
        std::sync::Arc::new(DesktopNotifier::from_config(config))
    } else {
        std::sync::Arc::new(NullNotifier)
    }
}
