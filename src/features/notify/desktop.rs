//! Notifications through the platform notification daemon.

use std::thread;

use notify_rust::{Notification, Timeout};

use super::{Notice, Notifier};
use crate::config::NotificationConfig;
use crate::error::PomodoroError;

/// Shows notices with `notify-rust` on a detached thread.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
    timeout_ms: u32,
}

impl DesktopNotifier {
    /// Create a notifier with an app name and a display timeout in seconds.
    pub fn new(app_name: impl Into<String>, timeout_secs: u32) -> Self {
        Self {
            app_name: app_name.into(),
            timeout_ms: timeout_secs.saturating_mul(1000),
        }
    }

    /// Create a notifier from configuration.
    #[must_use]
    pub fn from_config(config: &NotificationConfig) -> Self {
        Self::new(config.app_name.clone(), config.timeout_secs)
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, notice: &Notice) -> Result<(), PomodoroError> {
        let app_name = self.app_name.clone();
        let timeout = Timeout::Milliseconds(self.timeout_ms);
        let notice = notice.clone();

        // D-Bus round trips can stall; never let that hold up a tick.
        thread::Builder::new()
            .name("notify".to_string())
            .spawn(move || {
                let result = Notification::new()
                    .summary(&notice.title)
                    .body(&notice.message)
                    .appname(&app_name)
                    .timeout(timeout)
                    .show();
                if let Err(e) = result {
                    tracing::warn!(title = %notice.title, error = %e, "notification daemon rejected notice");
                }
            })
            .map(|_| ())
            .map_err(|e| PomodoroError::Notification(format!("failed to spawn notifier: {e}")))
    }
}
