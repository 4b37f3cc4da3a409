//! Completion alerts.
//!
//! The timer only sees the two capability traits below; which concrete
//! sinks are wired in is decided by the caller from `config.yaml`.

use std::io::Write;

use notify_rust::Notification;
use tracing::{debug, info, warn};

use crate::config::NotificationConfig;
use crate::error::DoingError;

/// Receives "session complete" notifications.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink {
    /// Surface a notification. Fire-and-forget.
    fn notify(&self, title: &str, body: &str);
}

/// Plays the completion alert.
#[cfg_attr(test, mockall::automock)]
pub trait SoundSink {
    /// Play the alert. Fire-and-forget.
    fn play_alert(&self);
}

/// Desktop notifications through the platform notification service.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    /// Create a notifier that labels notifications with `app_name`.
    #[must_use]
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    fn show(&self, title: &str, body: &str) -> Result<(), DoingError> {
        Notification::new()
            .summary(title)
            .body(body)
            .appname(&self.app_name)
            .show()
            .map(|_| ())
            .map_err(|e| DoingError::NotificationPermission(e.to_string()))
    }
}

impl NotificationSink for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        match self.show(title, body) {
            Ok(()) => debug!(title, "Desktop notification sent"),
            // The timer carries on identically whether or not this works
            Err(e) => warn!(error = %e, title, "Desktop notification failed"),
        }
    }
}

/// Records notifications in the log only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, title: &str, body: &str) {
        info!(title, body, "Session complete");
    }
}

/// Rings the terminal bell.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl SoundSink for TerminalBell {
    fn play_alert(&self) {
        let mut stderr = std::io::stderr();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|()| stderr.flush()) {
            debug!(error = %e, "Terminal bell failed");
        }
    }
}

/// A sound sink that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSound;

impl SoundSink for SilentSound {
    fn play_alert(&self) {}
}

/// Build the sinks selected by `config`.
#[must_use]
pub fn sinks_from_config(
    config: &NotificationConfig,
) -> (Box<dyn NotificationSink>, Box<dyn SoundSink>) {
    let notifier: Box<dyn NotificationSink> = if config.desktop {
        Box::new(DesktopNotifier::new(config.app_name.clone()))
    } else {
        Box::new(LogNotifier)
    };

    let sound: Box<dyn SoundSink> = if config.bell {
        Box::new(TerminalBell)
    } else {
        Box::new(SilentSound)
    };

    (notifier, sound)
}
