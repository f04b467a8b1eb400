//! Toast style messages raised by the state containers
//!
//! The containers only queue them. Showing them (and dropping them after
//! their timeout) is up to the front end.

use marlin_shared::const_config::client::notification::NOTIFICATION_TIMEOUT;
use marlin_time::Seconds;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn title(&self) -> &'static str {
        match self {
            NotificationKind::Success => "Success",
            NotificationKind::Error => "Error",
            NotificationKind::Warning => "Warning",
            NotificationKind::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: &'static str,
    pub message: String,
    pub timeout: Seconds,
}

impl Notification {
    pub fn new<S: Into<String>>(kind: NotificationKind, message: S) -> Self {
        Self {
            kind,
            title: kind.title(),
            message: message.into(),
            timeout: NOTIFICATION_TIMEOUT,
        }
    }
}

/// Cheap to clone, all clones share the same queue
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<Vec<Notification>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self) -> MutexGuard<'_, Vec<Notification>> {
        // Pushing a notification cannot leave the vec half written
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => error!(message = notification.message, "notification"),
            NotificationKind::Warning => warn!(message = notification.message, "notification"),
            NotificationKind::Success | NotificationKind::Info => {
                info!(kind = %notification.kind, message = notification.message, "notification")
            }
        }
        self.queue().push(notification);
    }

    pub fn success<S: Into<String>>(&self, message: S) {
        self.push(Notification::new(NotificationKind::Success, message));
    }

    pub fn error<S: Into<String>>(&self, message: S) {
        self.push(Notification::new(NotificationKind::Error, message));
    }

    pub fn warning<S: Into<String>>(&self, message: S) {
        self.push(Notification::new(NotificationKind::Warning, message));
    }

    pub fn info<S: Into<String>>(&self, message: S) {
        self.push(Notification::new(NotificationKind::Info, message));
    }

    /// Removes and returns everything queued so far, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.queue())
    }

    pub fn len(&self) -> usize {
        self.queue().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_queue_in_order() {
        // Arrange
        let notifier = Notifier::new();
        let other_handle = notifier.clone();
        notifier.success("first");
        other_handle.warning("second");

        // Act
        let actual = notifier.drain();

        // Assert
        assert_eq!(actual.len(), 2);
        assert_eq!(actual[0].message, "first");
        assert_eq!(actual[0].title, "Success");
        assert_eq!(actual[1].kind, NotificationKind::Warning);
        assert!(notifier.is_empty());
    }

    #[test]
    fn default_timeout_is_five_seconds() {
        let actual = Notification::new(NotificationKind::Info, "You have been logged out");
        assert_eq!(actual.timeout, Seconds::new(5));
        assert_eq!(actual.title, "Info");
    }
}
