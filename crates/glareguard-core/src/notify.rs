//! Notification capability for break reminders.

use serde::{Deserialize, Serialize};

/// Permission state of the host notification surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    /// The user has not been asked yet.
    #[default]
    Default,
    Granted,
    Denied,
}

/// A notification ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakNotification {
    pub title: String,
    pub body: String,
    pub icon: String,
}

impl BreakNotification {
    /// The 20-20-20 reminder.
    pub fn eye_break() -> Self {
        Self {
            title: "Eye Break Reminder".into(),
            body: "Take a 20-second break and look at something 20 feet away!".into(),
            icon: "/placeholder.svg".into(),
        }
    }
}

/// Host notification surface.
pub trait Notifier: Send {
    fn permission(&self) -> NotificationPermission;

    /// Ask the user for permission. Fire-and-forget: the tracker never waits
    /// on, or looks at, the outcome.
    fn request_permission(&mut self);

    fn show(&mut self, notification: &BreakNotification);
}

/// Notifier for hosts without a notification surface. Always denied.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Denied
    }

    fn request_permission(&mut self) {}

    fn show(&mut self, _notification: &BreakNotification) {}
}
