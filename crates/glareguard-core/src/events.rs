use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exposure::BlueLightLevel;
use crate::notify::NotificationPermission;

/// Why a flush happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlushReason {
    /// Periodic flush timer.
    Timer,
    /// The host went to the background.
    Hidden,
    /// The host is about to unload.
    Unload,
    /// Final flush when the tracker is torn down.
    Teardown,
}

/// Every state change of the tracker produces an Event.
/// Hosts log or forward them; the snapshot channel carries the state itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TrackerStarted {
        today_total: u64,
        blue_light_level: BlueLightLevel,
        protection_score: u8,
        at: DateTime<Utc>,
    },
    UsageFlushed {
        reason: FlushReason,
        elapsed_min: u64,
        today_total: u64,
        blue_light_level: BlueLightLevel,
        protection_score: u8,
        at: DateTime<Utc>,
    },
    /// Foreground regained; a new session interval starts now.
    SessionResumed {
        at: DateTime<Utc>,
    },
    BreakReminderShown {
        at: DateTime<Utc>,
    },
    /// A reminder was due but the notification surface is not allowed.
    BreakReminderSuppressed {
        permission: NotificationPermission,
        at: DateTime<Utc>,
    },
    BlueFilterChanged {
        enabled: bool,
        at: DateTime<Utc>,
    },
    BreakRemindersChanged {
        enabled: bool,
        timer_running: bool,
        at: DateTime<Utc>,
    },
    TrackerStopped {
        today_total: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short name matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TrackerStarted { .. } => "TrackerStarted",
            Event::UsageFlushed { .. } => "UsageFlushed",
            Event::SessionResumed { .. } => "SessionResumed",
            Event::BreakReminderShown { .. } => "BreakReminderShown",
            Event::BreakReminderSuppressed { .. } => "BreakReminderSuppressed",
            Event::BlueFilterChanged { .. } => "BlueFilterChanged",
            Event::BreakRemindersChanged { .. } => "BreakRemindersChanged",
            Event::TrackerStopped { .. } => "TrackerStopped",
        }
    }
}
