//! # GlareGuard Core Library
//!
//! This library provides the screen exposure tracker behind the GlareGuard
//! eye-care companion. All behaviour lives here; the CLI binary is a thin
//! layer over the same library.
//!
//! ## Architecture
//!
//! - **Tracker**: A caller-driven state machine that folds foreground time
//!   into a per-day total and drives the colour filter and break reminders
//! - **Exposure**: Pure blue-light classification, protection score and
//!   formatting
//! - **Storage**: SQLite key/value store for usage and preferences, TOML
//!   configuration
//! - **Capabilities**: Clock, scheduler, notifier and display filter traits
//!   the host injects
//!
//! ## Key Components
//!
//! - [`ScreenTimeTracker`]: Core tracker state machine
//! - [`UsageStore`]: Typed, never-failing access to persisted usage
//! - [`Config`]: Application configuration management
//! - [`tracker::driver`]: tokio driver for running a tracker

pub mod clock;
pub mod error;
pub mod events;
pub mod exposure;
pub mod filter;
pub mod notify;
pub mod scheduler;
pub mod storage;
pub mod tracker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::{Event, FlushReason};
pub use exposure::{
    classify_blue_light, format_time, protection_score, recommendations, BlueLightLevel,
    ProtectionTier, Recommendation, ScreenTimeTier,
};
pub use filter::{ColorFilter, DisplayFilter};
pub use notify::{BreakNotification, NotificationPermission, Notifier};
pub use scheduler::{ManualScheduler, Scheduler, TimerKind, TokioScheduler};
pub use storage::{Config, Database, DailyUsageRecord, KeyValueStore, MemoryStore, UsageStore};
pub use tracker::{ExposureSnapshot, LifecycleSignal, ScreenTimeTracker, TrackerOptions};
