//! Screen exposure tracker.
//!
//! A caller-driven state machine: it owns no threads and no timers of its
//! own. Hosts feed it timer ticks ([`ScreenTimeTracker::on_timer`]) and
//! lifecycle signals ([`ScreenTimeTracker::handle_signal`]); every operation
//! returns the [`Event`] it produced and republishes the snapshot.
//!
//! ## Lifecycle
//!
//! ```text
//! built -> start() -> active (visible <-> hidden) -> shutdown() -> stopped
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut tracker = ScreenTimeTracker::builder(store).build();
//! tracker.start();
//! // On every tick of the flush timer:
//! tracker.on_timer(TimerKind::Flush);
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use tokio::sync::watch;
use tracing::{debug, info};

use super::reminder::BreakReminder;
use super::snapshot::ExposureSnapshot;
use super::LifecycleSignal;
use crate::clock::{Clock, SystemClock};
use crate::events::{Event, FlushReason};
use crate::filter::{ColorFilter, DisplayFilter, NoopFilter};
use crate::notify::{BreakNotification, NotificationPermission, Notifier, NullNotifier};
use crate::scheduler::{ManualScheduler, Scheduler, TimerHandle, TimerKind};
use crate::storage::{Config, UsageStore, UserPreferences};

/// One year; longer reminder intervals are clamped.
const MAX_BREAK_INTERVAL_MIN: u64 = 525_600;

/// Tuning knobs, normally taken from [`Config`].
#[derive(Debug, Clone)]
pub struct TrackerOptions {
    pub flush_interval: Duration,
    pub reminder_check_interval: Duration,
    pub break_interval: chrono::Duration,
    pub carry_partial_minutes: bool,
    pub color_filter: ColorFilter,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for TrackerOptions {
    fn from(config: &Config) -> Self {
        Self {
            flush_interval: Duration::from_secs(config.tracking.flush_interval_secs.max(1)),
            reminder_check_interval: Duration::from_secs(
                config.reminders.check_interval_secs.max(1),
            ),
            break_interval: chrono::Duration::minutes(
                config.reminders.break_interval_min.min(MAX_BREAK_INTERVAL_MIN) as i64,
            ),
            carry_partial_minutes: config.tracking.carry_partial_minutes,
            color_filter: config.filter.color_filter(),
        }
    }
}

pub struct TrackerBuilder {
    store: UsageStore,
    clock: Arc<dyn Clock>,
    scheduler: Box<dyn Scheduler>,
    notifier: Box<dyn Notifier>,
    filter: Box<dyn DisplayFilter>,
    options: TrackerOptions,
}

impl TrackerBuilder {
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn scheduler(mut self, scheduler: impl Scheduler + 'static) -> Self {
        self.scheduler = Box::new(scheduler);
        self
    }

    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn display_filter(mut self, filter: impl DisplayFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn options(mut self, options: TrackerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> ScreenTimeTracker {
        let now = self.clock.now();
        let (publisher, _) = watch::channel(ExposureSnapshot::default());
        ScreenTimeTracker {
            reminder: BreakReminder::new(
                self.options.reminder_check_interval,
                self.options.break_interval,
            ),
            store: self.store,
            clock: self.clock,
            scheduler: self.scheduler,
            notifier: self.notifier,
            filter: self.filter,
            options: self.options,
            session_start: now,
            flush_timer: None,
            preferences: UserPreferences::default(),
            today_total: 0,
            active: false,
            visible: true,
            current: ExposureSnapshot::default(),
            publisher,
        }
    }
}

/// Tracks today's foreground minutes and drives the two mitigations.
pub struct ScreenTimeTracker {
    store: UsageStore,
    clock: Arc<dyn Clock>,
    scheduler: Box<dyn Scheduler>,
    notifier: Box<dyn Notifier>,
    filter: Box<dyn DisplayFilter>,
    options: TrackerOptions,
    /// Start of the current uninterrupted foreground interval.
    session_start: DateTime<FixedOffset>,
    reminder: BreakReminder,
    flush_timer: Option<TimerHandle>,
    preferences: UserPreferences,
    today_total: u64,
    active: bool,
    visible: bool,
    current: ExposureSnapshot,
    publisher: watch::Sender<ExposureSnapshot>,
}

impl ScreenTimeTracker {
    /// Start building a tracker over `store`.
    ///
    /// Defaults: system clock, a [`ManualScheduler`], no notification
    /// surface, no display filter, options from `Config::default()`.
    pub fn builder(store: UsageStore) -> TrackerBuilder {
        TrackerBuilder {
            store,
            clock: Arc::new(SystemClock),
            scheduler: Box::new(ManualScheduler::new()),
            notifier: Box::new(NullNotifier),
            filter: Box::new(NoopFilter),
            options: TrackerOptions::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> ExposureSnapshot {
        self.current.clone()
    }

    /// Receive every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ExposureSnapshot> {
        self.publisher.subscribe()
    }

    pub fn today_total(&self) -> u64 {
        self.today_total
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn preferences(&self) -> UserPreferences {
        self.preferences
    }

    pub fn session_start(&self) -> DateTime<FixedOffset> {
        self.session_start
    }

    pub fn last_break_notification(&self) -> Option<DateTime<FixedOffset>> {
        self.reminder.last_notification()
    }

    pub fn break_reminder_running(&self) -> bool {
        self.reminder.is_running()
    }

    /// True once storage failed and the session is running in memory only.
    pub fn storage_degraded(&self) -> bool {
        self.store.is_degraded()
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Load today's total and preferences, then begin tracking.
    ///
    /// Returns `None` if already started.
    pub fn start(&mut self) -> Option<Event> {
        if self.active {
            return None;
        }
        let now = self.clock.now();
        self.today_total = self.store.total_for(now.date_naive());
        self.preferences = self.store.preferences();

        if self.preferences.break_reminders_enabled
            && self.notifier.permission() == NotificationPermission::Default
        {
            self.notifier.request_permission();
        }

        self.session_start = now;
        self.visible = true;
        self.active = true;

        self.flush_timer = Some(
            self.scheduler
                .schedule_repeating(TimerKind::Flush, self.options.flush_interval),
        );
        if self.preferences.blue_filter_enabled {
            self.filter.apply(&self.options.color_filter);
        }
        if self.preferences.break_reminders_enabled {
            self.reminder.start(self.scheduler.as_mut());
        }

        self.publish(now);
        info!(
            today_total = self.today_total,
            blue_filter = self.preferences.blue_filter_enabled,
            break_reminders = self.preferences.break_reminders_enabled,
            "screen time tracking started"
        );
        Some(Event::TrackerStarted {
            today_total: self.today_total,
            blue_light_level: self.current.blue_light_level,
            protection_score: self.current.protection_score,
            at: now.with_timezone(&Utc),
        })
    }

    /// Fold the current foreground interval into today's stored total.
    ///
    /// Only whole minutes are counted. Unless `carry_partial_minutes` is set
    /// the leftover seconds are dropped when the session clock resets.
    /// Time spent hidden is never counted.
    pub fn flush(&mut self, reason: FlushReason) -> Option<Event> {
        if !self.active {
            return None;
        }
        let now = self.clock.now();
        let today = now.date_naive();

        let elapsed_ms = if self.visible {
            (now - self.session_start).num_milliseconds().max(0)
        } else {
            0
        };
        let elapsed_min = (elapsed_ms / 60_000) as u64;

        // Re-read so the write is always against the freshest stored value.
        let stored = self.store.total_for(today);
        let total = stored.saturating_add(elapsed_min);
        self.store.write_total(today, total);

        self.session_start = if self.options.carry_partial_minutes && now > self.session_start {
            self.session_start + chrono::Duration::minutes(elapsed_min as i64)
        } else {
            now
        };
        self.today_total = total;
        self.publish(now);

        debug!(?reason, elapsed_min, today_total = total, "usage flushed");
        Some(Event::UsageFlushed {
            reason,
            elapsed_min,
            today_total: total,
            blue_light_level: self.current.blue_light_level,
            protection_score: self.current.protection_score,
            at: now.with_timezone(&Utc),
        })
    }

    /// React to a host lifecycle change.
    pub fn handle_signal(&mut self, signal: LifecycleSignal) -> Option<Event> {
        if !self.active {
            return None;
        }
        match signal {
            LifecycleSignal::Hidden => {
                if !self.visible {
                    return None;
                }
                let event = self.flush(FlushReason::Hidden);
                self.visible = false;
                event
            }
            LifecycleSignal::Visible => {
                if self.visible {
                    return None;
                }
                let now = self.clock.now();
                self.session_start = now;
                self.visible = true;
                debug!("foreground regained, new session interval");
                Some(Event::SessionResumed {
                    at: now.with_timezone(&Utc),
                })
            }
            LifecycleSignal::Unload => self.flush(FlushReason::Unload),
        }
    }

    /// Dispatch a tick from one of the tracker's timers.
    ///
    /// Ticks carry only their kind, so a `BreakCheck` queued before the
    /// reminder timer was cancelled can arrive after it restarts.
    /// `check_break` must stay a no-op unless a reminder is due.
    pub fn on_timer(&mut self, kind: TimerKind) -> Option<Event> {
        match kind {
            TimerKind::Flush => self.flush(FlushReason::Timer),
            TimerKind::BreakCheck => self.check_break(),
        }
    }

    /// Show a break reminder if one is due and allowed.
    pub fn check_break(&mut self) -> Option<Event> {
        if !self.active || !self.reminder.is_running() {
            return None;
        }
        let now = self.clock.now();
        if !self.reminder.take_due(now) {
            return None;
        }
        let at = now.with_timezone(&Utc);
        match self.notifier.permission() {
            NotificationPermission::Granted => {
                self.notifier.show(&BreakNotification::eye_break());
                info!("break reminder shown");
                Some(Event::BreakReminderShown { at })
            }
            permission => {
                debug!(?permission, "break reminder due but notifications not granted");
                Some(Event::BreakReminderSuppressed { permission, at })
            }
        }
    }

    pub fn toggle_blue_filter(&mut self, enabled: bool) -> Event {
        let now = self.clock.now();
        self.preferences.blue_filter_enabled = enabled;
        self.store.set_blue_filter(enabled);
        if enabled {
            self.filter.apply(&self.options.color_filter);
        } else {
            self.filter.clear();
        }
        self.publish(now);
        info!(enabled, "blue light filter toggled");
        Event::BlueFilterChanged {
            enabled,
            at: now.with_timezone(&Utc),
        }
    }

    /// Enable or disable break reminders.
    ///
    /// The check timer only runs while the tracker is active; starting it
    /// twice or stopping it twice does nothing.
    pub fn toggle_break_reminders(&mut self, enabled: bool) -> Event {
        let now = self.clock.now();
        self.preferences.break_reminders_enabled = enabled;
        self.store.set_break_reminders(enabled);
        if enabled {
            if self.active {
                self.reminder.start(self.scheduler.as_mut());
            }
        } else {
            self.reminder.stop(self.scheduler.as_mut());
        }
        self.publish(now);
        info!(enabled, "break reminders toggled");
        Event::BreakRemindersChanged {
            enabled,
            timer_running: self.reminder.is_running(),
            at: now.with_timezone(&Utc),
        }
    }

    /// Stop tracking: cancel the flush timer, flush one last time, cancel
    /// the reminder timer. Returns `None` if not active.
    pub fn shutdown(&mut self) -> Option<Event> {
        if !self.active {
            return None;
        }
        if let Some(handle) = self.flush_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.flush(FlushReason::Teardown);
        self.reminder.stop(self.scheduler.as_mut());
        self.active = false;

        let now = self.clock.now();
        self.publish(now);
        info!(today_total = self.today_total, "screen time tracking stopped");
        Some(Event::TrackerStopped {
            today_total: self.today_total,
            at: now.with_timezone(&Utc),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn publish(&mut self, now: DateTime<FixedOffset>) {
        self.current = ExposureSnapshot::from_total(
            self.today_total,
            now.hour(),
            self.active,
            self.preferences.blue_filter_enabled,
            self.preferences.break_reminders_enabled,
        );
        self.publisher.send_replace(self.current.clone());
    }
}

impl Drop for ScreenTimeTracker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
