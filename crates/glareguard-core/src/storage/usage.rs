//! Typed access to the daily usage record and user preferences.
//!
//! [`UsageStore`] never fails. A malformed value reads as "no data yet". If
//! the backing store itself errors, the store logs once and switches to an
//! in-memory map for the rest of its life, so tracking carries on for the
//! session without persistence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{KeyValueStore, MemoryStore};
use crate::error::StorageError;

pub const SCREEN_TIME_KEY: &str = "screenTimeUsage";
pub const BLUE_FILTER_KEY: &str = "blueFilterPreference";
pub const BREAK_REMINDERS_KEY: &str = "breakRemindersPreference";

/// `Date.prototype.toDateString()` layout, e.g. `Fri Oct 16 2026`.
const DATE_FORMAT: &str = "%a %b %d %Y";

/// Cumulative foreground minutes for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyUsageRecord {
    pub date: String,
    pub total_minutes: u64,
}

impl DailyUsageRecord {
    pub fn new(day: NaiveDate, total_minutes: u64) -> Self {
        Self {
            date: date_key(day),
            total_minutes,
        }
    }

    pub fn is_for(&self, day: NaiveDate) -> bool {
        self.date == date_key(day)
    }
}

/// Storage key string for a calendar day.
pub fn date_key(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub blue_filter_enabled: bool,
    pub break_reminders_enabled: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            blue_filter_enabled: false,
            break_reminders_enabled: true,
        }
    }
}

pub struct UsageStore {
    backend: Box<dyn KeyValueStore>,
    degraded: bool,
}

impl UsageStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            degraded: false,
        }
    }

    /// Purely in-memory store; nothing outlives the process.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    /// In-memory store for a session whose backing store could not be
    /// opened at all. Reports itself degraded from the start.
    pub fn fallback(cause: &StorageError) -> Self {
        warn!(error = %cause, "usage storage unavailable, continuing in memory for this session");
        Self {
            backend: Box::new(MemoryStore::new()),
            degraded: true,
        }
    }

    /// Whether the backing store failed and writes now only live in memory.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Today's recorded minutes; 0 if the record is missing, unreadable, or
    /// belongs to another day.
    pub fn total_for(&mut self, day: NaiveDate) -> u64 {
        match self.read_record() {
            Some(record) if record.is_for(day) => record.total_minutes,
            Some(record) => {
                debug!(stored = %record.date, "stored usage is from another day, starting at zero");
                0
            }
            None => 0,
        }
    }

    /// The raw stored record, if one parses.
    pub fn read_record(&mut self) -> Option<DailyUsageRecord> {
        let raw = self.get(SCREEN_TIME_KEY)?;
        match serde_json::from_str::<DailyUsageRecord>(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, "ignoring malformed usage record");
                None
            }
        }
    }

    /// Overwrite the stored record with `total_minutes` for `day`.
    pub fn write_total(&mut self, day: NaiveDate, total_minutes: u64) {
        let record = DailyUsageRecord::new(day, total_minutes);
        match serde_json::to_string(&record) {
            Ok(json) => self.set(SCREEN_TIME_KEY, &json),
            Err(e) => warn!(error = %e, "could not encode usage record"),
        }
    }

    pub fn reset_today(&mut self, day: NaiveDate) {
        self.write_total(day, 0);
    }

    pub fn preferences(&mut self) -> UserPreferences {
        let blue_filter_enabled = self.get(BLUE_FILTER_KEY).as_deref() == Some("true");
        let break_reminders_enabled = self.get(BREAK_REMINDERS_KEY).as_deref() != Some("false");
        UserPreferences {
            blue_filter_enabled,
            break_reminders_enabled,
        }
    }

    pub fn set_blue_filter(&mut self, enabled: bool) {
        self.set(BLUE_FILTER_KEY, bool_str(enabled));
    }

    pub fn set_break_reminders(&mut self, enabled: bool) {
        self.set(BREAK_REMINDERS_KEY, bool_str(enabled));
    }

    fn get(&mut self, key: &str) -> Option<String> {
        let result = self.backend.get(key);
        match result {
            Ok(value) => value,
            Err(e) => {
                self.degrade(&e);
                // The fallback store starts empty.
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = self.backend.set(key, value) {
            self.degrade(&e);
            // A fresh MemoryStore cannot fail.
            let _ = self.backend.set(key, value);
        }
    }

    fn degrade(&mut self, cause: &StorageError) {
        if self.degraded {
            return;
        }
        warn!(error = %cause, "usage storage unavailable, continuing in memory for this session");
        self.backend = Box::new(MemoryStore::new());
        self.degraded = true;
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn date_key_matches_browser_layout() {
        assert_eq!(date_key(day(16)), "Fri Oct 16 2026");
        assert_eq!(date_key(day(5)), "Mon Oct 05 2026");
    }

    #[test]
    fn record_json_uses_camel_case() {
        let json = serde_json::to_string(&DailyUsageRecord::new(day(16), 42)).unwrap();
        assert_eq!(json, r#"{"date":"Fri Oct 16 2026","totalMinutes":42}"#);
    }

    #[test]
    fn missing_record_reads_zero() {
        let mut store = UsageStore::in_memory();
        assert_eq!(store.total_for(day(16)), 0);
    }

    #[test]
    fn yesterdays_record_reads_zero() {
        let mut store = UsageStore::in_memory();
        store.write_total(day(15), 300);
        assert_eq!(store.total_for(day(16)), 0);
        assert_eq!(store.total_for(day(15)), 300);
    }

    #[test]
    fn malformed_record_reads_zero() {
        let mut backend = MemoryStore::new();
        backend.set(SCREEN_TIME_KEY, "{not json").unwrap();
        let mut store = UsageStore::new(Box::new(backend));
        assert_eq!(store.total_for(day(16)), 0);
        assert!(!store.is_degraded());
    }

    #[test]
    fn preference_defaults() {
        let mut store = UsageStore::in_memory();
        assert_eq!(store.preferences(), UserPreferences::default());
    }

    #[test]
    fn preferences_parse_only_exact_strings() {
        let mut backend = MemoryStore::new();
        backend.set(BLUE_FILTER_KEY, "yes").unwrap();
        backend.set(BREAK_REMINDERS_KEY, "no").unwrap();
        let mut store = UsageStore::new(Box::new(backend));
        let prefs = store.preferences();
        assert!(!prefs.blue_filter_enabled);
        assert!(prefs.break_reminders_enabled);

        store.set_blue_filter(true);
        store.set_break_reminders(false);
        let prefs = store.preferences();
        assert!(prefs.blue_filter_enabled);
        assert!(!prefs.break_reminders_enabled);
    }

    #[test]
    fn failing_backend_degrades_to_memory() {
        let backend = MemoryStore::new();
        let shared = backend.clone();
        let mut store = UsageStore::new(Box::new(backend));
        store.write_total(day(16), 12);

        shared.set_failing(true);
        assert_eq!(store.total_for(day(16)), 0);
        assert!(store.is_degraded());

        store.write_total(day(16), 5);
        assert_eq!(store.total_for(day(16)), 5);
    }

    #[test]
    fn fallback_store_starts_empty_and_degraded() {
        let cause = StorageError::QueryFailed("file is not a database".into());
        let mut store = UsageStore::fallback(&cause);
        assert!(store.is_degraded());
        assert_eq!(store.total_for(day(16)), 0);
        assert_eq!(store.preferences(), UserPreferences::default());

        store.write_total(day(16), 3);
        assert_eq!(store.total_for(day(16)), 3);
    }
}
