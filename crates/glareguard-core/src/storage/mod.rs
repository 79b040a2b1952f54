mod config;
pub mod database;
mod memory;
pub mod usage;

pub use config::{Config, FilterConfig, NotificationsConfig, RemindersConfig, TrackingConfig};
pub use database::Database;
pub use memory::MemoryStore;
pub use usage::{
    DailyUsageRecord, UsageStore, UserPreferences, BLUE_FILTER_KEY, BREAK_REMINDERS_KEY,
    SCREEN_TIME_KEY,
};

use std::path::PathBuf;

use crate::error::StorageError;

/// Device-local string key/value storage.
///
/// This is the whole persistence contract the tracker relies on; values are
/// opaque strings (JSON or `"true"`/`"false"`).
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Returns `~/.config/glareguard[-dev]/` based on GLAREGUARD_ENV.
///
/// Set GLAREGUARD_ENV=dev to use the development data directory, or
/// GLAREGUARD_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("GLAREGUARD_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("GLAREGUARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("glareguard-dev")
            } else {
                base_dir.join("glareguard")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
