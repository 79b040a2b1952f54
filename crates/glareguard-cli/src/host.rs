//! Terminal implementations of the tracker's host capabilities.

use std::io::Write;
use std::path::PathBuf;

use glareguard_core::storage::{data_dir, Database};
use glareguard_core::tracker::TrackerBuilder;
use glareguard_core::{
    BreakNotification, ColorFilter, Config, CoreError, DisplayFilter, NotificationPermission,
    Notifier, ScreenTimeTracker, UsageStore,
};
use tracing::{info, warn};

/// Shows reminders on stderr with a terminal bell.
///
/// Starts in the permission state from config. Running the CLI is taken as
/// consent, so a request moves `default` to `granted`; `denied` stays denied.
pub struct ConsoleNotifier {
    permission: NotificationPermission,
}

impl ConsoleNotifier {
    pub fn new(permission: NotificationPermission) -> Self {
        Self { permission }
    }
}

impl Notifier for ConsoleNotifier {
    fn permission(&self) -> NotificationPermission {
        self.permission
    }

    fn request_permission(&mut self) {
        if self.permission == NotificationPermission::Default {
            info!("console notifications enabled");
            self.permission = NotificationPermission::Granted;
        }
    }

    fn show(&mut self, notification: &BreakNotification) {
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "\x07{}: {}", notification.title, notification.body);
    }
}

/// Publishes the active colour filter as a CSS filter string in
/// `<data dir>/filter.css` for a compositor or browser hook to pick up.
/// Clearing removes the file.
pub struct FileFilter {
    path: PathBuf,
}

impl FileFilter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_data_dir() -> Result<Self, CoreError> {
        Ok(Self::new(data_dir()?.join("filter.css")))
    }
}

impl DisplayFilter for FileFilter {
    fn apply(&mut self, filter: &ColorFilter) {
        if let Err(e) = std::fs::write(&self.path, filter.css()) {
            warn!(path = %self.path.display(), error = %e, "could not write colour filter");
        }
    }

    fn clear(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "could not remove colour filter"),
        }
    }
}

/// Usage store over the on-disk database, or an in-memory one if the
/// database cannot be opened.
pub fn open_store() -> UsageStore {
    match Database::open() {
        Ok(db) => UsageStore::new(Box::new(db)),
        Err(e) => UsageStore::fallback(&e),
    }
}

/// A tracker builder wired to the terminal host.
pub fn tracker_builder(config: &Config) -> Result<TrackerBuilder, CoreError> {
    Ok(ScreenTimeTracker::builder(open_store())
        .notifier(ConsoleNotifier::new(config.notifications.permission))
        .display_filter(FileFilter::in_data_dir()?)
        .options(config.into()))
}
