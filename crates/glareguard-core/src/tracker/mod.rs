pub mod driver;
mod engine;
mod reminder;
mod snapshot;

use serde::{Deserialize, Serialize};

pub use engine::{ScreenTimeTracker, TrackerBuilder, TrackerOptions};
pub use snapshot::ExposureSnapshot;

/// Host lifecycle changes the tracker reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleSignal {
    /// Back in the foreground.
    Visible,
    /// Sent to the background.
    Hidden,
    /// About to be torn down by the host.
    Unload,
}
