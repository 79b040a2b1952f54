//! Warm-tone colour filter capability.

use serde::{Deserialize, Serialize};

/// A whole-screen colour adjustment, expressed in CSS filter terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorFilter {
    pub sepia: f64,
    pub saturate: f64,
    pub hue_rotate_deg: f64,
}

impl Default for ColorFilter {
    fn default() -> Self {
        Self {
            sepia: 0.1,
            saturate: 0.9,
            hue_rotate_deg: 15.0,
        }
    }
}

impl ColorFilter {
    /// CSS `filter` value, e.g. `sepia(0.1) saturate(0.9) hue-rotate(15deg)`.
    pub fn css(&self) -> String {
        format!(
            "sepia({}) saturate({}) hue-rotate({}deg)",
            self.sepia, self.saturate, self.hue_rotate_deg
        )
    }
}

/// Applies or removes the filter on whatever the host renders to.
pub trait DisplayFilter: Send {
    fn apply(&mut self, filter: &ColorFilter);

    /// Restore the unmodified display.
    fn clear(&mut self);
}

/// Display filter for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFilter;

impl DisplayFilter for NoopFilter {
    fn apply(&mut self, _filter: &ColorFilter) {}

    fn clear(&mut self) {}
}
