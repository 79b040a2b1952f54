use clap::ValueEnum;
use glareguard_core::Config;

use crate::host::tracker_builder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    fn enabled(self) -> bool {
        self == Switch::On
    }
}

pub fn run_filter(state: Switch) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut tracker = tracker_builder(&config)?.build();
    let event = tracker.toggle_blue_filter(state.enabled());
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}

/// Only the preference changes here; a running `watch` picks it up on
/// its next start.
pub fn run_reminders(state: Switch) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut tracker = tracker_builder(&config)?.build();
    let event = tracker.toggle_break_reminders(state.enabled());
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}
