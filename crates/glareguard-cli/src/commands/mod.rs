pub mod config;
pub mod reset;
pub mod score;
pub mod status;
pub mod toggle;
pub mod watch;
