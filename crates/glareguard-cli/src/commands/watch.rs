use std::io::BufRead;
use std::time::Duration;

use clap::Args;
use glareguard_core::tracker::driver;
use glareguard_core::{Config, Event, LifecycleSignal};
use tokio::sync::mpsc;
use tracing::warn;

use crate::host::tracker_builder;

#[derive(Args)]
pub struct WatchArgs {
    /// Read lifecycle signals from stdin, one per line: `hide`, `show`, `unload`
    #[arg(long)]
    pub stdin_signals: bool,
    /// Stop after this many seconds instead of waiting for Ctrl-C
    #[arg(long)]
    pub for_secs: Option<u64>,
}

pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async move {
        let (scheduler, signal_tx, inputs) = driver::channels(16);
        let tracker = tracker_builder(&config)?.scheduler(scheduler).build();

        if args.stdin_signals {
            spawn_stdin_reader(signal_tx);
        } else {
            drop(signal_tx);
        }

        let for_secs = args.for_secs;
        let shutdown = async move {
            match for_secs {
                Some(secs) => {
                    tokio::select! {
                        _ = tokio::time::sleep(Duration::from_secs(secs)) => {}
                        _ = tokio::signal::ctrl_c() => {}
                    }
                }
                None => {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        warn!(error = %e, "could not listen for Ctrl-C, stopping");
                    }
                }
            }
        };

        let snapshot = driver::drive(tracker, inputs, shutdown, print_event).await;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        Ok::<_, Box<dyn std::error::Error>>(())
    })
}

fn print_event(event: &Event) {
    if let Ok(line) = serde_json::to_string(event) {
        println!("{line}");
    }
}

fn parse_signal(line: &str) -> Option<LifecycleSignal> {
    match line.trim().to_ascii_lowercase().as_str() {
        "hide" | "hidden" => Some(LifecycleSignal::Hidden),
        "show" | "visible" => Some(LifecycleSignal::Visible),
        "unload" => Some(LifecycleSignal::Unload),
        _ => None,
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<LifecycleSignal>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match parse_signal(&line) {
                Some(signal) => {
                    if tx.blocking_send(signal).is_err() {
                        break;
                    }
                }
                None => warn!(input = line.trim(), "unknown lifecycle signal"),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signal_words() {
        assert_eq!(parse_signal("hide"), Some(LifecycleSignal::Hidden));
        assert_eq!(parse_signal(" Visible \n"), Some(LifecycleSignal::Visible));
        assert_eq!(parse_signal("unload"), Some(LifecycleSignal::Unload));
        assert_eq!(parse_signal("sleep"), None);
    }
}
