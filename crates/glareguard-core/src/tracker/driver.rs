//! Async driver binding a tracker to a tokio runtime.
//!
//! One task owns the tracker and handles timer ticks, lifecycle signals and
//! shutdown strictly one at a time, so flushes never overlap.

use std::future::Future;

use tokio::sync::mpsc;
use tracing::debug;

use super::{ExposureSnapshot, LifecycleSignal, ScreenTimeTracker};
use crate::events::Event;
use crate::scheduler::{TimerKind, TokioScheduler};

/// Receiving ends the driver loop consumes.
pub struct DriverInputs {
    ticks: mpsc::UnboundedReceiver<TimerKind>,
    signals: mpsc::Receiver<LifecycleSignal>,
}

/// Create the scheduler to build the tracker with, the sender the host uses
/// for lifecycle signals, and the inputs to hand to [`drive`].
pub fn channels(
    signal_buffer: usize,
) -> (TokioScheduler, mpsc::Sender<LifecycleSignal>, DriverInputs) {
    let (scheduler, ticks) = TokioScheduler::new();
    let (signal_tx, signals) = mpsc::channel(signal_buffer.max(1));
    (scheduler, signal_tx, DriverInputs { ticks, signals })
}

/// Start `tracker`, run it until `shutdown` resolves, then tear it down.
///
/// Every event is passed to `on_event`. Returns the final snapshot.
/// A closed signal channel is not a shutdown; the tracker keeps running on
/// timer ticks alone.
pub async fn drive<S, F>(
    mut tracker: ScreenTimeTracker,
    inputs: DriverInputs,
    shutdown: S,
    mut on_event: F,
) -> ExposureSnapshot
where
    S: Future<Output = ()>,
    F: FnMut(&Event),
{
    let DriverInputs {
        mut ticks,
        mut signals,
    } = inputs;
    let mut signals_open = true;

    if let Some(event) = tracker.start() {
        on_event(&event);
    }

    tokio::pin!(shutdown);
    loop {
        let event = tokio::select! {
            biased;
            _ = &mut shutdown => break,
            signal = signals.recv(), if signals_open => match signal {
                Some(signal) => tracker.handle_signal(signal),
                None => {
                    debug!("lifecycle signal channel closed");
                    signals_open = false;
                    None
                }
            },
            tick = ticks.recv() => match tick {
                Some(kind) => tracker.on_timer(kind),
                None => break,
            },
        };
        if let Some(event) = event {
            on_event(&event);
        }
    }

    if let Some(event) = tracker.shutdown() {
        on_event(&event);
    }
    tracker.snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::{MemoryStore, UsageStore};
    use chrono::{FixedOffset, TimeZone};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::sync::oneshot;

    fn morning() -> ManualClock {
        ManualClock::new(
            FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2026, 10, 16, 9, 0, 0)
                .unwrap(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn drives_timers_signals_and_shutdown() {
        let clock = morning();
        let store = MemoryStore::new();
        let (scheduler, signal_tx, inputs) = channels(8);
        let tracker = ScreenTimeTracker::builder(UsageStore::new(Box::new(store.clone())))
            .clock(clock.clone())
            .scheduler(scheduler)
            .build();

        let seen: Arc<Mutex<Vec<&'static str>>> = Arc::default();
        let sink = seen.clone();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let run = tokio::spawn(drive(
            tracker,
            inputs,
            async {
                let _ = stop_rx.await;
            },
            move |event| sink.lock().unwrap().push(event.kind()),
        ));

        // Five minutes of foreground use, then the flush timer fires.
        clock.advance(chrono::Duration::minutes(5));
        tokio::time::sleep(Duration::from_secs(31)).await;

        clock.advance(chrono::Duration::minutes(2));
        signal_tx.send(LifecycleSignal::Hidden).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        stop_tx.send(()).unwrap();
        let snapshot = run.await.unwrap();

        assert_eq!(snapshot.today_total, 7);
        assert!(!snapshot.is_active);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.first(), Some(&"TrackerStarted"));
        assert_eq!(seen.last(), Some(&"TrackerStopped"));
        assert!(seen.contains(&"UsageFlushed"));
    }

    #[tokio::test(start_paused = true)]
    async fn closed_signal_channel_keeps_running() {
        let clock = morning();
        let (scheduler, signal_tx, inputs) = channels(1);
        drop(signal_tx);
        let tracker = ScreenTimeTracker::builder(UsageStore::in_memory())
            .clock(clock.clone())
            .scheduler(scheduler)
            .build();

        let snapshot = drive(
            tracker,
            inputs,
            async {
                tokio::time::sleep(Duration::from_secs(95)).await;
            },
            |_| {},
        )
        .await;
        assert_eq!(snapshot.today_total, 0);
        assert!(!snapshot.is_active);
    }
}
