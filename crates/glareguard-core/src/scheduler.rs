//! Repeating timer capability.
//!
//! The tracker never sleeps or spawns anything itself. It asks a
//! [`Scheduler`] for repeating timers and is told about each tick through
//! `ScreenTimeTracker::on_timer`. [`ManualScheduler`] only records what is
//! scheduled, for tests and hosts that pump ticks themselves;
//! [`TokioScheduler`] runs real interval tasks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Which tracker timer a tick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Periodic usage flush.
    Flush,
    /// Break reminder check.
    BreakCheck,
}

/// Opaque id of a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

pub trait Scheduler: Send {
    /// Start a timer ticking every `period`, first tick one period from now.
    fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) -> TimerHandle;

    /// Stop a timer. Unknown or already cancelled handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Records scheduled timers without running them.
///
/// Clones share state, so a test can hand one clone to the tracker and
/// inspect the other.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualInner>>,
}

#[derive(Debug, Default)]
struct ManualInner {
    next_id: u64,
    active: HashMap<TimerHandle, (TimerKind, Duration)>,
    scheduled: HashMap<TimerKind, usize>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live timers of this kind.
    pub fn active_count(&self, kind: TimerKind) -> usize {
        self.lock()
            .active
            .values()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.active_count(kind) > 0
    }

    /// Total timers of this kind ever scheduled, cancelled or not.
    pub fn scheduled_count(&self, kind: TimerKind) -> usize {
        self.lock().scheduled.get(&kind).copied().unwrap_or(0)
    }

    pub fn period(&self, kind: TimerKind) -> Option<Duration> {
        self.lock()
            .active
            .values()
            .find(|(k, _)| *k == kind)
            .map(|(_, period)| *period)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) -> TimerHandle {
        let mut inner = self.lock();
        inner.next_id += 1;
        let handle = TimerHandle(inner.next_id);
        inner.active.insert(handle, (kind, period));
        *inner.scheduled.entry(kind).or_insert(0) += 1;
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.lock().active.remove(&handle);
    }
}

/// Runs each timer as a tokio interval task that sends its [`TimerKind`]
/// down a channel on every tick.
///
/// Must be used from inside a tokio runtime. Dropping the scheduler aborts
/// every task it started.
pub struct TokioScheduler {
    ticks: mpsc::UnboundedSender<TimerKind>,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerKind>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            ticks: tx,
            tasks: HashMap::new(),
            next_id: 0,
        };
        (scheduler, rx)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, kind: TimerKind, period: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let tx = self.ticks.clone();
        let task = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(kind).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(handle, task);
        handle
    }

    // Ticks already in the channel are not recalled.
    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
