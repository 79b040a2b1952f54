use std::time::Duration;

use chrono::{DateTime, FixedOffset};

use crate::scheduler::{Scheduler, TimerHandle, TimerKind};

/// Break reminder state: the check timer and when we last reminded.
#[derive(Debug)]
pub(crate) struct BreakReminder {
    timer: Option<TimerHandle>,
    last_notification: Option<DateTime<FixedOffset>>,
    check_every: Duration,
    break_interval: chrono::Duration,
}

impl BreakReminder {
    pub(crate) fn new(check_every: Duration, break_interval: chrono::Duration) -> Self {
        Self {
            timer: None,
            last_notification: None,
            check_every,
            break_interval,
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub(crate) fn last_notification(&self) -> Option<DateTime<FixedOffset>> {
        self.last_notification
    }

    /// Returns false if a check timer was already running.
    pub(crate) fn start(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        if self.timer.is_some() {
            return false;
        }
        self.timer = Some(scheduler.schedule_repeating(TimerKind::BreakCheck, self.check_every));
        true
    }

    /// Returns false if nothing was running.
    pub(crate) fn stop(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        match self.timer.take() {
            Some(handle) => {
                scheduler.cancel(handle);
                true
            }
            None => false,
        }
    }

    /// Whether a reminder is due at `now`. Marks it as sent when it is,
    /// whether or not the host ends up displaying it.
    pub(crate) fn take_due(&mut self, now: DateTime<FixedOffset>) -> bool {
        let due = match self.last_notification {
            None => true,
            Some(last) => now - last >= self.break_interval,
        };
        if due {
            self.last_notification = Some(now);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, 10, minute, 0)
            .unwrap()
    }

    #[test]
    fn first_check_is_due_then_every_interval() {
        let mut reminder = BreakReminder::new(Duration::from_secs(60), chrono::Duration::minutes(20));
        assert!(reminder.take_due(at(0)));
        assert!(!reminder.take_due(at(1)));
        assert!(!reminder.take_due(at(19)));
        assert!(reminder.take_due(at(20)));
        assert_eq!(reminder.last_notification(), Some(at(20)));
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut scheduler = ManualScheduler::new();
        let shared = scheduler.clone();
        let mut reminder = BreakReminder::new(Duration::from_secs(60), chrono::Duration::minutes(20));

        assert!(reminder.start(&mut scheduler));
        assert!(!reminder.start(&mut scheduler));
        assert_eq!(shared.active_count(TimerKind::BreakCheck), 1);
        assert_eq!(shared.scheduled_count(TimerKind::BreakCheck), 1);

        assert!(reminder.stop(&mut scheduler));
        assert!(!reminder.stop(&mut scheduler));
        assert_eq!(shared.active_count(TimerKind::BreakCheck), 0);
    }
}
