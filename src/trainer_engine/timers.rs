//! Cooperative one-shot timers for visual sequencing.
//!
//! Time is logical: the front end advances it, and nothing fires on its own.
//! A slot holds at most one pending deadline, so rescheduling supersedes the
//! previous one instead of stacking.

use std::time::Duration;

/// A single cancellable deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerSlot {
    due: Option<Duration>,
}

impl TimerSlot {
    /// Arm the slot to fire `delay` after `now`. Returns `true` if a pending
    /// deadline was replaced.
    pub fn schedule(&mut self, now: Duration, delay: Duration) -> bool {
        self.due.replace(now.saturating_add(delay)).is_some()
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    pub fn due(&self) -> Option<Duration> {
        self.due
    }

    /// Disarm and report `true` once `now` has reached the deadline.
    pub fn fire_if_due(&mut self, now: Duration) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// Monotonic logical clock owned by the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogicalClock {
    now: Duration,
}

impl LogicalClock {
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn advance(&mut self, elapsed: Duration) -> Duration {
        self.now = self.now.saturating_add(elapsed);
        self.now
    }
}
