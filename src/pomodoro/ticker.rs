//! One-second periodic schedule.
//!
//! The ticker is a deadline, not a thread. The owning event loop asks it
//! which ticks are due and runs them to completion one at a time.

use std::time::{Duration, Instant};

/// Default tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A cancellable periodic deadline.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Ticker {
    /// Create a stopped ticker with the given period.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Start ticking, first tick one period after `now`.
    ///
    /// Any existing schedule is replaced, so there is never more than one
    /// tick stream.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Cancel the schedule.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Whether a schedule is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Consume one due tick, if any, advancing the deadline by a period.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(due + self.period);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, or `None` when stopped.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
