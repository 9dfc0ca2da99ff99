//! Single-slot timer driving the simulation and the countdowns
//!
//! At most one repeating timer is active. Starting a timer replaces whatever
//! ran before; cancelling is immediate. Time is passed in by the caller, so
//! the scheduler itself never sleeps or reads the clock.

use std::time::{Duration, Instant};

/// Beyond this many overdue periods the timer skips ahead instead of catching up
pub const MAX_CATCH_UP: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Simulation step
    Tick,
    /// One countdown step of the round sequencer
    Countdown,
}

#[derive(Debug, Clone, Copy)]
struct ActiveTimer {
    kind: TimerKind,
    period: Duration,
    next_due: Instant,
}

#[derive(Debug)]
pub struct Scheduler {
    tick_period: Duration,
    countdown_period: Duration,
    active: Option<ActiveTimer>,
}

impl Scheduler {
    pub fn new(tick_period: Duration, countdown_period: Duration) -> Self {
        Self {
            tick_period,
            countdown_period,
            active: None,
        }
    }

    /// Start a repeating timer whose first fire is one period after `at`
    pub fn start(&mut self, kind: TimerKind, at: Instant) {
        let period = self.period(kind);
        self.active = Some(ActiveTimer {
            kind,
            period,
            next_due: at + period,
        });
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<TimerKind> {
        self.active.map(|t| t.kind)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.map(|t| t.next_due)
    }

    /// Take the next fire that is due by `now`.
    ///
    /// Returns the timer kind and the instant the fire was scheduled for.
    /// Call repeatedly until it returns `None`; each call yields one period.
    pub fn poll(&mut self, now: Instant) -> Option<(TimerKind, Instant)> {
        let timer = self.active.as_mut()?;
        if timer.next_due > now {
            return None;
        }

        if now.duration_since(timer.next_due) > timer.period * MAX_CATCH_UP {
            tracing::debug!(kind = ?timer.kind, "timer fell behind, skipping ahead");
            timer.next_due = now;
        }

        let due = timer.next_due;
        timer.next_due = due + timer.period;
        Some((timer.kind, due))
    }

    fn period(&self, kind: TimerKind) -> Duration {
        match kind {
            TimerKind::Tick => self.tick_period,
            TimerKind::Countdown => self.countdown_period,
        }
    }
}
