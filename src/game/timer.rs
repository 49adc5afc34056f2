//! Turn clock.
//!
//! `Countdown` is the per-turn seconds counter owned by the game.
//! `TickScheduler` is the driver side: it holds at most one pending
//! one-second deadline, and arming it replaces whatever was pending, so a
//! tick scheduled against an older state can never fire.

use std::time::{Duration, Instant};

/// Default seconds allowed per turn.
pub const TURN_SECONDS: u32 = 10;

/// Default wall-clock interval between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Seconds remaining for the active turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    turn_seconds: u32,
}

impl Countdown {
    /// Creates a full countdown. A turn length of zero is raised to one.
    pub fn new(turn_seconds: u32) -> Self {
        let turn_seconds = turn_seconds.max(1);
        Countdown {
            remaining: turn_seconds,
            turn_seconds,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn turn_seconds(&self) -> u32 {
        self.turn_seconds
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Refills the countdown to the full turn length.
    pub fn restart(&mut self) {
        self.remaining = self.turn_seconds;
    }

    /// Changes the turn length. Takes effect at the next restart.
    pub fn set_turn_seconds(&mut self, turn_seconds: u32) {
        self.turn_seconds = turn_seconds.max(1);
    }

    /// Removes one second and returns what is left. Stays at zero once expired.
    pub fn decrement(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Countdown::new(TURN_SECONDS)
    }
}

/// Holds the single pending tick deadline of a driver loop.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    deadline: Option<Instant>,
    generation: u64,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        TickScheduler {
            interval,
            deadline: None,
            generation: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Cancels any pending tick and arms a fresh one `interval` after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
        self.generation += 1;
    }

    /// Drops the pending tick, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// How many times a tick has been armed. Each arm supersedes the last.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time left until the pending tick, zero if overdue, `None` if nothing is armed.
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Consumes the pending tick if it is due. Returns true exactly once per arm.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        TickScheduler::new(TICK_INTERVAL)
    }
}
