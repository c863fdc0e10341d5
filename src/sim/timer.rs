//! Per-level countdown, driven by its own one-second clock
//!
//! The countdown never advances from the frame loop. The platform arms a
//! one-second interval for whatever [`Countdown::active`] reports and feeds
//! each firing back through [`Countdown::on_second`] with the id it was armed
//! for. Every restart or resume issues a fresh id, so firings from an interval
//! that should already have been cancelled are recognised as stale and
//! dropped instead of stacking onto the new level.

use serde::{Deserialize, Serialize};

/// Identifies one armed run of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountdownId(u64);

impl CountdownId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Result of feeding one elapsed second into the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// The id no longer matches the armed run; nothing changed
    Stale,
    /// One second elapsed, time remains
    Running { remaining: u32 },
    /// Reached zero; the countdown disarmed itself
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum Status {
    Idle,
    Running(CountdownId),
    Suspended,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    limit: u32,
    remaining: u32,
    status: Status,
    /// Number of ids issued so far
    generation: u64,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            limit: 0,
            remaining: 0,
            status: Status::Idle,
            generation: 0,
        }
    }

    fn issue(&mut self) -> CountdownId {
        self.generation += 1;
        let id = CountdownId(self.generation);
        self.status = Status::Running(id);
        id
    }

    /// Cancel any previous run and count down from `limit` seconds
    pub fn restart(&mut self, limit: u32) -> CountdownId {
        self.limit = limit;
        self.remaining = limit;
        self.issue()
    }

    /// Disarm; the remaining time is kept for display
    pub fn cancel(&mut self) {
        self.status = Status::Idle;
    }

    /// Stop counting without losing the remaining time
    pub fn suspend(&mut self) {
        if matches!(self.status, Status::Running(_)) {
            self.status = Status::Suspended;
        }
    }

    /// Continue a suspended run from where it stopped
    pub fn resume(&mut self) -> Option<CountdownId> {
        if self.status == Status::Suspended {
            Some(self.issue())
        } else {
            None
        }
    }

    /// One wall-clock second elapsed for run `id`
    pub fn on_second(&mut self, id: CountdownId) -> CountdownTick {
        if self.status != Status::Running(id) {
            return CountdownTick::Stale;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.status = Status::Idle;
            CountdownTick::Expired
        } else {
            CountdownTick::Running {
                remaining: self.remaining,
            }
        }
    }

    /// The run the platform clock should currently be armed for
    pub fn active(&self) -> Option<CountdownId> {
        match self.status {
            Status::Running(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.status == Status::Suspended
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_and_expires_once() {
        let mut c = Countdown::new();
        let id = c.restart(3);
        assert_eq!(c.on_second(id), CountdownTick::Running { remaining: 2 });
        assert_eq!(c.on_second(id), CountdownTick::Running { remaining: 1 });
        assert_eq!(c.on_second(id), CountdownTick::Expired);
        assert_eq!(c.active(), None);
        assert_eq!(c.on_second(id), CountdownTick::Stale);
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn test_restart_invalidates_previous_run() {
        let mut c = Countdown::new();
        let old = c.restart(15);
        c.on_second(old);
        let new = c.restart(15);
        assert_ne!(old, new);
        assert_eq!(c.on_second(old), CountdownTick::Stale);
        assert_eq!(c.remaining(), 15);
        assert_eq!(c.generation(), 2);
    }

    #[test]
    fn test_suspend_and_resume_keep_remaining() {
        let mut c = Countdown::new();
        let id = c.restart(15);
        c.on_second(id);
        c.on_second(id);
        c.suspend();
        assert!(c.is_suspended());
        assert_eq!(c.active(), None);
        assert_eq!(c.on_second(id), CountdownTick::Stale);
        assert_eq!(c.remaining(), 13);

        let resumed = c.resume().unwrap();
        assert_eq!(c.remaining(), 13);
        assert_eq!(c.on_second(resumed), CountdownTick::Running { remaining: 12 });
    }

    #[test]
    fn test_resume_without_suspend_is_noop() {
        let mut c = Countdown::new();
        assert_eq!(c.resume(), None);
        let id = c.restart(5);
        assert_eq!(c.resume(), None);
        assert_eq!(c.active(), Some(id));
    }
}
