// Copyright 2025 the Touchlist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deterministic, manually advanced [`TimerService`].
//!
//! Useful for tests and for hosts that already own a frame clock: advance the
//! clock, then hand every due id to
//! [`GestureTracker::fire`](crate::tracker::GestureTracker::fire).
//!
//! ```
//! use touchlist_gesture::host::TimerService;
//! use touchlist_gesture::timer::ManualClock;
//!
//! let mut clock = ManualClock::new();
//! let a = clock.schedule(50);
//! let b = clock.schedule(20);
//! assert_eq!(clock.advance(30), vec![b]);
//! clock.cancel(a);
//! assert!(clock.advance(100).is_empty());
//! assert_eq!(clock.now(), 130);
//! ```

use alloc::vec::Vec;

use crate::host::TimerService;
use crate::types::TimerId;

/// Fake clock with millisecond resolution.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: u64,
    next_id: u64,
    // (deadline, id), unordered.
    pending: Vec<(u64, TimerId)>,
}

impl ManualClock {
    /// Create a clock at time zero with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed since creation.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of live timers.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Whether `id` is still scheduled.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|&(_, t)| t == id)
    }

    /// Advance by `ms` and return the ids that came due, earliest deadline
    /// first (ties in scheduling order).
    pub fn advance(&mut self, ms: u64) -> Vec<TimerId> {
        self.now = self.now.saturating_add(ms);
        let now = self.now;
        let mut due: Vec<(u64, TimerId)> = Vec::new();
        self.pending.retain(|&entry| {
            if entry.0 <= now {
                due.push(entry);
                false
            } else {
                true
            }
        });
        due.sort();
        due.into_iter().map(|(_, id)| id).collect()
    }
}

impl TimerService for ManualClock {
    fn schedule(&mut self, delay_ms: u32) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending
            .push((self.now.saturating_add(u64::from(delay_ms)), id));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|&(_, t)| t != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn fires_at_deadline_not_before() {
        let mut c = ManualClock::new();
        let id = c.schedule(50);
        assert!(c.advance(49).is_empty());
        assert!(c.is_pending(id));
        assert_eq!(c.advance(1), vec![id]);
        assert_eq!(c.pending(), 0);
    }

    #[test]
    fn due_timers_come_out_in_deadline_order() {
        let mut c = ManualClock::new();
        let late = c.schedule(300);
        let early = c.schedule(50);
        let tie = c.schedule(50);
        assert_eq!(c.advance(1000), vec![early, tie, late]);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut c = ManualClock::new();
        let id = c.schedule(10);
        c.cancel(id);
        c.cancel(id);
        c.cancel(TimerId(999));
        assert!(c.advance(10).is_empty());
    }

    #[test]
    fn scheduling_at_the_end_of_time_saturates() {
        let mut c = ManualClock::new();
        assert!(c.advance(u64::MAX).is_empty());
        let id = c.schedule(50);
        assert_eq!(c.now(), u64::MAX);
        assert_eq!(c.advance(0), vec![id]);
    }

    #[test]
    fn ids_are_unique_across_reuse() {
        let mut c = ManualClock::new();
        let a = c.schedule(0);
        assert_eq!(c.advance(0), vec![a]);
        let b = c.schedule(0);
        assert_ne!(a, b);
    }
}
