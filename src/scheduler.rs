//! Fire-once timers on a virtual clock.
//!
//! Every suspension in the game is "run this action after that delay". The
//! [`Scheduler`] trait is that capability; [`TimerQueue`] implements it over a
//! clock the owner advances explicitly, so the shell drives it from an
//! `Instant` and tests drive it step by step. Timers cannot be cancelled.

use std::collections::BTreeMap;
use std::time::Duration;

/// Capability to schedule deferred actions.
pub trait Scheduler<A> {
    /// Current clock time.
    fn now(&self) -> Duration;

    /// Run `action` once `delay` has elapsed from [`Scheduler::now`].
    fn after(&mut self, delay: Duration, action: A);
}

/// Pending actions ordered by deadline, then by scheduling order.
#[derive(Debug, Clone)]
pub struct TimerQueue<A> {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<(Duration, u64), A>,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> TimerQueue<A> {
    /// Queue with the clock at zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Move the clock forward. Moving it backwards is ignored.
    pub fn set_time(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Remove and return the earliest timer that is due at the current time.
    pub fn pop_due(&mut self) -> Option<A> {
        let entry = self.pending.first_entry()?;
        if entry.key().0 > self.now {
            return None;
        }
        Some(entry.remove())
    }
}

impl<A> Scheduler<A> for TimerQueue<A> {
    fn now(&self) -> Duration {
        self.now
    }

    fn after(&mut self, delay: Duration, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((self.now + delay, seq), action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let mut timers = TimerQueue::new();
        timers.after(ms(100), "a");
        timers.set_time(ms(99));
        assert_eq!(timers.pop_due(), None);
        timers.set_time(ms(100));
        assert_eq!(timers.pop_due(), Some("a"));
        assert!(timers.is_empty());
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.after(ms(300), "late");
        timers.after(ms(100), "early");
        timers.after(ms(200), "middle");
        assert_eq!(timers.next_deadline(), Some(ms(100)));

        timers.set_time(ms(1000));
        let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due()).collect();
        assert_eq!(fired, ["early", "middle", "late"]);
    }

    #[test]
    fn equal_deadlines_fire_in_scheduling_order() {
        let mut timers = TimerQueue::new();
        timers.after(ms(50), 1);
        timers.after(ms(50), 2);
        timers.after(ms(50), 3);
        timers.set_time(ms(50));
        let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due()).collect();
        assert_eq!(fired, [1, 2, 3]);
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut timers = TimerQueue::new();
        timers.set_time(ms(500));
        timers.after(ms(100), ());
        assert_eq!(timers.next_deadline(), Some(ms(600)));
        assert_eq!(timers.now(), ms(500));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut timers: TimerQueue<()> = TimerQueue::new();
        timers.set_time(ms(200));
        timers.set_time(ms(100));
        assert_eq!(timers.now(), ms(200));
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let mut timers = TimerQueue::new();
        timers.after(Duration::ZERO, "now");
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.pop_due(), Some("now"));
    }
}
