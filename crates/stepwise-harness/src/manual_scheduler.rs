//! Virtual-time [`Scheduler`].
//!
//! `ManualScheduler` provides the same interface as the tokio scheduler but
//! never fires on its own. Tests move its clock explicitly and receive the
//! handles that came due, in deadline order.

use std::{collections::BTreeMap, fmt, time::Duration};

use stepwise_core::Scheduler;

/// Handle of one virtual timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vtimer#{}", self.0)
    }
}

/// One entry of the scheduler's operation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOp {
    /// A timer was scheduled.
    Schedule {
        /// New handle.
        handle: TimerHandle,
        /// Virtual time of the call.
        at: Duration,
        /// Virtual time it will fire.
        deadline: Duration,
        /// Timers already pending when the call was made.
        pending_before: usize,
    },
    /// A timer was cancelled.
    Cancel {
        /// Cancelled handle.
        handle: TimerHandle,
        /// Virtual time of the call.
        at: Duration,
        /// Whether the handle was still pending.
        was_pending: bool,
    },
    /// A timer came due and was handed out.
    Fire {
        /// Fired handle.
        handle: TimerHandle,
        /// Virtual time it fired.
        at: Duration,
    },
}

/// Scheduler driven by an explicit virtual clock.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next: u64,
    /// Pending timers by handle.
    pending: BTreeMap<TimerHandle, Duration>,
    log: Vec<TimerOp>,
    max_pending: usize,
}

impl ManualScheduler {
    /// Create a scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers scheduled and neither fired nor cancelled.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pending handles with their deadlines, by handle.
    pub fn pending(&self) -> impl Iterator<Item = (TimerHandle, Duration)> + '_ {
        self.pending.iter().map(|(&h, &d)| (h, d))
    }

    /// Largest number of timers ever pending at once.
    pub fn max_pending(&self) -> usize {
        self.max_pending
    }

    /// Every operation so far, in call order.
    pub fn log(&self) -> &[TimerOp] {
        &self.log
    }

    /// Number of `schedule()` calls so far.
    pub fn schedule_count(&self) -> usize {
        self.log.iter().filter(|op| matches!(op, TimerOp::Schedule { .. })).count()
    }

    /// Earliest pending deadline. `None` if nothing is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.values().min().copied()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline. Ties fire in handle order.
    ///
    /// Returns `None` and leaves the clock alone if nothing is due.
    pub fn fire_next(&mut self, until: Duration) -> Option<TimerHandle> {
        let (&handle, &deadline) = self
            .pending
            .iter()
            .filter(|&(_, &deadline)| deadline <= until)
            .min_by_key(|&(&handle, &deadline)| (deadline, handle))?;

        self.pending.remove(&handle);
        self.now = self.now.max(deadline);
        self.log.push(TimerOp::Fire { handle, at: self.now });
        tracing::trace!(%handle, at = ?self.now, "virtual timer fired");
        Some(handle)
    }

    /// Move the clock forward to `until` without firing anything.
    ///
    /// Moving backwards is ignored.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TimerHandle;

    fn schedule(&mut self, after: Duration) -> TimerHandle {
        self.next += 1;
        let handle = TimerHandle(self.next);
        let deadline = self.now + after;

        self.log.push(TimerOp::Schedule {
            handle,
            at: self.now,
            deadline,
            pending_before: self.pending.len(),
        });
        self.pending.insert(handle, deadline);
        self.max_pending = self.max_pending.max(self.pending.len());
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let was_pending = self.pending.remove(&handle).is_some();
        self.log.push(TimerOp::Cancel { handle, at: self.now, was_pending });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn fires_in_deadline_order() {
        let mut s = ManualScheduler::new();
        let late = s.schedule(300 * MS);
        let early = s.schedule(100 * MS);

        assert_eq!(s.fire_next(1000 * MS), Some(early));
        assert_eq!(s.now(), 100 * MS);
        assert_eq!(s.fire_next(1000 * MS), Some(late));
        assert_eq!(s.fire_next(1000 * MS), None);
        assert_eq!(s.max_pending(), 2);
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let mut s = ManualScheduler::new();
        s.schedule(500 * MS);

        assert_eq!(s.fire_next(499 * MS), None);
        assert_eq!(s.now(), Duration::ZERO);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut s = ManualScheduler::new();
        let h = s.schedule(100 * MS);
        s.cancel(h);
        s.cancel(h);

        assert_eq!(s.fire_next(Duration::from_secs(10)), None);
        assert_eq!(s.log()[1], TimerOp::Cancel { handle: h, at: Duration::ZERO, was_pending: true });
        assert_eq!(s.log()[2], TimerOp::Cancel { handle: h, at: Duration::ZERO, was_pending: false });
    }

    #[test]
    fn deadlines_are_relative_to_now() {
        let mut s = ManualScheduler::new();
        s.advance_to(250 * MS);
        s.schedule(100 * MS);

        assert_eq!(s.next_deadline(), Some(350 * MS));
    }
}
