//! Timer abstraction for deterministic testing.
//!
//! Decouples playback logic from the clock. Production code schedules real
//! tokio timers; tests schedule against a virtual clock and inspect every
//! schedule/cancel call.

use std::{fmt, time::Duration};

/// Fire-once, cancellable timer source.
///
/// A scheduled timer fires at most once. How a fired handle is delivered back
/// to its owner is up to the implementation (a channel, a test loop); the
/// owner compares the delivered handle against the one it holds.
///
/// # Invariants
///
/// Implementations MUST guarantee:
///
/// - Handles returned by `schedule()` are unique for the scheduler's lifetime
/// - After `cancel(h)` returns, `h` is never delivered as fired
/// - Cancelling a handle that already fired or was already cancelled is a
///   no-op
pub trait Scheduler {
    /// Opaque identifier of one scheduled timer.
    type Handle: Copy + Eq + fmt::Debug;

    /// Schedules a timer that fires once after `after` has elapsed.
    fn schedule(&mut self, after: Duration) -> Self::Handle;

    /// Cancels a pending timer.
    fn cancel(&mut self, handle: Self::Handle);
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    type Handle = S::Handle;

    fn schedule(&mut self, after: Duration) -> Self::Handle {
        (**self).schedule(after)
    }

    fn cancel(&mut self, handle: Self::Handle) {
        (**self).cancel(handle);
    }
}
