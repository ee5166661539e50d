//! Drive a controller through virtual time.
//!
//! Each due timer is delivered at its own deadline, so a re-armed tick is
//! scheduled relative to the moment its predecessor fired, exactly as with
//! real timers.

use std::time::Duration;

use stepwise_playback::{PlaybackAction, PlaybackController, PlaybackState};

use crate::{ManualScheduler, TimerOp, Violation};

/// Controller under virtual time.
pub type VirtualController = PlaybackController<ManualScheduler>;

/// Advance virtual time by `duration`, delivering every timer that comes due.
///
/// Returns the actions produced by the fires, in order.
pub fn run_for(controller: &mut VirtualController, duration: Duration) -> Vec<PlaybackAction> {
    let until = controller.scheduler().now() + duration;
    let mut actions = Vec::new();

    while let Some(handle) = controller.scheduler_mut().fire_next(until) {
        actions.extend(controller.on_timer(handle));
    }
    controller.scheduler_mut().advance_to(until);

    actions
}

/// Deliver timers until the controller stops playing or `limit` of virtual
/// time has passed. Returns the elapsed virtual time.
pub fn run_to_end(controller: &mut VirtualController, limit: Duration) -> Duration {
    let start = controller.scheduler().now();
    let until = start + limit;

    while controller.is_playing() {
        let Some(handle) = controller.scheduler_mut().fire_next(until) else { break };
        controller.on_timer(handle);
    }

    controller.scheduler().now() - start
}

/// Check playback-state consistency against the scheduler's view.
///
/// - the index is within the trace
/// - at most one timer is pending, and it is the controller's
/// - a timer is pending exactly while the controller is playing
/// - no schedule was issued while another timer was pending
pub fn check_controller(controller: &VirtualController) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();
    let mut fail = |invariant: &'static str, message: String| {
        violations.push(Violation { invariant, step: Some(controller.index()), message });
    };

    let len = controller.trace().len();
    if controller.index() >= len {
        fail("index-bounds", format!("index {} outside trace of {len}", controller.index()));
    }

    let scheduler = controller.scheduler();
    let pending: Vec<_> = scheduler.pending().map(|(handle, _)| handle).collect();
    if pending.len() > 1 {
        fail("single-timer", format!("{} timers pending: {pending:?}", pending.len()));
    }
    if pending.first().copied() != controller.pending_timer() {
        fail(
            "single-timer",
            format!("controller holds {:?}, scheduler has {pending:?}", controller.pending_timer()),
        );
    }

    let playing = controller.state() == PlaybackState::Playing;
    if playing != controller.pending_timer().is_some() {
        fail(
            "timer-iff-playing",
            format!("state {} with pending {:?}", controller.state(), controller.pending_timer()),
        );
    }

    for op in scheduler.log() {
        if let TimerOp::Schedule { handle, pending_before, .. } = *op
            && pending_before > 0
        {
            fail("cancel-before-schedule", format!("{handle} scheduled over {pending_before} pending"));
        }
    }

    if violations.is_empty() { Ok(()) } else { Err(violations) }
}
