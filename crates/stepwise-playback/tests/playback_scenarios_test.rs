//! Timer-discipline scenarios under virtual time.
//!
//! # Oracle Pattern
//!
//! Every test ends with [`check_controller`], which cross-checks the
//! controller's view of its timer against the scheduler's log.

use std::time::Duration;

use stepwise_harness::{ManualScheduler, TimerOp, VirtualController, check_controller, run_for};
use stepwise_playback::{PlaybackAction, PlaybackConfig, PlaybackState, Speed};
use stepwise_trace::Visualizer;

const MS: Duration = Duration::from_millis(1);

fn bubble() -> VirtualController {
    VirtualController::new(Visualizer::BubbleSort, ManualScheduler::new(), PlaybackConfig::default())
        .unwrap()
}

fn assert_consistent(controller: &VirtualController) {
    if let Err(violations) = check_controller(controller) {
        let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
        panic!("{}", messages.join("\n"));
    }
}

#[test]
fn reset_mid_autoplay_cancels_pending_timer() {
    let mut c = bubble();
    c.toggle_play();
    run_for(&mut c, 1200 * MS);
    assert_eq!(c.index(), 2);

    let stale = c.pending_timer().unwrap();
    assert_eq!(c.reset().unwrap(), vec![PlaybackAction::Render]);

    assert_eq!(c.index(), 0);
    assert_eq!(c.state(), PlaybackState::Idle);
    assert_eq!(c.scheduler().pending_count(), 0);
    assert!(c.scheduler().log().contains(&TimerOp::Cancel {
        handle: stale,
        at: 1200 * MS,
        was_pending: true
    }));

    // nothing moves after waiting well past the interval
    assert!(run_for(&mut c, 5000 * MS).is_empty());
    assert_eq!(c.index(), 0);

    // a late delivery of the cancelled handle is ignored too
    assert!(c.on_timer(stale).is_empty());
    assert_eq!(c.index(), 0);
    assert_consistent(&c);
}

#[test]
fn speed_change_keeps_in_flight_tick() {
    let mut c = bubble();
    c.toggle_play();

    run_for(&mut c, 100 * MS);
    c.set_speed(Speed::Fast);

    // in-flight tick still fires at 500ms, exactly once
    run_for(&mut c, 399 * MS);
    assert_eq!(c.index(), 0);
    run_for(&mut c, MS);
    assert_eq!(c.index(), 1);

    // later ticks use 200ms
    run_for(&mut c, 199 * MS);
    assert_eq!(c.index(), 1);
    run_for(&mut c, MS);
    assert_eq!(c.index(), 2);

    let deadlines: Vec<_> = c
        .scheduler()
        .log()
        .iter()
        .filter_map(|op| match op {
            TimerOp::Schedule { deadline, .. } => Some(*deadline),
            _ => None,
        })
        .collect();
    assert_eq!(deadlines, vec![500 * MS, 700 * MS, 900 * MS]);
    assert_consistent(&c);
}

#[test]
fn autoplay_reaches_terminal_state_and_stops() {
    let mut c = bubble();
    let steps = c.trace().last_index();
    c.toggle_play();

    let actions = run_for(&mut c, Duration::from_secs(600));

    assert_eq!(c.index(), steps);
    assert_eq!(c.state(), PlaybackState::Finished);
    assert!(c.current().is_fully_resolved());
    assert_eq!(actions.iter().filter(|a| **a == PlaybackAction::Finished).count(), 1);
    assert_eq!(c.scheduler().schedule_count(), steps);
    assert_eq!(c.scheduler().max_pending(), 1);
    assert_consistent(&c);
}

#[test]
fn finished_trace_must_be_reset_before_playing() {
    let mut c = bubble();
    c.seek(c.trace().last_index());

    assert!(c.toggle_play().is_empty());
    assert_eq!(c.scheduler().schedule_count(), 0);

    c.reset().unwrap();
    c.toggle_play();
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_consistent(&c);
}

#[test]
fn shutdown_cancels_timer() {
    let mut c = bubble();
    c.toggle_play();
    let handle = c.pending_timer().unwrap();

    c.shutdown();
    assert_eq!(c.pending_timer(), None);
    assert!(matches!(
        c.scheduler().log().last(),
        Some(TimerOp::Cancel { handle: h, was_pending: true, .. }) if *h == handle
    ));
    assert_eq!(c.state(), PlaybackState::Idle);
}

#[test]
fn progress_readout() {
    let mut c = bubble();
    let total = c.trace().len();
    c.step_forward();
    c.step_forward();
    c.step_forward();

    assert_eq!(c.progress().to_string(), format!("Step 4 of {total}"));
    assert_eq!(c.view().name, "bubble-sort");
}
