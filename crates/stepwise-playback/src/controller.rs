//! Playback state machine.
//!
//! This module defines the [`PlaybackController`], which owns a recorded
//! [`Trace`] and the position within it. It never inspects snapshots; the
//! same controller plays every algorithm.
//!
//! This is a pure state machine: operations mutate the position and return
//! [`PlaybackAction`]s for the caller to execute. Time enters only through
//! the [`Scheduler`] it is generic over, so tests drive it with a virtual
//! clock and production drives it with tokio timers.
//!
//! # Timer discipline
//!
//! At most one timer is pending at any moment. Every schedule goes through
//! `arm()`, which cancels the held handle before asking for a new one, and
//! every transition out of `Playing` cancels before doing anything else.
//! Fires carrying any handle other than the held one are dropped.

use std::fmt;

use stepwise_core::{Scheduler, Snapshot, Trace, TraceError, TraceSource};

use crate::{PlaybackAction, PlaybackCommand, PlaybackConfig, Speed};

/// Derived playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    /// Not autoplaying. May sit at any index but the last.
    Idle,
    /// Autoplay timer armed.
    Playing,
    /// At the last index. Only a reset or a seek leaves this state.
    Finished,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "paused",
            Self::Playing => "playing",
            Self::Finished => "finished",
        })
    }
}

/// Position readout. Displays as `Step 4 of 17` (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Zero-based snapshot index.
    pub index: usize,
    /// Number of snapshots in the trace.
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}", self.index + 1, self.total)
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    /// Name of the recorded algorithm.
    pub name: &'a str,
    /// Snapshot at the current index.
    pub snapshot: &'a Snapshot,
    /// Current position.
    pub progress: Progress,
    /// Current state.
    pub state: PlaybackState,
    /// Current speed.
    pub speed: Speed,
}

/// Playback controller over one trace source.
///
/// Owns the trace, the current index, the play flag and the speed; nothing
/// else may change them. Dropping the controller cancels its pending timer.
pub struct PlaybackController<S: Scheduler> {
    source: Box<dyn TraceSource + Send>,
    trace: Trace,
    index: usize,
    playing: bool,
    speed: Speed,
    config: PlaybackConfig,
    scheduler: S,
    /// The only timer this controller may have outstanding.
    pending: Option<S::Handle>,
}

impl<S: Scheduler> PlaybackController<S> {
    /// Build the trace and bind it at index 0.
    ///
    /// # Errors
    ///
    /// Whatever the source's `build()` reports.
    pub fn new(
        source: impl TraceSource + Send + 'static,
        scheduler: S,
        config: PlaybackConfig,
    ) -> Result<Self, TraceError> {
        let trace = source.build()?;
        tracing::debug!(trace = trace.name(), len = trace.len(), "trace bound");

        Ok(Self {
            source: Box::new(source),
            trace,
            index: 0,
            playing: false,
            speed: config.initial_speed,
            config,
            scheduler,
            pending: None,
        })
    }

    /// Dispatch a command.
    ///
    /// # Errors
    ///
    /// Only `Reset`, when the rebuild fails.
    pub fn handle(&mut self, command: PlaybackCommand) -> Result<Vec<PlaybackAction>, TraceError> {
        let actions = match command {
            PlaybackCommand::StepForward => self.step_forward(),
            PlaybackCommand::TogglePlay => self.toggle_play(),
            PlaybackCommand::Reset => self.reset()?,
            PlaybackCommand::SkipForward => self.skip_forward(),
            PlaybackCommand::SetSpeed(speed) => self.set_speed(speed),
            PlaybackCommand::Seek(index) => self.seek(index),
            PlaybackCommand::Quit => {
                self.shutdown();
                vec![PlaybackAction::Quit]
            },
        };
        Ok(actions)
    }

    /// Advance one snapshot.
    ///
    /// No-op at the last index. Reaching the last index cancels the timer;
    /// otherwise a playing controller restarts its tick countdown.
    pub fn step_forward(&mut self) -> Vec<PlaybackAction> {
        if self.is_at_end() {
            tracing::debug!(index = self.index, "step ignored at last index");
            return vec![];
        }

        self.index += 1;
        if self.is_at_end() {
            return self.finish();
        }

        if self.playing {
            self.arm();
        }
        vec![PlaybackAction::Render]
    }

    /// Idle → Playing, Playing → Idle. No-op when finished.
    pub fn toggle_play(&mut self) -> Vec<PlaybackAction> {
        match self.state() {
            PlaybackState::Finished => {
                tracing::debug!("play ignored: trace finished, reset first");
                vec![]
            },
            PlaybackState::Playing => {
                self.disarm();
                self.playing = false;
                tracing::debug!(index = self.index, "paused");
                vec![PlaybackAction::Render]
            },
            PlaybackState::Idle => {
                self.playing = true;
                self.arm();
                tracing::debug!(index = self.index, speed = %self.speed, "playing");
                vec![PlaybackAction::Render]
            },
        }
    }

    /// Cancel the timer, rebuild the trace from its source and return to an
    /// idle controller at index 0.
    ///
    /// # Errors
    ///
    /// Whatever the source's `build()` reports. The timer is already
    /// cancelled and the previous trace stays bound at index 0.
    pub fn reset(&mut self) -> Result<Vec<PlaybackAction>, TraceError> {
        self.disarm();
        self.playing = false;
        self.index = 0;

        self.trace = self.source.build()?;
        tracing::debug!(trace = self.trace.name(), len = self.trace.len(), "trace rebuilt");

        if self.is_at_end() {
            return Ok(vec![PlaybackAction::Render, PlaybackAction::Finished]);
        }
        Ok(vec![PlaybackAction::Render])
    }

    /// Change the speed used by the next scheduled tick.
    ///
    /// A tick already in flight keeps the interval it was scheduled with.
    pub fn set_speed(&mut self, speed: Speed) -> Vec<PlaybackAction> {
        if self.speed == speed {
            return vec![];
        }
        tracing::debug!(from = %self.speed, to = %speed, "speed changed");
        self.speed = speed;
        vec![PlaybackAction::Render]
    }

    /// Jump to `index` without changing the play flag.
    ///
    /// Out-of-range and same-index seeks are ignored. Landing on the last
    /// index finishes playback; leaving it returns to Idle.
    pub fn seek(&mut self, index: usize) -> Vec<PlaybackAction> {
        if index >= self.trace.len() {
            tracing::debug!(index, len = self.trace.len(), "seek out of range ignored");
            return vec![];
        }
        if index == self.index {
            return vec![];
        }

        self.index = index;
        if self.is_at_end() {
            return self.finish();
        }
        vec![PlaybackAction::Render]
    }

    /// Seek to the next index.
    pub fn skip_forward(&mut self) -> Vec<PlaybackAction> {
        self.seek(self.index + 1)
    }

    /// Timer callback: one step, then re-arm while still playing.
    ///
    /// A `handle` that is not the pending one is stale (it was cancelled, or
    /// raced its cancellation) and is dropped.
    pub fn on_timer(&mut self, handle: S::Handle) -> Vec<PlaybackAction> {
        if self.pending != Some(handle) {
            tracing::warn!(?handle, pending = ?self.pending, "stale timer fire ignored");
            return vec![];
        }
        self.pending = None;

        self.step_forward()
    }

    /// Cancel the pending timer and stop autoplay.
    ///
    /// Also runs on drop.
    pub fn shutdown(&mut self) {
        self.disarm();
        self.playing = false;
    }

    /// Current state, derived from the index and the play flag.
    pub fn state(&self) -> PlaybackState {
        if self.is_at_end() {
            PlaybackState::Finished
        } else if self.playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Idle
        }
    }

    /// Whether autoplay is running.
    pub fn is_playing(&self) -> bool {
        self.state() == PlaybackState::Playing
    }

    /// Current index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Snapshot at the current index.
    pub fn current(&self) -> &Snapshot {
        // index < len is maintained by every mutation
        &self.trace.frames()[self.index]
    }

    /// Current position.
    pub fn progress(&self) -> Progress {
        Progress { index: self.index, total: self.trace.len() }
    }

    /// Current speed.
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Bound trace.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Handle of the outstanding timer. `None` if no timer is armed.
    pub fn pending_timer(&self) -> Option<S::Handle> {
        self.pending
    }

    /// Underlying scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Underlying scheduler, mutably. Tests use this to advance virtual time.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Render view of the current position.
    pub fn view(&self) -> View<'_> {
        View {
            name: self.trace.name(),
            snapshot: self.current(),
            progress: self.progress(),
            state: self.state(),
            speed: self.speed,
        }
    }

    fn is_at_end(&self) -> bool {
        self.index == self.trace.last_index()
    }

    /// Enter Finished: timer first, then the flag.
    fn finish(&mut self) -> Vec<PlaybackAction> {
        self.disarm();
        self.playing = false;
        tracing::debug!(trace = self.trace.name(), index = self.index, "finished");
        vec![PlaybackAction::Render, PlaybackAction::Finished]
    }

    /// The only path that schedules.
    fn arm(&mut self) {
        self.disarm();
        let after = self.config.interval(self.speed);
        let handle = self.scheduler.schedule(after);
        tracing::trace!(?handle, ?after, "timer armed");
        self.pending = Some(handle);
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
            tracing::trace!(?handle, "timer cancelled");
        }
    }
}

impl<S: Scheduler> Drop for PlaybackController<S> {
    fn drop(&mut self) {
        self.disarm();
    }
}

impl<S: Scheduler + fmt::Debug> fmt::Debug for PlaybackController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("trace", &self.trace.name())
            .field("index", &self.index)
            .field("state", &self.state())
            .field("speed", &self.speed)
            .field("pending", &self.pending)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}
