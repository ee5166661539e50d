//! Control-bar intents.
//!
//! This module defines the [`PlaybackCommand`] enum: everything a user (or a
//! driver acting for one) can ask of a [`crate::PlaybackController`]. Timer
//! fires are not commands; they carry a scheduler handle and go through
//! [`crate::PlaybackController::on_timer`].

use crate::Speed;

/// User-facing playback operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    /// Advance one snapshot.
    StepForward,

    /// Start or pause autoplay.
    TogglePlay,

    /// Rebuild the trace and return to the first snapshot.
    Reset,

    /// Advance one snapshot without touching the autoplay timer.
    SkipForward,

    /// Change the autoplay speed.
    SetSpeed(Speed),

    /// Jump to a snapshot index.
    Seek(usize),

    /// Stop playback and leave.
    Quit,
}
