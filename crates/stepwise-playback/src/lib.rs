//! Playback layer for recorded algorithm traces.
//!
//! A pure state machine plus a generic runtime, so the same controller code
//! runs under a virtual clock in tests and under tokio in production.
//!
//! # Components
//!
//! - [`PlaybackController`]: index, play flag and speed over one trace
//! - [`PlaybackConfig`]: speed-to-interval mapping
//! - [`TokioScheduler`]: fire-once timers as spawned tasks
//! - [`Driver`]: trait for input and rendering
//! - [`Runtime`]: event loop joining controller, timers and driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod command;
mod config;
mod controller;
mod driver;
mod input;
mod runtime;
mod timer;

pub use action::PlaybackAction;
pub use command::PlaybackCommand;
pub use config::{
    DEFAULT_FAST_INTERVAL, DEFAULT_MEDIUM_INTERVAL, DEFAULT_SLOW_INTERVAL, ParseSpeedError,
    PlaybackConfig, Speed,
};
pub use controller::{PlaybackController, PlaybackState, Progress, View};
pub use driver::Driver;
pub use input::{ParseCommandError, parse_command};
pub use runtime::{Runtime, RuntimeError};
pub use timer::{FiredTimers, TimerId, TokioScheduler};
