//! Deterministic test harness for trace recording and playback.
//!
//! # Virtual Time
//!
//! [`ManualScheduler`] implements the timer abstraction against a clock that
//! only moves when a test says so, and logs every schedule, cancel and fire.
//! [`drive`] helpers advance that clock through a controller, delivering each
//! due timer at its own deadline.
//!
//! # Invariant Testing
//!
//! The `invariants` module checks properties every recorded trace must have,
//! regardless of algorithm. Use [`InvariantRegistry::standard()`] for the
//! structural set, and [`check_controller`] for playback-state consistency.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod drive;
pub mod invariants;
pub mod manual_scheduler;

pub use drive::{VirtualController, check_controller, run_for, run_to_end};
pub use invariants::{
    DistinctSteps, Invariant, InvariantRegistry, InvariantResult, OrderMonotonicity,
    SingleActiveEdge, SortedMonotonicity, StableShape, TerminalResolved, UniformFamily, Violation,
};
pub use manual_scheduler::{ManualScheduler, TimerHandle, TimerOp};
