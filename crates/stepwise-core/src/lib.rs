//! Core types for recording and replaying algorithm executions.
//!
//! An instrumented algorithm produces a [`Trace`]: an ordered, immutable
//! sequence of [`Snapshot`]s, one per observable event. Playback code indexes
//! into a trace and never re-runs the algorithm.
//!
//! # Components
//!
//! - [`snapshot`]: the data contract a renderer consumes
//! - [`trace`]: the immutable, shared snapshot sequence
//! - [`sched`]: fire-once timer abstraction used by autoplay
//! - [`error`]: construction-time defects in fixed inputs

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod sched;
pub mod snapshot;
pub mod trace;

pub use error::TraceError;
pub use sched::Scheduler;
pub use snapshot::{
    ArraySnapshot, Auxiliary, EdgeState, EdgeTag, Element, ElementTag, Family, GraphSnapshot,
    NodeId, NodeState, NodeTag, Snapshot,
};
pub use trace::{Trace, TraceSource};
