//! Immutable snapshot sequences.
//!
//! A [`Trace`] is produced once per (algorithm, input) pair and never
//! mutated. Cloning is cheap: the snapshots live behind an `Arc`, so the
//! playback controller and a renderer can hold the same trace.

use std::{slice, sync::Arc};

use serde::Serialize;

use crate::{error::TraceError, snapshot::Snapshot};

/// Non-empty, ordered sequence of snapshots.
///
/// Index 0 is the untouched input; the last index is the terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trace {
    name: String,
    frames: Arc<[Snapshot]>,
}

impl Trace {
    /// Wrap recorded snapshots.
    ///
    /// # Errors
    ///
    /// - `TraceError::EmptyTrace` if `frames` is empty
    pub fn new(name: impl Into<String>, frames: Vec<Snapshot>) -> Result<Self, TraceError> {
        if frames.is_empty() {
            return Err(TraceError::EmptyTrace);
        }
        Ok(Self { name: name.into(), frames: frames.into() })
    }

    /// Name of the algorithm that produced this trace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of snapshots. Always at least 1.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the terminal snapshot.
    pub fn last_index(&self) -> usize {
        self.frames.len() - 1
    }

    /// Snapshot at `index`. `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.frames.get(index)
    }

    /// Untouched initial state.
    pub fn first(&self) -> &Snapshot {
        &self.frames[0]
    }

    /// Terminal state.
    pub fn last(&self) -> &Snapshot {
        &self.frames[self.last_index()]
    }

    /// All snapshots in order.
    pub fn frames(&self) -> &[Snapshot] {
        &self.frames
    }

    /// Iterate snapshots in order.
    pub fn iter(&self) -> slice::Iter<'_, Snapshot> {
        self.frames.iter()
    }

    /// Whether both traces share the same snapshot allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.frames, &other.frames)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Snapshot;
    type IntoIter = slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Something that can (re)build a trace on demand.
///
/// Playback calls `build()` on construction and on every reset, so a reset
/// always replays a freshly recorded trace rather than a mutated one.
pub trait TraceSource {
    /// Run the algorithm and record its trace.
    fn build(&self) -> Result<Trace, TraceError>;
}

impl<F> TraceSource for F
where
    F: Fn() -> Result<Trace, TraceError>,
{
    fn build(&self) -> Result<Trace, TraceError> {
        self()
    }
}
