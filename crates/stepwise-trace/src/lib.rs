//! Trace builders for the visualized algorithms.
//!
//! Each builder runs its algorithm once, eagerly, against a small literal
//! input and appends a snapshot after every observable event. The recorder is
//! threaded through the algorithm by `&mut`, so recursive algorithms (merge
//! sort, quick sort, DFS) interleave into one flat sequence.
//!
//! # Determinism
//!
//! Builders never consult randomness or hash-ordered collections. Graph
//! neighbours are visited in edge declaration order, so the same input always
//! yields an identical trace.
//!
//! # Components
//!
//! - [`sort`]: bubble, selection, insertion, merge, quick and heap sort
//! - [`graph`]: graph input type, BFS, DFS and Kahn's topological sort
//! - [`recorder`]: append-only snapshot logs for both families
//! - [`datasets`]: the literal inputs shipped with each visualizer
//! - [`Visualizer`]: registry pairing each algorithm with its dataset

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod datasets;
pub mod graph;
pub mod recorder;
pub mod sort;
mod visualizer;

pub use graph::{Graph, bfs, dfs, topological_sort};
pub use recorder::{ArrayRecorder, GraphRecorder};
pub use sort::{bubble_sort, heap_sort, insertion_sort, merge_sort, quick_sort, selection_sort};
pub use visualizer::{ParseVisualizerError, Visualizer};
