//! Error types for trace construction.
//!
//! Every input a trace builder receives is a literal, hand-written dataset.
//! These errors describe defects in such a dataset; they are reported once,
//! at build time, and a partially recorded trace is never returned.
//!
//! Outcomes that are merely unsatisfiable (a cycle during topological sort)
//! are not errors. They are recorded as a terminal snapshot instead.

use thiserror::Error;

/// Defects detected while building a trace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// The input dataset has no elements or nodes.
    #[error("{algorithm}: input is empty")]
    EmptyInput {
        /// Builder that rejected the input
        algorithm: &'static str,
    },

    /// A trace was assembled from zero snapshots.
    #[error("trace contains no snapshots")]
    EmptyTrace,

    /// Two nodes share a label.
    #[error("duplicate node label {label:?}")]
    DuplicateNode {
        /// The repeated label
        label: String,
    },

    /// An edge names a label that was never declared as a node.
    #[error("edge references unknown node {label:?}")]
    UnknownNode {
        /// The undeclared label
        label: String,
    },

    /// An edge references a node index outside the node list.
    #[error("edge #{edge} references node {node}, but the graph has {count} nodes")]
    DanglingEdge {
        /// Position of the edge in declaration order
        edge: usize,
        /// Offending node index
        node: usize,
        /// Number of declared nodes
        count: usize,
    },

    /// A traversal was asked to start from a node that does not exist.
    #[error("start node {node} is not in the graph ({count} nodes)")]
    UnknownStart {
        /// Requested start index
        node: usize,
        /// Number of declared nodes
        count: usize,
    },
}
