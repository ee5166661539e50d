//! Graph inputs and instrumented graph algorithms.
//!
//! A [`Graph`] is a validated node list plus an edge list in declaration
//! order. Neighbour lists are derived from that order, never from a hashed
//! collection, so traversal order is fully specified by the input literal.

mod bfs;
mod dfs;
mod topo;

use std::collections::HashMap;

pub use bfs::bfs;
pub use dfs::dfs;
use stepwise_core::{NodeId, TraceError};
pub use topo::topological_sort;

/// Validated graph input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    labels: Vec<String>,
    edges: Vec<(usize, usize)>,
    directed: bool,
}

impl Graph {
    /// Build a graph from node labels and index-based edges.
    ///
    /// # Errors
    ///
    /// - `TraceError::EmptyInput` if there are no nodes
    /// - `TraceError::DuplicateNode` if two labels are equal
    /// - `TraceError::DanglingEdge` if an edge index is out of range
    pub fn new(
        labels: Vec<String>,
        edges: Vec<(usize, usize)>,
        directed: bool,
    ) -> Result<Self, TraceError> {
        if labels.is_empty() {
            return Err(TraceError::EmptyInput { algorithm: "graph" });
        }

        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(TraceError::DuplicateNode { label: label.clone() });
            }
        }

        let count = labels.len();
        for (edge, &(from, to)) in edges.iter().enumerate() {
            if let Some(node) = [from, to].into_iter().find(|&n| n >= count) {
                return Err(TraceError::DanglingEdge { edge, node, count });
            }
        }

        Ok(Self { labels, edges, directed })
    }

    /// Build a graph whose nodes are labelled `0..count`.
    pub fn numbered(
        count: usize,
        edges: &[(usize, usize)],
        directed: bool,
    ) -> Result<Self, TraceError> {
        Self::new((0..count).map(|i| i.to_string()).collect(), edges.to_vec(), directed)
    }

    /// Build a graph whose edges refer to nodes by label.
    ///
    /// # Errors
    ///
    /// - `TraceError::UnknownNode` if an edge names an undeclared label
    /// - everything [`Graph::new`] reports
    pub fn labelled(
        labels: &[&str],
        edges: &[(&str, &str)],
        directed: bool,
    ) -> Result<Self, TraceError> {
        let index: HashMap<&str, usize> =
            labels.iter().enumerate().map(|(i, &label)| (label, i)).collect();

        let lookup = |label: &str| {
            index
                .get(label)
                .copied()
                .ok_or_else(|| TraceError::UnknownNode { label: label.to_string() })
        };

        let edges = edges
            .iter()
            .map(|&(from, to)| Ok((lookup(from)?, lookup(to)?)))
            .collect::<Result<Vec<_>, TraceError>>()?;

        Self::new(labels.iter().map(|l| (*l).to_string()).collect(), edges, directed)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Label of `node`.
    pub fn label(&self, node: usize) -> &str {
        &self.labels[node]
    }

    /// Edges as `(from, to)` in declaration order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Whether edges are one-way.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Index of the node labelled `label`. `None` if absent.
    pub fn find(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Traversal neighbours of every node as `(neighbour, edge index)`.
    ///
    /// Lists follow edge declaration order. Undirected edges appear in both
    /// endpoints' lists.
    pub fn neighbours(&self) -> Vec<Vec<(usize, usize)>> {
        let mut adjacency = vec![Vec::new(); self.labels.len()];
        for (edge, &(from, to)) in self.edges.iter().enumerate() {
            adjacency[from].push((to, edge));
            if !self.directed && from != to {
                adjacency[to].push((from, edge));
            }
        }
        adjacency
    }

    /// Outgoing edges of every node as `(target, edge index)`, treating each
    /// edge as pointing from its first to its second endpoint.
    pub fn outgoing(&self) -> Vec<Vec<(usize, usize)>> {
        let mut adjacency = vec![Vec::new(); self.labels.len()];
        for (edge, &(from, to)) in self.edges.iter().enumerate() {
            adjacency[from].push((to, edge));
        }
        adjacency
    }

    pub(crate) fn check_start(&self, start: usize) -> Result<(), TraceError> {
        if start < self.labels.len() {
            Ok(())
        } else {
            Err(TraceError::UnknownStart { node: start, count: self.labels.len() })
        }
    }
}

/// Node indices as snapshot ids.
pub(crate) fn ids<'a>(nodes: impl IntoIterator<Item = &'a usize>) -> Vec<NodeId> {
    nodes.into_iter().map(|&n| NodeId(n)).collect()
}
