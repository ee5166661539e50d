//! Literal inputs shipped with each visualizer.
//!
//! Inputs are tiny on purpose: every trace is generated eagerly and a human
//! steps through it one event at a time.

use stepwise_core::TraceError;

use crate::graph::Graph;

/// Array shared by every sorting visualizer.
pub const SORT_INPUT: [i64; 7] = [64, 34, 25, 12, 22, 11, 90];

/// Start node for the traversal visualizers.
pub const TRAVERSAL_START: usize = 0;

/// Complete binary tree on seven nodes, `0 → 1, 0 → 2, 1 → 3, ...`.
pub fn bfs_tree() -> Result<Graph, TraceError> {
    Graph::numbered(7, &[(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)], true)
}

/// Undirected graph with a cycle and a back edge, so DFS has to skip
/// already-discovered neighbours.
pub fn dfs_graph() -> Result<Graph, TraceError> {
    Graph::numbered(6, &[(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (4, 5), (1, 4)], false)
}

/// Classic "getting dressed" prerequisite DAG.
pub fn getting_dressed() -> Result<Graph, TraceError> {
    Graph::labelled(
        &["undershorts", "pants", "belt", "shirt", "tie", "jacket", "socks", "shoes", "watch"],
        &[
            ("undershorts", "pants"),
            ("undershorts", "shoes"),
            ("pants", "belt"),
            ("pants", "shoes"),
            ("belt", "jacket"),
            ("shirt", "belt"),
            ("shirt", "tie"),
            ("tie", "jacket"),
            ("socks", "shoes"),
        ],
        true,
    )
}

/// Course prerequisites with a cycle between `data`, `algo` and `graphs`.
pub fn cyclic_prerequisites() -> Result<Graph, TraceError> {
    Graph::labelled(
        &["intro", "data", "algo", "graphs"],
        &[("intro", "data"), ("data", "algo"), ("algo", "graphs"), ("graphs", "data")],
        true,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_graphs_are_valid() {
        for graph in [bfs_tree(), dfs_graph(), getting_dressed(), cyclic_prerequisites()] {
            assert!(graph.is_ok(), "{graph:?}");
        }
    }

    #[test]
    fn getting_dressed_has_an_isolated_node() {
        let graph = getting_dressed().unwrap();
        let watch = graph.find("watch").unwrap();
        assert!(graph.edges().iter().all(|&(a, b)| a != watch && b != watch));
    }
}
