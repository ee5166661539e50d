use stepwise_core::{Auxiliary, NodeTag, Trace, TraceError};

use super::{Graph, ids};
use crate::recorder::GraphRecorder;

/// Recursive depth-first search from `start`.
///
/// The auxiliary stack is the recursion stack: a node is pushed (`Stacked`)
/// when its call begins, explored (`Visiting`), and popped (`Visited`) once
/// every neighbour has been handled.
///
/// Nodes unreachable from `start` stay untagged, so the terminal snapshot is
/// fully resolved only when every node is reachable from `start`.
pub fn dfs(graph: &Graph, start: usize) -> Result<Trace, TraceError> {
    graph.check_start(start)?;

    let mut walk = Walk {
        graph,
        adjacency: graph.neighbours(),
        discovered: vec![false; graph.node_count()],
        stack: Vec::new(),
    };
    let mut rec =
        GraphRecorder::new("dfs", graph, format!("Depth-first search from {}", graph.label(start)));

    walk.visit(&mut rec, start, None);

    rec.finish()
}

struct Walk<'g> {
    graph: &'g Graph,
    adjacency: Vec<Vec<(usize, usize)>>,
    discovered: Vec<bool>,
    stack: Vec<usize>,
}

impl Walk<'_> {
    fn visit(&mut self, rec: &mut GraphRecorder<'_>, node: usize, via: Option<(usize, usize)>) {
        let graph = self.graph;
        let label = graph.label(node);
        self.discovered[node] = true;
        self.stack.push(node);
        rec.set_auxiliary(Auxiliary::Stack { items: ids(&self.stack) });

        match via {
            Some((parent, edge)) => rec.traverse(
                edge,
                node,
                NodeTag::Stacked,
                format!("Push {label} via {} → {label}", graph.label(parent)),
            ),
            None => rec.tag_node(node, NodeTag::Stacked, format!("Push {label}")),
        }
        rec.tag_node(node, NodeTag::Visiting, format!("Visit {label}"));

        let neighbours = self.adjacency[node].clone();
        for (next, edge) in neighbours {
            if !self.discovered[next] {
                self.visit(rec, next, Some((node, edge)));
            }
        }

        self.stack.pop();
        rec.set_auxiliary(Auxiliary::Stack { items: ids(&self.stack) });
        rec.tag_node(node, NodeTag::Visited, format!("Pop {label}: all neighbours explored"));
    }
}
