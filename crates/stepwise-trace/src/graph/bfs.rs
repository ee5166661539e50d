use std::collections::VecDeque;

use stepwise_core::{Auxiliary, NodeTag, Trace, TraceError};

use super::{Graph, ids};
use crate::recorder::GraphRecorder;

/// Breadth-first search from `start`.
///
/// Records each enqueue (`Queued`, with the discovering edge `Active`), each
/// dequeue (`Visiting`) and each completion (`Visited`). The auxiliary queue
/// mirror is updated before every event.
///
/// Nodes unreachable from `start` stay untagged, so the terminal snapshot is
/// fully resolved only when every node is reachable from `start`.
pub fn bfs(graph: &Graph, start: usize) -> Result<Trace, TraceError> {
    graph.check_start(start)?;

    let adjacency = graph.neighbours();
    let mut rec =
        GraphRecorder::new("bfs", graph, format!("Breadth-first search from {}", graph.label(start)));

    let mut discovered = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();

    discovered[start] = true;
    queue.push_back(start);
    rec.set_auxiliary(Auxiliary::Queue { items: ids(&queue) });
    rec.tag_node(start, NodeTag::Queued, format!("Enqueue {}", graph.label(start)));

    while let Some(node) = queue.pop_front() {
        rec.set_auxiliary(Auxiliary::Queue { items: ids(&queue) });
        rec.tag_node(node, NodeTag::Visiting, format!("Dequeue {} and visit it", graph.label(node)));

        for &(next, edge) in &adjacency[node] {
            if discovered[next] {
                continue;
            }
            discovered[next] = true;
            queue.push_back(next);

            rec.set_auxiliary(Auxiliary::Queue { items: ids(&queue) });
            rec.traverse(
                edge,
                next,
                NodeTag::Queued,
                format!("Enqueue {} via {} → {}", graph.label(next), graph.label(node), graph.label(next)),
            );
        }

        rec.tag_node(node, NodeTag::Visited, format!("Finished visiting {}", graph.label(node)));
    }

    rec.finish()
}
