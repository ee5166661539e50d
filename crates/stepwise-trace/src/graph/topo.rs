use std::collections::VecDeque;

use stepwise_core::{Auxiliary, NodeTag, Trace, TraceError};

use super::{Graph, ids};
use crate::recorder::GraphRecorder;

/// Topological sort with Kahn's algorithm.
///
/// Edges are read as `from → to` ("`from` must come before `to`") regardless
/// of the graph's `directed` flag. Nodes receive order numbers 1, 2, ... as
/// they are processed.
///
/// If the graph has a cycle the queue empties early. The trace then ends with
/// a verdict snapshot stating that no valid order exists; nodes on or behind
/// the cycle keep their untagged state.
pub fn topological_sort(graph: &Graph) -> Result<Trace, TraceError> {
    let outgoing = graph.outgoing();
    let mut in_degree = vec![0usize; graph.node_count()];
    for &(_, to) in graph.edges() {
        in_degree[to] += 1;
    }

    let mut rec = GraphRecorder::new(
        "topological-sort",
        graph,
        format!("Topological sort of {} nodes (Kahn's algorithm)", graph.node_count()),
    );

    let mut queue: VecDeque<usize> =
        (0..graph.node_count()).filter(|&n| in_degree[n] == 0).collect();
    let mut order: Vec<usize> = Vec::with_capacity(graph.node_count());

    rec.set_auxiliary(Auxiliary::Ordering { queue: ids(&queue), order: Vec::new() });
    let ready: Vec<usize> = queue.iter().copied().collect();
    let message = if ready.is_empty() {
        "No node is free of prerequisites".to_string()
    } else {
        format!("Nodes without prerequisites: {}", labels(graph, &ready))
    };
    rec.tag_nodes(&ready, NodeTag::InQueue, message);

    let mut next_order = 1u32;
    while let Some(node) = queue.pop_front() {
        order.push(node);
        rec.assign_order(node, next_order);
        rec.set_auxiliary(Auxiliary::Ordering { queue: ids(&queue), order: ids(&order) });
        rec.tag_node(
            node,
            NodeTag::Processed,
            format!("Take {} as #{next_order}", graph.label(node)),
        );
        next_order += 1;

        for &(next, edge) in &outgoing[node] {
            in_degree[next] -= 1;
            rec.relax(
                edge,
                format!(
                    "Remove {} → {}: {} has {} prerequisite(s) left",
                    graph.label(node),
                    graph.label(next),
                    graph.label(next),
                    in_degree[next]
                ),
            );

            if in_degree[next] == 0 {
                queue.push_back(next);
                rec.set_auxiliary(Auxiliary::Ordering { queue: ids(&queue), order: ids(&order) });
                rec.tag_node(
                    next,
                    NodeTag::InQueue,
                    format!("{} is ready: enqueue it", graph.label(next)),
                );
            }
        }
    }

    if order.len() == graph.node_count() {
        rec.narrate(format!("Topological order: {}", labels_arrow(graph, &order)));
    } else {
        tracing::debug!(ordered = order.len(), total = graph.node_count(), "cycle detected");
        rec.narrate(format!(
            "Cycle detected: no valid topological order exists ({} of {} nodes ordered)",
            order.len(),
            graph.node_count()
        ));
    }

    rec.finish()
}

fn labels(graph: &Graph, nodes: &[usize]) -> String {
    nodes.iter().map(|&n| graph.label(n)).collect::<Vec<_>>().join(", ")
}

fn labels_arrow(graph: &Graph, nodes: &[usize]) -> String {
    nodes.iter().map(|&n| graph.label(n)).collect::<Vec<_>>().join(" → ")
}
