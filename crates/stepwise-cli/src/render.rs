//! Plain-text frames.
//!
//! A frame is a status line followed by the snapshot body:
//!
//! ```text
//! [Step 3 of 52] playing | Comparing 64 and 25
//!   64 34 25? 12? 22 11 90
//! ```
//!
//! Array slots carry a one-character marker for their tag. Graph nodes show
//! their tag in parentheses and their topological number after `#`.

use stepwise_core::{
    ArraySnapshot, Auxiliary, EdgeTag, ElementTag, GraphSnapshot, NodeId, NodeTag, Snapshot,
};
use stepwise_playback::View;

/// Status line: position, state and narration.
pub fn status_line(view: &View<'_>) -> String {
    format!("[{}] {} | {}", view.progress, view.state, view.snapshot.message())
}

/// Status line followed by the snapshot body, newline-terminated.
pub fn frame(view: &View<'_>) -> String {
    let mut out = status_line(view);
    out.push('\n');
    for line in body(view.snapshot) {
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Body lines for one snapshot, without indentation.
pub fn body(snapshot: &Snapshot) -> Vec<String> {
    match snapshot {
        Snapshot::Array(array) => vec![array_line(array)],
        Snapshot::Graph(graph) => graph_lines(graph),
    }
}

fn element_marker(tag: ElementTag) -> &'static str {
    match tag {
        ElementTag::Default => "",
        ElementTag::Comparing => "?",
        ElementTag::Swapping => "!",
        ElementTag::Sorted => "=",
        ElementTag::Pivot => "^",
        ElementTag::Left => "<",
        ElementTag::Right => ">",
    }
}

fn node_tag_name(tag: NodeTag) -> Option<&'static str> {
    match tag {
        NodeTag::Default => None,
        NodeTag::Queued => Some("queued"),
        NodeTag::Stacked => Some("stacked"),
        NodeTag::Visiting => Some("visiting"),
        NodeTag::Visited => Some("visited"),
        NodeTag::InQueue => Some("ready"),
        NodeTag::Processed => Some("processed"),
    }
}

fn array_line(array: &ArraySnapshot) -> String {
    array
        .elements
        .iter()
        .map(|e| format!("{}{}", e.value, element_marker(e.tag)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn graph_lines(graph: &GraphSnapshot) -> Vec<String> {
    let label = |id: NodeId| graph.node(id).map_or_else(|| id.to_string(), |n| n.label.clone());
    let labels = |ids: &[NodeId]| ids.iter().map(|&id| label(id)).collect::<Vec<_>>().join(", ");

    let nodes: Vec<String> = graph
        .nodes
        .iter()
        .map(|node| {
            let order = node.order.map(|n| format!("#{n}")).unwrap_or_default();
            let tag = node_tag_name(node.tag).map(|t| format!("({t})")).unwrap_or_default();
            format!("{}{order}{tag}", node.label)
        })
        .collect();

    let arrow = if graph.directed { "->" } else { "--" };
    let edges: Vec<String> = graph
        .edges
        .iter()
        .map(|edge| {
            let marker = match edge.tag {
                EdgeTag::Default => "",
                EdgeTag::Active => "*",
                EdgeTag::Processed => "+",
            };
            format!("{}{arrow}{}{marker}", label(edge.from), label(edge.to))
        })
        .collect();

    let mut lines =
        vec![format!("nodes: {}", nodes.join(" ")), format!("edges: {}", edges.join(" "))];
    match &graph.auxiliary {
        Some(Auxiliary::Queue { items }) => lines.push(format!("queue: [{}]", labels(items))),
        Some(Auxiliary::Stack { items }) => lines.push(format!("stack: [{}]", labels(items))),
        Some(Auxiliary::Ordering { queue, order }) => {
            lines.push(format!("ready: [{}]", labels(queue)));
            lines.push(format!("order: [{}]", labels(order)));
        },
        None => {},
    }
    lines
}
