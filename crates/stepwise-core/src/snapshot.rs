//! Point-in-time algorithm state.
//!
//! A [`Snapshot`] is everything a renderer needs to draw one step: the
//! elements (or nodes and edges) with their semantic tags, a narration string
//! and, for graph traversals, the literal contents of the side structure
//! (queue, stack, order-so-far).
//!
//! Snapshots are self-sufficient. Interpreting one never requires looking at
//! another snapshot or at algorithm-internal state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Snapshot shape, one per algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    /// Sorting algorithms over a flat array.
    Array,
    /// Traversals and orderings over nodes and edges.
    Graph,
}

/// Role of an array element in the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementTag {
    /// Not involved in the current step.
    Default,
    /// One side of the current comparison.
    Comparing,
    /// Just exchanged or moved; the value shown is already committed.
    Swapping,
    /// In its final position. Never changes afterwards.
    Sorted,
    /// Partition pivot or heap root being sifted.
    Pivot,
    /// Left half of a merge-sort split.
    Left,
    /// Right half of a merge-sort split.
    Right,
}

impl ElementTag {
    /// Whether this tag marks a finished element.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Sorted)
    }
}

/// One array slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    /// Value held in this slot.
    pub value: i64,
    /// Role of the slot in this step.
    pub tag: ElementTag,
}

/// Visible state of a sorting algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArraySnapshot {
    /// Array slots in index order.
    pub elements: Vec<Element>,
    /// What just happened.
    pub message: String,
}

impl ArraySnapshot {
    /// Values in index order.
    pub fn values(&self) -> Vec<i64> {
        self.elements.iter().map(|e| e.value).collect()
    }

    /// Tags in index order.
    pub fn tags(&self) -> Vec<ElementTag> {
        self.elements.iter().map(|e| e.tag).collect()
    }

    /// Indices carrying `tag`.
    pub fn indices_tagged(&self, tag: ElementTag) -> Vec<usize> {
        self.elements.iter().enumerate().filter(|(_, e)| e.tag == tag).map(|(i, _)| i).collect()
    }
}

/// Node index into a graph's declared node list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a node in the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeTag {
    /// Not yet discovered.
    Default,
    /// Waiting in the BFS queue.
    Queued,
    /// On the DFS stack, not yet being explored.
    Stacked,
    /// Currently being explored.
    Visiting,
    /// Fully explored (BFS/DFS).
    Visited,
    /// Waiting in Kahn's zero-in-degree queue.
    InQueue,
    /// Assigned its topological order number.
    Processed,
}

impl NodeTag {
    /// Whether this tag marks a finished node.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Visited | Self::Processed)
    }
}

/// Role of an edge in the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeTag {
    /// Not traversed.
    Default,
    /// Traversed or relaxed by the current step.
    Active,
    /// Traversed or relaxed by an earlier step.
    Processed,
}

/// One node as drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeState {
    /// Index in the declared node list.
    pub id: NodeId,
    /// Display label.
    pub label: String,
    /// Role in this step.
    pub tag: NodeTag,
    /// Topological position, starting at 1. `None` until assigned.
    pub order: Option<u32>,
}

/// One edge as drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeState {
    /// Source node.
    pub from: NodeId,
    /// Target node.
    pub to: NodeId,
    /// Role in this step.
    pub tag: EdgeTag,
}

/// Algorithm side structure, mirrored verbatim for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Auxiliary {
    /// BFS queue, front first.
    Queue {
        /// Queued nodes.
        items: Vec<NodeId>,
    },
    /// DFS stack, bottom first.
    Stack {
        /// Stacked nodes.
        items: Vec<NodeId>,
    },
    /// Kahn's ready queue and the order produced so far.
    Ordering {
        /// Ready nodes, front first.
        queue: Vec<NodeId>,
        /// Nodes already placed, in placement order.
        order: Vec<NodeId>,
    },
}

/// Visible state of a graph algorithm.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Nodes in declaration order.
    pub nodes: Vec<NodeState>,
    /// Edges in declaration order.
    pub edges: Vec<EdgeState>,
    /// Whether edges are drawn with arrows.
    pub directed: bool,
    /// Side structure, if the algorithm has one.
    pub auxiliary: Option<Auxiliary>,
    /// What just happened.
    pub message: String,
}

impl GraphSnapshot {
    /// Node by id. `None` if out of range.
    pub fn node(&self, id: NodeId) -> Option<&NodeState> {
        self.nodes.get(id.0)
    }

    /// Ids of nodes carrying `tag`, in declaration order.
    pub fn nodes_tagged(&self, tag: NodeTag) -> Vec<NodeId> {
        self.nodes.iter().filter(|n| n.tag == tag).map(|n| n.id).collect()
    }
}

/// One immutable step of an algorithm's execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "kebab-case")]
pub enum Snapshot {
    /// Sorting step.
    Array(ArraySnapshot),
    /// Graph step.
    Graph(GraphSnapshot),
}

impl Snapshot {
    /// Narration for this step.
    pub fn message(&self) -> &str {
        match self {
            Self::Array(s) => &s.message,
            Self::Graph(s) => &s.message,
        }
    }

    /// Shape of this snapshot.
    pub fn family(&self) -> Family {
        match self {
            Self::Array(_) => Family::Array,
            Self::Graph(_) => Family::Graph,
        }
    }

    /// Array view. `None` for graph snapshots.
    pub fn as_array(&self) -> Option<&ArraySnapshot> {
        match self {
            Self::Array(s) => Some(s),
            Self::Graph(_) => None,
        }
    }

    /// Graph view. `None` for array snapshots.
    pub fn as_graph(&self) -> Option<&GraphSnapshot> {
        match self {
            Self::Graph(s) => Some(s),
            Self::Array(_) => None,
        }
    }

    /// Whether every element or node carries a terminal tag.
    pub fn is_fully_resolved(&self) -> bool {
        match self {
            Self::Array(s) => s.elements.iter().all(|e| e.tag.is_terminal()),
            Self::Graph(s) => s.nodes.iter().all(|n| n.tag.is_terminal()),
        }
    }
}

impl From<ArraySnapshot> for Snapshot {
    fn from(s: ArraySnapshot) -> Self {
        Self::Array(s)
    }
}

impl From<GraphSnapshot> for Snapshot {
    fn from(s: GraphSnapshot) -> Self {
        Self::Graph(s)
    }
}
