//! Append-only snapshot logs.
//!
//! A recorder owns the algorithm's visible state (values and tags) and emits
//! a complete [`Snapshot`] for every event method called on it. Builders
//! never construct snapshots themselves, which keeps tag bookkeeping in one
//! place:
//!
//! - [`ArrayRecorder`]: a slot marked sorted keeps the `Sorted` tag in every
//!   later snapshot, regardless of what the caller asks for.
//! - [`GraphRecorder`]: an `Active` edge is demoted to `Processed` when the
//!   next event is recorded.

use std::cmp::Ordering;

use stepwise_core::{
    ArraySnapshot, Auxiliary, EdgeState, EdgeTag, Element, ElementTag, GraphSnapshot, NodeId,
    NodeState, NodeTag, Snapshot, Trace, TraceError,
};

use crate::graph::Graph;

/// Formats values as `64, 34, 25`.
pub(crate) fn join_values(values: &[i64]) -> String {
    values.iter().map(i64::to_string).collect::<Vec<_>>().join(", ")
}

/// Snapshot log for sorting algorithms.
#[derive(Debug, Clone)]
pub struct ArrayRecorder {
    algorithm: &'static str,
    values: Vec<i64>,
    sorted: Vec<bool>,
    /// Slot carrying the `Pivot` tag. Follows its value across swaps.
    focus: Option<usize>,
    frames: Vec<Snapshot>,
}

impl ArrayRecorder {
    /// Start a log with the untouched input as snapshot 0.
    ///
    /// # Errors
    ///
    /// - `TraceError::EmptyInput` if `values` is empty
    pub fn new(algorithm: &'static str, values: &[i64]) -> Result<Self, TraceError> {
        if values.is_empty() {
            return Err(TraceError::EmptyInput { algorithm });
        }

        let mut rec = Self {
            algorithm,
            values: values.to_vec(),
            sorted: vec![false; values.len()],
            focus: None,
            frames: Vec::new(),
        };
        rec.emit(format!("Initial array: [{}]", join_values(values)), &[]);
        Ok(rec)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; empty inputs are rejected by [`ArrayRecorder::new`].
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Current value at `index`.
    pub fn value(&self, index: usize) -> i64 {
        self.values[index]
    }

    /// Current values in slot order.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Number of snapshots recorded so far.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Record a comparison and return `values[i].cmp(&values[j])`.
    pub fn compare(&mut self, i: usize, j: usize) -> Ordering {
        let (a, b) = (self.values[i], self.values[j]);
        self.emit(format!("Comparing {a} and {b}"), &[
            (i, ElementTag::Comparing),
            (j, ElementTag::Comparing),
        ]);
        a.cmp(&b)
    }

    /// Record a comparison against the focused pivot at `pivot`.
    pub fn compare_with_pivot(&mut self, i: usize, pivot: usize) -> Ordering {
        let (a, p) = (self.values[i], self.values[pivot]);
        self.emit(format!("Comparing {a} with pivot {p}"), &[
            (i, ElementTag::Comparing),
            (pivot, ElementTag::Pivot),
        ]);
        a.cmp(&p)
    }

    /// Exchange two slots and record the committed result.
    ///
    /// Swapping a slot with itself records nothing.
    pub fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }

        let (a, b) = (self.values[i], self.values[j]);
        self.values.swap(i, j);
        self.focus = match self.focus {
            Some(f) if f == i => Some(j),
            Some(f) if f == j => Some(i),
            other => other,
        };

        self.emit(format!("Swapping {a} and {b}"), &[
            (i, ElementTag::Swapping),
            (j, ElementTag::Swapping),
        ]);
    }

    /// Move the value at `from` down to `to`, shifting `to..from` right by one.
    ///
    /// Used by in-place merging; one move is one event.
    pub fn shift(&mut self, from: usize, to: usize) {
        debug_assert!(to < from, "shift moves values towards the front");

        let moved = self.values[from];
        let displaced = self.values[to];
        let value = self.values.remove(from);
        self.values.insert(to, value);

        self.emit(format!("Moving {moved} in front of {displaced}"), &[(to, ElementTag::Swapping)]);
    }

    /// Record a merge-sort split of `lo..hi` at `mid`.
    pub fn split(&mut self, lo: usize, mid: usize, hi: usize) {
        let left = join_values(&self.values[lo..mid]);
        let right = join_values(&self.values[mid..hi]);

        let overlay: Vec<_> = (lo..mid)
            .map(|i| (i, ElementTag::Left))
            .chain((mid..hi).map(|i| (i, ElementTag::Right)))
            .collect();
        self.emit(format!("Splitting [{left}] | [{right}]"), &overlay);
    }

    /// Tag `index` as pivot (or heap root) and record `message`.
    ///
    /// The tag follows the value through later swaps until
    /// [`ArrayRecorder::release_focus`] or [`ArrayRecorder::mark_sorted`].
    pub fn focus(&mut self, index: usize, message: impl Into<String>) {
        self.focus = Some(index);
        self.emit(message.into(), &[]);
    }

    /// Drop the pivot tag without recording an event.
    pub fn release_focus(&mut self) {
        self.focus = None;
    }

    /// Record that `index` holds its final value.
    ///
    /// Marking an already-sorted slot records nothing.
    pub fn mark_sorted(&mut self, index: usize) {
        if self.sorted[index] {
            return;
        }

        self.sorted[index] = true;
        if self.focus == Some(index) {
            self.focus = None;
        }
        let value = self.values[index];
        self.emit(format!("{value} is in its final position"), &[]);
    }

    /// Mark every remaining slot sorted, one event per slot, left to right.
    pub fn sweep_sorted(&mut self) {
        for index in 0..self.values.len() {
            self.mark_sorted(index);
        }
    }

    /// Seal the log into a trace.
    pub fn finish(self) -> Result<Trace, TraceError> {
        tracing::debug!(algorithm = self.algorithm, frames = self.frames.len(), "trace recorded");
        Trace::new(self.algorithm, self.frames)
    }

    fn emit(&mut self, message: String, overlay: &[(usize, ElementTag)]) {
        let elements = self
            .values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let highlighted = overlay.iter().rev().find(|(k, _)| *k == i).map(|(_, t)| *t);
                let tag = if self.sorted[i] {
                    ElementTag::Sorted
                } else if let Some(tag) = highlighted {
                    tag
                } else if self.focus == Some(i) {
                    ElementTag::Pivot
                } else {
                    ElementTag::Default
                };
                Element { value, tag }
            })
            .collect();

        self.frames.push(Snapshot::Array(ArraySnapshot { elements, message }));
    }
}

/// Snapshot log for graph algorithms.
#[derive(Debug, Clone)]
pub struct GraphRecorder<'g> {
    algorithm: &'static str,
    graph: &'g Graph,
    node_tags: Vec<NodeTag>,
    edge_tags: Vec<EdgeTag>,
    order: Vec<Option<u32>>,
    auxiliary: Option<Auxiliary>,
    frames: Vec<Snapshot>,
}

impl<'g> GraphRecorder<'g> {
    /// Start a log with every node and edge untagged as snapshot 0.
    pub fn new(algorithm: &'static str, graph: &'g Graph, message: impl Into<String>) -> Self {
        let mut rec = Self {
            algorithm,
            graph,
            node_tags: vec![NodeTag::Default; graph.node_count()],
            edge_tags: vec![EdgeTag::Default; graph.edges().len()],
            order: vec![None; graph.node_count()],
            auxiliary: None,
            frames: Vec::new(),
        };
        rec.emit(message.into());
        rec
    }

    /// Number of snapshots recorded so far.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Replace the side-structure mirror shown from the next event on.
    pub fn set_auxiliary(&mut self, auxiliary: Auxiliary) {
        self.auxiliary = Some(auxiliary);
    }

    /// Assign a topological position to `node` without recording an event.
    pub fn assign_order(&mut self, node: usize, order: u32) {
        self.order[node] = Some(order);
    }

    /// Retag one node and record `message`.
    pub fn tag_node(&mut self, node: usize, tag: NodeTag, message: impl Into<String>) {
        self.demote_active();
        self.node_tags[node] = tag;
        self.emit(message.into());
    }

    /// Retag several nodes as one event.
    pub fn tag_nodes(&mut self, nodes: &[usize], tag: NodeTag, message: impl Into<String>) {
        self.demote_active();
        for &node in nodes {
            self.node_tags[node] = tag;
        }
        self.emit(message.into());
    }

    /// Retag `node`, reached through `edge`, and record `message`.
    pub fn traverse(&mut self, edge: usize, node: usize, tag: NodeTag, message: impl Into<String>) {
        self.demote_active();
        self.edge_tags[edge] = EdgeTag::Active;
        self.node_tags[node] = tag;
        self.emit(message.into());
    }

    /// Activate `edge` alone and record `message`.
    pub fn relax(&mut self, edge: usize, message: impl Into<String>) {
        self.demote_active();
        self.edge_tags[edge] = EdgeTag::Active;
        self.emit(message.into());
    }

    /// Record a narration-only event (verdicts, phase changes).
    pub fn narrate(&mut self, message: impl Into<String>) {
        self.demote_active();
        self.emit(message.into());
    }

    /// Seal the log into a trace.
    pub fn finish(self) -> Result<Trace, TraceError> {
        tracing::debug!(algorithm = self.algorithm, frames = self.frames.len(), "trace recorded");
        Trace::new(self.algorithm, self.frames)
    }

    fn demote_active(&mut self) {
        for tag in &mut self.edge_tags {
            if *tag == EdgeTag::Active {
                *tag = EdgeTag::Processed;
            }
        }
    }

    fn emit(&mut self, message: String) {
        let nodes = (0..self.graph.node_count())
            .map(|i| NodeState {
                id: NodeId(i),
                label: self.graph.label(i).to_string(),
                tag: self.node_tags[i],
                order: self.order[i],
            })
            .collect();

        let edges = self
            .graph
            .edges()
            .iter()
            .zip(&self.edge_tags)
            .map(|(&(from, to), &tag)| EdgeState { from: NodeId(from), to: NodeId(to), tag })
            .collect();

        self.frames.push(Snapshot::Graph(GraphSnapshot {
            nodes,
            edges,
            directed: self.graph.is_directed(),
            auxiliary: self.auxiliary.clone(),
            message,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last_tags(rec: &ArrayRecorder) -> Vec<ElementTag> {
        match rec.frames.last() {
            Some(Snapshot::Array(s)) => s.tags(),
            other => panic!("expected array snapshot, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = ArrayRecorder::new("bubble-sort", &[]).unwrap_err();
        assert_eq!(err, TraceError::EmptyInput { algorithm: "bubble-sort" });
    }

    #[test]
    fn initial_snapshot_is_untouched() {
        let rec = ArrayRecorder::new("t", &[3, 1, 2]).unwrap();
        assert_eq!(rec.frame_count(), 1);
        assert_eq!(last_tags(&rec), vec![ElementTag::Default; 3]);
    }

    #[test]
    fn sorted_tag_wins_over_highlights() {
        let mut rec = ArrayRecorder::new("t", &[1, 2, 3]).unwrap();
        rec.mark_sorted(0);
        rec.compare(0, 1);

        assert_eq!(last_tags(&rec), vec![
            ElementTag::Sorted,
            ElementTag::Comparing,
            ElementTag::Default
        ]);
    }

    #[test]
    fn self_swap_and_repeated_mark_record_nothing() {
        let mut rec = ArrayRecorder::new("t", &[1, 2]).unwrap();
        rec.swap(1, 1);
        rec.mark_sorted(0);
        rec.mark_sorted(0);
        assert_eq!(rec.frame_count(), 2);
    }

    #[test]
    fn focus_follows_swapped_value() {
        let mut rec = ArrayRecorder::new("t", &[5, 9, 1]).unwrap();
        rec.focus(2, "Pivot is 1");
        rec.swap(0, 2);

        rec.compare(1, 2);
        assert_eq!(last_tags(&rec), vec![
            ElementTag::Pivot,
            ElementTag::Comparing,
            ElementTag::Comparing
        ]);
    }

    #[test]
    fn shift_moves_value_forward() {
        let mut rec = ArrayRecorder::new("t", &[4, 6, 8, 5]).unwrap();
        rec.shift(3, 1);
        assert_eq!(rec.values(), &[4, 5, 6, 8]);
        assert_eq!(last_tags(&rec)[1], ElementTag::Swapping);
    }

    #[test]
    fn active_edges_are_demoted_on_next_event() {
        let graph = Graph::numbered(3, &[(0, 1), (1, 2)], true).unwrap();
        let mut rec = GraphRecorder::new("t", &graph, "start");
        rec.relax(0, "first");
        rec.relax(1, "second");

        let trace = rec.finish().unwrap();
        let last = trace.last().as_graph().unwrap();
        assert_eq!(last.edges[0].tag, EdgeTag::Processed);
        assert_eq!(last.edges[1].tag, EdgeTag::Active);
    }
}
