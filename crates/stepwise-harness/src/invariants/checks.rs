//! Standard trace invariants.

use std::collections::BTreeSet;

use stepwise_core::{EdgeTag, ElementTag, Snapshot, Trace};

use super::{Invariant, InvariantResult, Violation};

fn violation(invariant: &'static str, step: Option<usize>, message: String) -> Violation {
    Violation { invariant, step, message }
}

/// Every snapshot belongs to the first snapshot's family.
pub struct UniformFamily;

impl Invariant for UniformFamily {
    fn name(&self) -> &'static str {
        "uniform-family"
    }

    fn check(&self, trace: &Trace) -> InvariantResult {
        let family = trace.first().family();
        match trace.iter().position(|s| s.family() != family) {
            Some(step) => Err(violation(
                self.name(),
                Some(step),
                format!("expected {family:?}, got {:?}", trace.frames()[step].family()),
            )),
            None => Ok(()),
        }
    }
}

/// Element count (array) or node/edge counts and labels (graph) never
/// change.
pub struct StableShape;

impl Invariant for StableShape {
    fn name(&self) -> &'static str {
        "stable-shape"
    }

    fn check(&self, trace: &Trace) -> InvariantResult {
        let first = trace.first();
        for (step, snapshot) in trace.iter().enumerate().skip(1) {
            let same = match (first, snapshot) {
                (Snapshot::Array(a), Snapshot::Array(b)) => a.elements.len() == b.elements.len(),
                (Snapshot::Graph(a), Snapshot::Graph(b)) => {
                    a.edges.len() == b.edges.len()
                        && a.nodes.len() == b.nodes.len()
                        && a.nodes.iter().zip(&b.nodes).all(|(x, y)| x.label == y.label)
                },
                _ => false,
            };
            if !same {
                return Err(violation(self.name(), Some(step), "shape changed".to_string()));
            }
        }
        Ok(())
    }
}

/// No two consecutive snapshots are equal.
pub struct DistinctSteps;

impl Invariant for DistinctSteps {
    fn name(&self) -> &'static str {
        "distinct-steps"
    }

    fn check(&self, trace: &Trace) -> InvariantResult {
        match trace.frames().windows(2).position(|pair| pair[0] == pair[1]) {
            Some(k) => Err(violation(
                self.name(),
                Some(k + 1),
                format!("identical to step {k}: {:?}", trace.frames()[k].message()),
            )),
            None => Ok(()),
        }
    }
}

/// A slot tagged `Sorted` keeps the tag in every later snapshot.
pub struct SortedMonotonicity;

impl Invariant for SortedMonotonicity {
    fn name(&self) -> &'static str {
        "sorted-monotonicity"
    }

    fn check(&self, trace: &Trace) -> InvariantResult {
        let mut settled: BTreeSet<usize> = BTreeSet::new();
        for (step, snapshot) in trace.iter().enumerate() {
            let Some(array) = snapshot.as_array() else { continue };
            let sorted: BTreeSet<usize> =
                array.indices_tagged(ElementTag::Sorted).into_iter().collect();

            if let Some(lost) = settled.difference(&sorted).next() {
                return Err(violation(
                    self.name(),
                    Some(step),
                    format!("slot {lost} lost its sorted tag"),
                ));
            }
            settled = sorted;
        }
        Ok(())
    }
}

/// Topological order numbers are assigned 1, 2, 3, ... and never change.
pub struct OrderMonotonicity;

impl Invariant for OrderMonotonicity {
    fn name(&self) -> &'static str {
        "order-monotonicity"
    }

    fn check(&self, trace: &Trace) -> InvariantResult {
        let mut assigned: Vec<Option<u32>> = Vec::new();
        for (step, snapshot) in trace.iter().enumerate() {
            let Some(graph) = snapshot.as_graph() else { continue };
            let current: Vec<Option<u32>> = graph.nodes.iter().map(|n| n.order).collect();

            for (node, (before, now)) in assigned.iter().zip(&current).enumerate() {
                if before.is_some() && before != now {
                    return Err(violation(
                        self.name(),
                        Some(step),
                        format!("node {node} order changed {before:?} → {now:?}"),
                    ));
                }
            }

            let mut numbers: Vec<u32> = current.iter().flatten().copied().collect();
            numbers.sort_unstable();
            if numbers.iter().zip(1u32..).any(|(&n, expected)| n != expected) {
                return Err(violation(
                    self.name(),
                    Some(step),
                    format!("order numbers {numbers:?} are not 1..={}", numbers.len()),
                ));
            }
            assigned = current;
        }
        Ok(())
    }
}

/// At most one edge is `Active` in any snapshot.
pub struct SingleActiveEdge;

impl Invariant for SingleActiveEdge {
    fn name(&self) -> &'static str {
        "single-active-edge"
    }

    fn check(&self, trace: &Trace) -> InvariantResult {
        for (step, snapshot) in trace.iter().enumerate() {
            let Some(graph) = snapshot.as_graph() else { continue };
            let active = graph.edges.iter().filter(|e| e.tag == EdgeTag::Active).count();
            if active > 1 {
                return Err(violation(self.name(), Some(step), format!("{active} active edges")));
            }
        }
        Ok(())
    }
}

/// The last snapshot carries a terminal tag on every element or node.
pub struct TerminalResolved;

impl Invariant for TerminalResolved {
    fn name(&self) -> &'static str {
        "terminal-resolved"
    }

    fn check(&self, trace: &Trace) -> InvariantResult {
        if trace.last().is_fully_resolved() {
            Ok(())
        } else {
            Err(violation(
                self.name(),
                Some(trace.last_index()),
                format!("unresolved final state: {:?}", trace.last().message()),
            ))
        }
    }
}
