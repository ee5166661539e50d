//! Registry of shipped visualizers.

use std::{fmt, str::FromStr};

use stepwise_core::{Family, Trace, TraceError, TraceSource};

use crate::{datasets, graph, sort};

/// An algorithm paired with the dataset it is shown on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visualizer {
    /// Bubble sort on [`datasets::SORT_INPUT`].
    BubbleSort,
    /// Selection sort on [`datasets::SORT_INPUT`].
    SelectionSort,
    /// Insertion sort on [`datasets::SORT_INPUT`].
    InsertionSort,
    /// Merge sort on [`datasets::SORT_INPUT`].
    MergeSort,
    /// Quick sort on [`datasets::SORT_INPUT`].
    QuickSort,
    /// Heap sort on [`datasets::SORT_INPUT`].
    HeapSort,
    /// Breadth-first search on [`datasets::bfs_tree`].
    Bfs,
    /// Depth-first search on [`datasets::dfs_graph`].
    Dfs,
    /// Kahn's algorithm on [`datasets::getting_dressed`].
    TopologicalSort,
    /// Kahn's algorithm on [`datasets::cyclic_prerequisites`].
    TopologicalSortCycle,
}

impl Visualizer {
    /// Every visualizer, in menu order.
    pub const ALL: [Self; 10] = [
        Self::BubbleSort,
        Self::SelectionSort,
        Self::InsertionSort,
        Self::MergeSort,
        Self::QuickSort,
        Self::HeapSort,
        Self::Bfs,
        Self::Dfs,
        Self::TopologicalSort,
        Self::TopologicalSortCycle,
    ];

    /// Stable kebab-case name, also accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::BubbleSort => "bubble-sort",
            Self::SelectionSort => "selection-sort",
            Self::InsertionSort => "insertion-sort",
            Self::MergeSort => "merge-sort",
            Self::QuickSort => "quick-sort",
            Self::HeapSort => "heap-sort",
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::TopologicalSort => "topological-sort",
            Self::TopologicalSortCycle => "topological-sort-cycle",
        }
    }

    /// Snapshot family the trace is made of.
    pub fn family(self) -> Family {
        match self {
            Self::BubbleSort
            | Self::SelectionSort
            | Self::InsertionSort
            | Self::MergeSort
            | Self::QuickSort
            | Self::HeapSort => Family::Array,
            Self::Bfs | Self::Dfs | Self::TopologicalSort | Self::TopologicalSortCycle => {
                Family::Graph
            },
        }
    }

    /// Run the algorithm on its dataset.
    ///
    /// # Errors
    ///
    /// Only if a shipped dataset is malformed.
    pub fn build(self) -> Result<Trace, TraceError> {
        let input = &datasets::SORT_INPUT;
        match self {
            Self::BubbleSort => sort::bubble_sort(input),
            Self::SelectionSort => sort::selection_sort(input),
            Self::InsertionSort => sort::insertion_sort(input),
            Self::MergeSort => sort::merge_sort(input),
            Self::QuickSort => sort::quick_sort(input),
            Self::HeapSort => sort::heap_sort(input),
            Self::Bfs => graph::bfs(&datasets::bfs_tree()?, datasets::TRAVERSAL_START),
            Self::Dfs => graph::dfs(&datasets::dfs_graph()?, datasets::TRAVERSAL_START),
            Self::TopologicalSort => graph::topological_sort(&datasets::getting_dressed()?),
            Self::TopologicalSortCycle => {
                graph::topological_sort(&datasets::cyclic_prerequisites()?)
            },
        }
    }
}

impl TraceSource for Visualizer {
    fn build(&self) -> Result<Trace, TraceError> {
        Visualizer::build(*self)
    }
}

impl fmt::Display for Visualizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name did not match any visualizer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm '{name}' (try one of: {})", known_names())]
pub struct ParseVisualizerError {
    /// The rejected input.
    pub name: String,
}

fn known_names() -> String {
    Visualizer::ALL.iter().map(|v| v.name()).collect::<Vec<_>>().join(", ")
}

impl FromStr for Visualizer {
    type Err = ParseVisualizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|v| v.name() == wanted)
            .ok_or_else(|| ParseVisualizerError { name: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for v in Visualizer::ALL {
            assert_eq!(v.name().parse::<Visualizer>(), Ok(v));
        }
        assert_eq!("Quick_Sort".parse::<Visualizer>(), Ok(Visualizer::QuickSort));
    }

    #[test]
    fn unknown_name_lists_choices() {
        let err = "bogo-sort".parse::<Visualizer>().unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("unknown algorithm 'bogo-sort'"));
        assert!(text.contains("heap-sort"));
    }

    #[test]
    fn every_shipped_visualizer_builds() {
        for v in Visualizer::ALL {
            let trace = v.build().unwrap();
            assert_eq!(trace.name(), v.name().trim_end_matches("-cycle"));
            assert!(trace.iter().all(|s| s.family() == v.family()));
        }
    }

    #[test]
    fn trace_source_rebuilds_equal_traces() {
        let source: &dyn TraceSource = &Visualizer::Dfs;
        assert_eq!(source.build().unwrap().frames(), source.build().unwrap().frames());
    }
}
