//! Structural invariants over every shipped trace and over generated inputs.

use proptest::prelude::*;
use stepwise_harness::{InvariantRegistry, TerminalResolved};
use stepwise_trace::{Graph, Visualizer, bfs, dfs, heap_sort, merge_sort, quick_sort, topological_sort};

#[test]
fn shipped_traces_hold_standard_invariants() {
    let registry = InvariantRegistry::standard();
    for v in Visualizer::ALL {
        registry.assert_all(&v.build().unwrap());
    }
}

#[test]
fn shipped_traces_resolve_except_cycle() {
    let registry = InvariantRegistry::new().with(TerminalResolved);
    for v in Visualizer::ALL {
        let result = registry.check_all(&v.build().unwrap());
        assert_eq!(result.is_ok(), v != Visualizer::TopologicalSortCycle, "{v}");
    }
}

/// Random simple graphs on up to 7 nodes, edges in arbitrary order.
fn graph_strategy() -> impl Strategy<Value = Graph> {
    (1usize..8, any::<bool>()).prop_flat_map(|(n, directed)| {
        prop::collection::vec((0..n, 0..n), 0..12).prop_map(move |edges| {
            let edges: Vec<_> = edges.into_iter().filter(|(a, b)| a != b).collect();
            Graph::numbered(n, &edges, directed).unwrap()
        })
    })
}

proptest! {
    #[test]
    fn prop_recursive_sorts_hold_invariants(values in prop::collection::vec(-50i64..50, 1..10)) {
        let registry = InvariantRegistry::standard().with(TerminalResolved);
        for trace in [merge_sort(&values), quick_sort(&values), heap_sort(&values)] {
            let trace = trace.unwrap();
            prop_assert!(registry.check_all(&trace).is_ok(), "{:?}", registry.check_all(&trace));
        }
    }

    #[test]
    fn prop_graph_traces_hold_invariants(graph in graph_strategy()) {
        let registry = InvariantRegistry::standard();
        for trace in [bfs(&graph, 0), dfs(&graph, 0), topological_sort(&graph)] {
            let trace = trace.unwrap();
            prop_assert!(registry.check_all(&trace).is_ok(), "{:?}", registry.check_all(&trace));
        }
    }

    #[test]
    fn prop_topological_numbers_respect_edges(graph in graph_strategy()) {
        let trace = topological_sort(&graph).unwrap();
        let last = trace.last().as_graph().unwrap();

        for &(from, to) in graph.edges() {
            if let (Some(a), Some(b)) = (last.nodes[from].order, last.nodes[to].order) {
                prop_assert!(a < b);
            }
        }
        let complete = last.nodes.iter().all(|n| n.order.is_some());
        prop_assert_eq!(complete, last.message.starts_with("Topological order"));
    }
}
