//! Instrumented sorting algorithms.
//!
//! All builders sort ascending and record:
//!
//! - one snapshot per comparison (both slots `Comparing`)
//! - one snapshot per swap or move (slots `Swapping`, values committed)
//! - one snapshot per slot that reaches its final position (`Sorted`)
//!
//! Quick sort and heap sort additionally tag the pivot / sift root. Insertion
//! and merge sort only know the sorted region at the very end, so they close
//! with one `Sorted` event per slot.

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

pub use bubble::bubble_sort;
pub use heap::heap_sort;
pub use insertion::insertion_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;
pub use selection::selection_sort;

#[cfg(test)]
pub(crate) mod test_support {
    use stepwise_core::{ElementTag, Snapshot, Trace};

    /// Values and tags of the terminal snapshot.
    pub fn terminal(trace: &Trace) -> (Vec<i64>, Vec<ElementTag>) {
        match trace.last() {
            Snapshot::Array(s) => (s.values(), s.tags()),
            Snapshot::Graph(_) => panic!("sorting trace ended in a graph snapshot"),
        }
    }

    /// Assert the trace ends sorted and every step changed something.
    pub fn assert_well_formed(trace: &Trace, input: &[i64]) {
        let mut expected = input.to_vec();
        expected.sort_unstable();

        let (values, tags) = terminal(trace);
        assert_eq!(values, expected, "{}: terminal values", trace.name());
        assert!(tags.iter().all(|t| *t == ElementTag::Sorted), "{}: terminal tags", trace.name());

        for (k, pair) in trace.frames().windows(2).enumerate() {
            assert_ne!(pair[0], pair[1], "{}: snapshots {k} and {} are identical", trace.name(), k + 1);
        }
    }
}
