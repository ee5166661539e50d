use std::cmp::Ordering;

use stepwise_core::{Trace, TraceError};

use crate::recorder::ArrayRecorder;

/// Quick sort with Lomuto partitioning (last element as pivot).
///
/// Every slot becomes sorted either as a placed pivot or as a single-element
/// range.
pub fn quick_sort(values: &[i64]) -> Result<Trace, TraceError> {
    let mut rec = ArrayRecorder::new("quick-sort", values)?;
    let n = rec.len();

    sort_range(&mut rec, 0, n - 1);

    rec.finish()
}

/// Sort the inclusive range `lo..=hi`.
fn sort_range(rec: &mut ArrayRecorder, lo: usize, hi: usize) {
    if lo == hi {
        rec.mark_sorted(lo);
        return;
    }

    let p = partition(rec, lo, hi);
    if p > lo {
        sort_range(rec, lo, p - 1);
    }
    if p < hi {
        sort_range(rec, p + 1, hi);
    }
}

/// Partition `lo..=hi` around `values[hi]` and return the pivot's final slot.
fn partition(rec: &mut ArrayRecorder, lo: usize, hi: usize) -> usize {
    let pivot = rec.value(hi);
    rec.focus(hi, format!("Pivot is {pivot}"));

    let mut store = lo;
    for j in lo..hi {
        if rec.compare_with_pivot(j, hi) == Ordering::Less {
            rec.swap(store, j);
            store += 1;
        }
    }
    rec.swap(store, hi);
    rec.mark_sorted(store);

    store
}

#[cfg(test)]
mod tests {
    use stepwise_core::{ElementTag, Snapshot};

    use super::*;
    use crate::sort::test_support::assert_well_formed;

    #[test]
    fn sorts_reference_input() {
        let input = [64, 34, 25, 12, 22, 11, 90];
        assert_well_formed(&quick_sort(&input).unwrap(), &input);
    }

    #[test]
    fn pivot_is_tagged_when_chosen() {
        let trace = quick_sort(&[3, 1, 2]).unwrap();
        let Some(Snapshot::Array(step)) = trace.get(1) else { panic!("missing step 1") };

        assert_eq!(step.message, "Pivot is 2");
        assert_eq!(step.indices_tagged(ElementTag::Pivot), vec![2]);
    }

    #[test]
    fn placed_pivot_becomes_sorted() {
        let trace = quick_sort(&[3, 1, 2]).unwrap();
        let placed = trace.iter().find(|s| s.message() == "2 is in its final position").unwrap();
        let Snapshot::Array(step) = placed else { panic!("expected array snapshot") };

        assert_eq!(step.values()[1], 2);
        assert_eq!(step.elements[1].tag, ElementTag::Sorted);
    }

    #[test]
    fn already_sorted_and_duplicates() {
        assert_well_formed(&quick_sort(&[1, 2, 3, 4, 5]).unwrap(), &[1, 2, 3, 4, 5]);
        assert_well_formed(&quick_sort(&[5, 5, 5]).unwrap(), &[5, 5, 5]);
    }
}
