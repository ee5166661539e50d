use std::cmp::Ordering;

use stepwise_core::{Trace, TraceError};

use crate::recorder::ArrayRecorder;

/// Bubble sort with early exit once a pass makes no swaps.
///
/// Each pass bubbles the largest unsorted value to the end, which is then
/// marked sorted. After an early exit the remaining prefix is swept.
pub fn bubble_sort(values: &[i64]) -> Result<Trace, TraceError> {
    let mut rec = ArrayRecorder::new("bubble-sort", values)?;
    let n = rec.len();

    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            if rec.compare(j, j + 1) == Ordering::Greater {
                rec.swap(j, j + 1);
                swapped = true;
            }
        }
        rec.mark_sorted(n - 1 - pass);

        if !swapped {
            break;
        }
    }
    rec.sweep_sorted();

    rec.finish()
}

#[cfg(test)]
mod tests {
    use stepwise_core::{ElementTag, Snapshot};

    use super::*;
    use crate::sort::test_support::{assert_well_formed, terminal};

    #[test]
    fn sorts_reference_input() {
        let input = [64, 34, 25, 12, 22, 11, 90];
        let trace = bubble_sort(&input).unwrap();

        let (values, tags) = terminal(&trace);
        assert_eq!(values, vec![11, 12, 22, 25, 34, 64, 90]);
        assert!(tags.iter().all(|t| *t == ElementTag::Sorted));
        assert_well_formed(&trace, &input);
    }

    #[test]
    fn first_event_compares_first_pair() {
        let trace = bubble_sort(&[64, 34, 25]).unwrap();
        let Some(Snapshot::Array(step)) = trace.get(1) else { panic!("missing step 1") };

        assert_eq!(step.indices_tagged(ElementTag::Comparing), vec![0, 1]);
        assert_eq!(step.message, "Comparing 64 and 34");
    }

    #[test]
    fn sorted_input_exits_after_one_pass() {
        let trace = bubble_sort(&[1, 2, 3, 4]).unwrap();
        // initial + 3 comparisons + 4 sorted marks
        assert_eq!(trace.len(), 8);
        assert_well_formed(&trace, &[1, 2, 3, 4]);
    }

    #[test]
    fn single_element() {
        let trace = bubble_sort(&[7]).unwrap();
        assert_eq!(trace.len(), 2);
        assert_well_formed(&trace, &[7]);
    }

    #[test]
    fn empty_input_fails() {
        assert!(matches!(bubble_sort(&[]), Err(TraceError::EmptyInput { .. })));
    }
}
