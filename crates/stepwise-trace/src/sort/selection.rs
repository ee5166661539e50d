use std::cmp::Ordering;

use stepwise_core::{Trace, TraceError};

use crate::recorder::ArrayRecorder;

/// Selection sort.
///
/// Scans the unsorted suffix for its minimum, swaps it into place and marks
/// that slot sorted.
pub fn selection_sort(values: &[i64]) -> Result<Trace, TraceError> {
    let mut rec = ArrayRecorder::new("selection-sort", values)?;
    let n = rec.len();

    for i in 0..n - 1 {
        let mut min = i;
        for j in i + 1..n {
            if rec.compare(j, min) == Ordering::Less {
                min = j;
            }
        }
        rec.swap(i, min);
        rec.mark_sorted(i);
    }
    rec.mark_sorted(n - 1);

    rec.finish()
}
