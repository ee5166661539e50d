use std::cmp::Ordering;

use stepwise_core::{Trace, TraceError};

use crate::recorder::ArrayRecorder;

/// Insertion sort by adjacent swaps.
///
/// The growing prefix is only relatively ordered, so no slot is final until
/// the last element has been inserted.
pub fn insertion_sort(values: &[i64]) -> Result<Trace, TraceError> {
    let mut rec = ArrayRecorder::new("insertion-sort", values)?;

    for i in 1..rec.len() {
        let mut j = i;
        while j > 0 && rec.compare(j - 1, j) == Ordering::Greater {
            rec.swap(j - 1, j);
            j -= 1;
        }
    }
    rec.sweep_sorted();

    rec.finish()
}
