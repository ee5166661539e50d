use std::cmp::Ordering;

use stepwise_core::{Trace, TraceError};

use crate::recorder::ArrayRecorder;

/// Top-down merge sort.
///
/// Merging happens in place so every snapshot shows one coherent array: when
/// the head of the right run is smaller than the left cursor it is moved in
/// front of it as a single event.
pub fn merge_sort(values: &[i64]) -> Result<Trace, TraceError> {
    let mut rec = ArrayRecorder::new("merge-sort", values)?;
    let n = rec.len();

    sort_range(&mut rec, 0, n);
    rec.sweep_sorted();

    rec.finish()
}

fn sort_range(rec: &mut ArrayRecorder, lo: usize, hi: usize) {
    if hi - lo < 2 {
        return;
    }

    let mid = lo + (hi - lo) / 2;
    rec.split(lo, mid, hi);
    sort_range(rec, lo, mid);
    sort_range(rec, mid, hi);
    merge(rec, lo, mid, hi);
}

/// Merge sorted runs `lo..mid` and `mid..hi`.
fn merge(rec: &mut ArrayRecorder, lo: usize, mut mid: usize, hi: usize) {
    let mut i = lo;
    while i < mid && mid < hi {
        if rec.compare(i, mid) == Ordering::Greater {
            rec.shift(mid, i);
            mid += 1;
        }
        i += 1;
    }
}
