use std::cmp::Ordering;

use stepwise_core::{Trace, TraceError};

use crate::recorder::ArrayRecorder;

/// Heap sort over an implicit max-heap.
///
/// The value being sifted down carries the `Pivot` tag. Each extraction moves
/// the root to the end of the heap, where it is marked sorted.
pub fn heap_sort(values: &[i64]) -> Result<Trace, TraceError> {
    let mut rec = ArrayRecorder::new("heap-sort", values)?;
    let n = rec.len();

    for root in (0..n / 2).rev() {
        sift_down(&mut rec, root, n);
    }

    for end in (1..n).rev() {
        rec.swap(0, end);
        rec.mark_sorted(end);
        sift_down(&mut rec, 0, end);
    }
    rec.mark_sorted(0);

    rec.finish()
}

/// Restore the heap property below `root` within `0..end`.
///
/// A root without children records nothing.
fn sift_down(rec: &mut ArrayRecorder, mut root: usize, end: usize) {
    if 2 * root + 1 >= end {
        return;
    }

    let value = rec.value(root);
    rec.focus(root, format!("Sifting down {value}"));

    loop {
        let left = 2 * root + 1;
        if left >= end {
            break;
        }

        let right = left + 1;
        let child =
            if right < end && rec.compare(right, left) == Ordering::Greater { right } else { left };

        if rec.compare(child, root) == Ordering::Greater {
            rec.swap(root, child);
            root = child;
        } else {
            break;
        }
    }

    rec.release_focus();
}
