//! Bubble sort
//!
//! The canonical recorded algorithm. Emission policy: per pass, exactly one
//! Compare per adjacent pair examined, followed immediately by a Swap
//! whenever that pair is out of order; the outer bound shrinks by one per
//! completed pass. Faithful O(n²) — no early exit on an already-sorted
//! prefix, so the trace shape depends only on the input values.

use std::cmp::Ordering;

use crate::error::Result;
use crate::trace::{Recorder, Value};

use super::SortStrategy;

/// Bubble sort over an indexed buffer
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

impl<T: Value> SortStrategy<T> for BubbleSort {
    fn name(&self) -> &'static str {
        "bubble sort"
    }

    fn execute(&self, buffer: &mut [T], recorder: &mut Recorder<T>) -> Result<u32> {
        let mut n = buffer.len();
        while n > 1 {
            recorder.begin_pass();
            for i in 0..n - 1 {
                if recorder.compare(buffer, i, i + 1)? == Ordering::Greater {
                    recorder.swap(buffer, i, i + 1)?;
                }
            }
            n -= 1;
        }
        Ok(recorder.pass())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::SortRun;
    use crate::trace::ActionKind;

    #[test]
    fn test_sorts_ascending() {
        let completed = SortRun::new(BubbleSort, &[3i64, 1, 4, 1, 5, 9, 2, 6])
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(completed.sorted(), &[1, 1, 2, 3, 4, 5, 6, 9]);
    }

    #[test]
    fn test_reversed_input_event_counts() {
        let completed = SortRun::new(BubbleSort, &[5i64, 4, 3, 2, 1])
            .unwrap()
            .run()
            .unwrap();

        // 4 + 3 + 2 + 1 adjacent pairs, every one out of order
        assert_eq!(completed.trace().count_kind(ActionKind::Compare), 10);
        assert_eq!(completed.trace().count_kind(ActionKind::Swap), 10);
        assert_eq!(completed.stats().passes, 4);
    }

    #[test]
    fn test_sorted_input_swaps_nothing() {
        let completed = SortRun::new(BubbleSort, &[1i64, 2, 3])
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(completed.trace().count_kind(ActionKind::Compare), 3);
        assert_eq!(completed.trace().count_kind(ActionKind::Swap), 0);
    }

    #[test]
    fn test_compare_precedes_each_swap() {
        let completed = SortRun::new(BubbleSort, &[2i64, 3, 1])
            .unwrap()
            .run()
            .unwrap();

        let events = completed.trace().events();
        for (i, event) in events.iter().enumerate() {
            if event.kind() == ActionKind::Swap {
                assert!(i > 0);
                assert_eq!(events[i - 1].kind(), ActionKind::Compare);
                assert_eq!(events[i - 1].iteration, event.iteration);
            }
        }
    }

    #[test]
    fn test_no_highlight_events() {
        let completed = SortRun::new(BubbleSort, &[4i64, 2, 3, 1])
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(completed.trace().count_kind(ActionKind::Highlight), 0);
    }

    #[test]
    fn test_duplicates_are_stable_under_compare_policy() {
        let completed = SortRun::new(BubbleSort, &[2i64, 2, 1])
            .unwrap()
            .run()
            .unwrap();

        // Equal neighbours are compared but never swapped
        assert_eq!(completed.sorted(), &[1, 2, 2]);
        assert_eq!(completed.trace().count_kind(ActionKind::Compare), 3);
        assert_eq!(completed.trace().count_kind(ActionKind::Swap), 2);
    }
}
