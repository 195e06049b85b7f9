//! Selection sort
//!
//! Exercises the full action vocabulary: the running minimum is highlighted
//! each time it changes, every candidate is compared against it, and each
//! pass ends with at most one swap (only when the minimum moved).

use std::cmp::Ordering;

use crate::error::Result;
use crate::trace::{Recorder, Value};

use super::SortStrategy;

/// Selection sort over an indexed buffer
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

impl<T: Value> SortStrategy<T> for SelectionSort {
    fn name(&self) -> &'static str {
        "selection sort"
    }

    fn execute(&self, buffer: &mut [T], recorder: &mut Recorder<T>) -> Result<u32> {
        let n = buffer.len();
        for i in 0..n.saturating_sub(1) {
            recorder.begin_pass();
            let mut min = i;
            recorder.highlight(buffer, min)?;
            for j in i + 1..n {
                if recorder.compare(buffer, min, j)? == Ordering::Greater {
                    min = j;
                    recorder.highlight(buffer, min)?;
                }
            }
            if min != i {
                recorder.swap(buffer, i, min)?;
            }
        }
        Ok(recorder.pass())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::SortRun;
    use crate::trace::{ActionKind, ReplayEngine, SortAction};

    #[test]
    fn test_sorts_ascending() {
        let completed = SortRun::new(SelectionSort, &[9i64, 1, 8, 2, 7, 3])
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(completed.sorted(), &[1, 2, 3, 7, 8, 9]);
    }

    #[test]
    fn test_comparison_count_is_quadratic() {
        let completed = SortRun::new(SelectionSort, &[4i64, 3, 2, 1])
            .unwrap()
            .run()
            .unwrap();

        // n(n-1)/2 comparisons regardless of input order
        assert_eq!(completed.trace().count_kind(ActionKind::Compare), 6);
        assert_eq!(completed.stats().passes, 3);
    }

    #[test]
    fn test_at_most_one_swap_per_pass() {
        let completed = SortRun::new(SelectionSort, &[5i64, 4, 3, 2, 1])
            .unwrap()
            .run()
            .unwrap();

        let swaps = completed.trace().count_kind(ActionKind::Swap);
        assert!(swaps <= completed.stats().passes as usize);
    }

    #[test]
    fn test_highlights_track_running_minimum() {
        let completed = SortRun::new(SelectionSort, &[3i64, 1, 2])
            .unwrap()
            .run()
            .unwrap();

        // Pass 1 highlights slot 0 (value 3) then slot 1 (value 1)
        let highlights: Vec<(usize, i64)> = completed
            .trace()
            .iter()
            .filter_map(|e| match &e.action {
                SortAction::Highlight { index, element, .. } => Some((*index, *element)),
                _ => None,
            })
            .collect();
        assert_eq!(highlights[0], (0, 3));
        assert_eq!(highlights[1], (1, 1));
    }

    #[test]
    fn test_sorted_input_emits_no_swaps() {
        let completed = SortRun::new(SelectionSort, &[1i64, 2, 3, 4])
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(completed.trace().count_kind(ActionKind::Swap), 0);
    }

    #[test]
    fn test_trace_replays_to_sorted() {
        let input = vec![6i64, 5, 1, 4, 2, 3];
        let completed = SortRun::new(SelectionSort, &input).unwrap().run().unwrap();

        let outcome = ReplayEngine::new()
            .replay(completed.trace(), &input)
            .unwrap();
        assert_eq!(outcome.buffer, completed.sorted());
    }
}
