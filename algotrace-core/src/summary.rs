//! Run summaries
//!
//! A [`SortSummary`] is the immutable aggregate derived from a completed
//! run: it outlives the trace, serializes deterministically with a stable
//! field order, and can be compared directly in tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algo::{Category, CompletedSort, SortStrategy};
use crate::trace::Value;

/// Fraction of positions already holding their final sorted value
///
/// Defined for permutations of `1..=n`: the fraction of positions `i`
/// where the element's [`rank`](Value::rank) equals `i` (equivalently,
/// `array[i] == i + 1`). For non-permutation inputs the result is not
/// meaningful — a scope limitation of the metric, not of the engine.
pub fn presortedness<T: Value>(values: &[T]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let matching = values
        .iter()
        .enumerate()
        .filter(|(i, v)| v.rank() == Some(*i))
        .count();
    matching as f64 / values.len() as f64
}

/// Immutable post-run aggregate of one algorithm execution
///
/// Field order is the serialization and display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSummary {
    /// Category of the algorithm that ran
    pub category: Category,

    /// Name of the algorithm that ran
    pub algorithm: String,

    /// Number of elements in the buffer
    pub array_length: usize,

    /// Presortedness of the input before the run
    pub presortedness: f64,

    /// Duration of the run in seconds, monotonic clock
    pub total_time: f64,

    /// Completed outer passes
    pub total_iterations: u32,

    /// Compare events in the trace
    pub total_comparisons: u64,

    /// Swap events in the trace
    pub total_swaps: u64,

    /// Identifier of the trace this summary was derived from
    pub trace_id: String,

    /// Wall-clock instant at which the run started
    pub started_at: DateTime<Utc>,
}

impl SortSummary {
    /// Derive the summary from a completed run
    pub fn from_completed<S, T>(run: &CompletedSort<S, T>) -> Self
    where
        S: SortStrategy<T>,
        T: Value,
    {
        let stats = run.stats();
        Self {
            category: run.category(),
            algorithm: run.algorithm().to_string(),
            array_length: run.before().len(),
            presortedness: presortedness(run.before()),
            total_time: stats.total_time,
            total_iterations: stats.passes,
            total_comparisons: stats.comparisons,
            total_swaps: stats.swaps,
            trace_id: run.trace().trace_id().to_string(),
            started_at: run.started_at(),
        }
    }
}

impl std::fmt::Display for SortSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "category: {}, algorithm: {}, array length: {}, presortedness: {:.3}, \
             total time: {:.6}s, iterations: {}, comparisons: {}, swaps: {}",
            self.category,
            self.algorithm,
            self.array_length,
            self.presortedness,
            self.total_time,
            self.total_iterations,
            self.total_comparisons,
            self.total_swaps
        )
    }
}
