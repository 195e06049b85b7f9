//! Algorithm engine
//!
//! A [`SortStrategy`] is a deterministic procedure over a fixed-size buffer
//! of totally-ordered elements that narrates itself through a
//! [`Recorder`](crate::trace::Recorder). The engine owns the lifecycle
//! around it: [`SortRun`] holds the not-yet-run state (private buffer copy,
//! pristine before-snapshot), and running it produces a [`CompletedSort`] —
//! the only place trace and summary accessors exist. Querying results
//! before a run, or running twice without a reset, does not type-check.

mod bubble;
mod run;
mod selection;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::trace::{Recorder, Value};

pub use bubble::BubbleSort;
pub use run::{CompletedSort, SortRun, SortStats};
pub use selection::SelectionSort;

/// Closed set of algorithm categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Comparison/mutation-based sorting over an indexed buffer
    Sorting,
}

impl Category {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sorting => "sorting",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A deterministic sorting procedure that records every step it takes
///
/// `execute` sorts the buffer in place, synchronously to completion,
/// emitting events through the recorder as it goes: it calls
/// `begin_pass` at the top of each outer round and returns the number of
/// completed passes. Comparison and swap totals are not threaded through
/// the strategy — they are counted off the finished trace.
pub trait SortStrategy<T: Value> {
    /// Human-readable algorithm name
    fn name(&self) -> &'static str;

    /// Category tag for this algorithm
    fn category(&self) -> Category {
        Category::Sorting
    }

    /// Sort `buffer` ascending, narrating through `recorder`; returns the
    /// number of completed outer passes
    fn execute(&self, buffer: &mut [T], recorder: &mut Recorder<T>) -> Result<u32>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tag() {
        assert_eq!(Category::Sorting.as_str(), "sorting");
        assert_eq!(Category::Sorting.to_string(), "sorting");
    }
}
