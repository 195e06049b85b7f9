//! # AlgoTrace Core
//!
//! AlgoTrace records algorithm executions as replayable traces:
//!
//! - **Trace**: an append-only, ordered log of typed events, sealed when
//!   the producing run completes
//! - **Recorder**: the single writer — assigns gapless ids, stamps a
//!   monotonic clock, and performs the mutations it records
//! - **Engine**: the run lifecycle; a not-run algorithm is consumed by
//!   `run()` and yields the completed state that exposes trace and summary
//! - **Replay**: consumes a completed trace deterministically, without
//!   re-running the algorithm
//!
//! ## Core principle
//!
//! > Execute once, replay many times.
//!
//! A consumer (renderer, reporter, test) never observes the algorithm
//! live; it replays history.
//!
//! ## Example
//!
//! ```rust
//! use algotrace_core::{BubbleSort, ReplayEngine, SortRun};
//!
//! // Run bubble sort over a private copy of the input, recording a trace
//! let input = vec![5i64, 4, 3, 2, 1];
//! let completed = SortRun::new(BubbleSort, &input).unwrap().run().unwrap();
//! assert_eq!(completed.sorted(), &[1, 2, 3, 4, 5]);
//!
//! // Replaying the Swap events reconstructs the run from the input alone
//! let outcome = ReplayEngine::new()
//!     .replay(completed.trace(), &input)
//!     .unwrap();
//! assert_eq!(outcome.buffer, completed.sorted());
//!
//! // The summary agrees with the trace by construction
//! let summary = completed.summary();
//! assert_eq!(summary.total_comparisons, 10);
//! assert_eq!(summary.total_swaps, 10);
//! assert_eq!(summary.presortedness, 0.2);
//! ```

pub mod algo;
pub mod error;
pub mod summary;
pub mod trace;

// Re-export main types
pub use algo::{
    BubbleSort, Category, CompletedSort, SelectionSort, SortRun, SortStats, SortStrategy,
};
pub use error::{AlgoTraceError, ErrorCategory, Result};
pub use summary::{presortedness, SortSummary};
pub use trace::{
    ActionKind, Event, Pair, Recorder, ReplayEngine, ReplayOutcome, ReplayStats, SortAction,
    Trace, TraceDiff, TraceFault, TraceVerification, TraceVerifier, Value,
};
