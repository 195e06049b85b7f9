//! Execution trace core — record once, replay many times
//!
//! An algorithm runs exactly once; every semantically meaningful step is
//! captured as an ordered, typed [`Event`] in an append-only [`Trace`].
//! Consumers (animation, textual reporting, tests) replay the captured log
//! later and independently, never observing the algorithm live.
//!
//! ## Key properties
//!
//! - **Append-only**: events are added in execution order, never reordered
//!   or deleted, and the trace is sealed when the run completes
//! - **Gapless ids**: event ids are exactly `1..=len` in append order
//! - **Monotonic timing**: elapsed offsets come from a monotonic clock
//! - **Closed vocabulary**: Highlight, Compare, Swap — nothing else
//! - **Replayable**: folding the Swap events over the original input
//!   reconstructs the run without re-executing the algorithm
//! - **Diffable**: step-level comparison detects behavioral divergence
//!
//! ## Architecture
//!
//! ```text
//! Run (single writer)          After the run (any readers)
//! ───────────────────          ───────────────────────────
//! strategy ──► Recorder ──►    Trace (sealed) ──► iter()/digest()
//!              assigns ids,          │
//!              stamps clock,         ├──► TraceVerifier
//!              swaps + records       └──► ReplayEngine
//! ```

mod event;
mod log;
mod recorder;
mod replay;
mod verify;

pub use event::{ActionKind, Event, Pair, SortAction, Value};
pub use log::Trace;
pub use recorder::Recorder;
pub use replay::{
    DiffSummary, ReplayEngine, ReplayOutcome, ReplayStats, StepDifference, StepSummary, TraceDiff,
};
pub use verify::{TraceFault, TraceVerification, TraceVerifier};
