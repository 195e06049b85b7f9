//! Run lifecycle — not-run and completed states
//!
//! The reference semantics here come with two soft preconditions: results
//! may only be queried after the run, and a second run requires a reset.
//! Both are enforced by the type system instead of by convention:
//! [`SortRun`] has no result accessors, and [`SortRun::run`] consumes it,
//! yielding a [`CompletedSort`] whose trace is already sealed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AlgoTraceError, Result};
use crate::summary::SortSummary;
use crate::trace::{ActionKind, Recorder, Trace, Value};

use super::{Category, SortStrategy};

/// Statistics for one completed run
///
/// `comparisons` and `swaps` are counted off the trace, so they agree with
/// the event log by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SortStats {
    /// Completed outer passes
    pub passes: u32,

    /// Compare events recorded
    pub comparisons: u64,

    /// Swap events recorded
    pub swaps: u64,

    /// Duration of the run in seconds, monotonic clock
    pub total_time: f64,
}

/// An algorithm that has not run yet
///
/// Owns a private copy of the caller's input (never aliasing caller memory)
/// and the pristine before-snapshot captured at construction.
#[derive(Debug, Clone)]
pub struct SortRun<S, T> {
    strategy: S,
    array: Vec<T>,
    before: Vec<T>,
}

impl<S, T> SortRun<S, T>
where
    S: SortStrategy<T>,
    T: Value,
{
    /// Create a run over a private copy of `input`
    ///
    /// Fails with [`AlgoTraceError::EmptyInput`] for a zero-length buffer.
    pub fn new(strategy: S, input: &[T]) -> Result<Self> {
        if input.is_empty() {
            return Err(AlgoTraceError::EmptyInput);
        }
        Ok(Self {
            strategy,
            array: input.to_vec(),
            before: input.to_vec(),
        })
    }

    /// Name of the algorithm that will run
    pub fn algorithm(&self) -> &'static str {
        self.strategy.name()
    }

    /// The working buffer, untouched until `run`
    pub fn array(&self) -> &[T] {
        &self.array
    }

    /// Execute the algorithm synchronously to completion
    ///
    /// Mutates the working buffer, appending one event per semantic step,
    /// and returns the completed state carrying the sealed trace and run
    /// statistics.
    pub fn run(mut self) -> Result<CompletedSort<S, T>> {
        let mut recorder = Recorder::new(self.strategy.name());
        let passes = self.strategy.execute(&mut self.array, &mut recorder)?;

        let total_time = recorder.elapsed();
        let started_at = recorder.started_at();
        let trace = recorder.finish();

        let stats = SortStats {
            passes,
            comparisons: trace.count_kind(ActionKind::Compare) as u64,
            swaps: trace.count_kind(ActionKind::Swap) as u64,
            total_time,
        };

        tracing::debug!(
            algorithm = self.strategy.name(),
            events = trace.len(),
            passes = stats.passes,
            comparisons = stats.comparisons,
            swaps = stats.swaps,
            "run completed"
        );

        Ok(CompletedSort {
            strategy: self.strategy,
            before: self.before,
            array: self.array,
            trace,
            stats,
            started_at,
        })
    }
}

/// A completed run: sorted buffer, sealed trace, statistics
///
/// The only way to obtain one is [`SortRun::run`], so every accessor here
/// observes a finished run.
#[derive(Debug, Clone)]
pub struct CompletedSort<S, T> {
    strategy: S,
    before: Vec<T>,
    array: Vec<T>,
    trace: Trace<T>,
    stats: SortStats,
    started_at: DateTime<Utc>,
}

impl<S, T> CompletedSort<S, T>
where
    S: SortStrategy<T>,
    T: Value,
{
    /// Name of the algorithm that ran
    pub fn algorithm(&self) -> &'static str {
        self.strategy.name()
    }

    /// Category of the algorithm that ran
    pub fn category(&self) -> Category {
        self.strategy.category()
    }

    /// The buffer after the run — sorted ascending
    pub fn sorted(&self) -> &[T] {
        &self.array
    }

    /// The pristine input snapshot captured at construction
    pub fn before(&self) -> &[T] {
        &self.before
    }

    /// The sealed trace of this run
    pub fn trace(&self) -> &Trace<T> {
        &self.trace
    }

    /// Statistics for this run
    pub fn stats(&self) -> &SortStats {
        &self.stats
    }

    /// Wall-clock instant at which the run started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Build the immutable summary aggregate for this run
    pub fn summary(&self) -> SortSummary {
        SortSummary::from_completed(self)
    }

    /// Discard the trace and return to the not-run state over the original
    /// input
    pub fn reset(self) -> SortRun<S, T> {
        SortRun {
            strategy: self.strategy,
            array: self.before.clone(),
            before: self.before,
        }
    }

    /// Replace the input and return to the not-run state
    ///
    /// The old trace and statistics are discarded; the lifecycle starts
    /// over.
    pub fn with_input(self, input: &[T]) -> Result<SortRun<S, T>> {
        SortRun::new(self.strategy, input)
    }

    /// Consume the completed run, keeping only its trace
    pub fn into_trace(self) -> Trace<T> {
        self.trace
    }
}
