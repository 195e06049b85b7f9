//! Trace replay and diffing
//!
//! The replay engine consumes a completed trace without re-running the
//! algorithm that produced it: folding the Swap events over a copy of the
//! original input reconstructs every intermediate buffer and ends at the
//! sorted result. Replay is a pure function of the event stream.
//!
//! Diffing compares two traces step by step (wall-clock excluded), which is
//! how determinism is checked: re-running an algorithm over the same input
//! must yield a trace with no divergence from the first run.

use serde::{Deserialize, Serialize};

use crate::error::{AlgoTraceError, Result};

use super::event::{ActionKind, SortAction, Value};
use super::log::Trace;
use super::verify::TraceVerifier;

/// Outcome of replaying a trace against an input buffer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayOutcome<T> {
    /// The buffer after every Swap event has been applied
    pub buffer: Vec<T>,

    /// Per-kind event counts observed during replay
    pub stats: ReplayStats,
}

/// Event counts observed during replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayStats {
    /// Total events replayed
    pub total_events: usize,

    /// Highlight events seen
    pub highlights: usize,

    /// Compare events seen
    pub comparisons: usize,

    /// Swap events applied
    pub swaps: usize,
}

/// Step-level difference between two traces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceDiff {
    /// Whether the traces record the same run
    pub identical: bool,

    /// Positions where both traces hold a step but the steps differ
    pub differences: Vec<StepDifference>,

    /// Steps past the shorter trace's end, first trace only
    pub only_in_first: Vec<StepSummary>,

    /// Steps past the shorter trace's end, second trace only
    pub only_in_second: Vec<StepSummary>,

    /// Counts and divergence point
    pub summary: DiffSummary,
}

/// A step present in only one trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSummary {
    pub index: usize,
    pub id: u64,
    pub kind: ActionKind,
}

/// A step that differs between two traces, rendered for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDifference {
    pub index: usize,
    pub first: String,
    pub second: String,
}

/// Counts and divergence point for a trace diff
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DiffSummary {
    pub first_count: usize,
    pub second_count: usize,
    pub common_prefix_length: usize,
    pub divergence_point: Option<usize>,
}

/// Trace replay engine
pub struct ReplayEngine {
    verify: bool,
}

impl ReplayEngine {
    /// Create an engine that verifies trace invariants before replaying
    pub fn new() -> Self {
        Self { verify: true }
    }

    /// Create an engine that replays without the verification gate
    ///
    /// Replay still cross-checks every Swap's before-snapshot against the
    /// reconstructed buffer.
    pub fn unverified() -> Self {
        Self { verify: false }
    }

    /// Replay a trace against a copy of the input it was recorded over
    ///
    /// Applies Swap events in order; Highlight and Compare are counted but
    /// do not touch the buffer. For a trace recorded over `input`, the
    /// returned buffer is `input` sorted ascending.
    pub fn replay<T: Value>(&self, trace: &Trace<T>, input: &[T]) -> Result<ReplayOutcome<T>> {
        if self.verify {
            let verification = TraceVerifier::verify(trace);
            if !verification.is_valid {
                return Err(AlgoTraceError::TraceIntegrity {
                    reason: verification
                        .message
                        .unwrap_or_else(|| "trace verification failed".to_string()),
                });
            }
        }

        if let Some(first) = trace.events().first() {
            if first.buffer_len() != input.len() {
                return Err(AlgoTraceError::ReplayMismatch {
                    event_id: first.id,
                    reason: format!(
                        "trace was recorded over {} elements, input has {}",
                        first.buffer_len(),
                        input.len()
                    ),
                });
            }
        }

        let mut buffer = input.to_vec();
        let mut stats = ReplayStats::default();

        for event in trace.iter() {
            stats.total_events += 1;
            match &event.action {
                SortAction::Highlight { .. } => stats.highlights += 1,
                SortAction::Compare { .. } => stats.comparisons += 1,
                SortAction::Swap {
                    indices,
                    before,
                    after,
                    ..
                } => {
                    if indices.first >= buffer.len() || indices.second >= buffer.len() {
                        return Err(AlgoTraceError::ReplayMismatch {
                            event_id: event.id,
                            reason: format!(
                                "swap indices {} out of bounds for {} elements",
                                indices,
                                buffer.len()
                            ),
                        });
                    }
                    if before != &buffer {
                        return Err(AlgoTraceError::ReplayMismatch {
                            event_id: event.id,
                            reason: "swap before-snapshot disagrees with replayed buffer"
                                .to_string(),
                        });
                    }
                    buffer.swap(indices.first, indices.second);
                    if after != &buffer {
                        return Err(AlgoTraceError::ReplayMismatch {
                            event_id: event.id,
                            reason: "swap after-snapshot disagrees with replayed buffer"
                                .to_string(),
                        });
                    }
                    stats.swaps += 1;
                }
            }
        }

        tracing::debug!(
            trace_id = %trace.trace_id(),
            events = stats.total_events,
            swaps = stats.swaps,
            "trace replayed"
        );

        Ok(ReplayOutcome { buffer, stats })
    }

    /// Compare two traces step by step
    pub fn diff<T: Value>(&self, first: &Trace<T>, second: &Trace<T>) -> TraceDiff {
        let events_a = first.events();
        let events_b = second.events();
        let min_len = events_a.len().min(events_b.len());

        let divergence = TraceVerifier::find_divergence(first, second);
        let common_prefix_length = divergence.unwrap_or(min_len);

        let differences: Vec<StepDifference> = (common_prefix_length..min_len)
            .filter(|i| !events_a[*i].same_step(&events_b[*i]))
            .map(|i| StepDifference {
                index: i,
                first: events_a[i].to_string(),
                second: events_b[i].to_string(),
            })
            .collect();

        let only_in_first: Vec<StepSummary> = events_a
            .iter()
            .enumerate()
            .skip(min_len)
            .map(|(i, e)| StepSummary {
                index: i,
                id: e.id,
                kind: e.kind(),
            })
            .collect();

        let only_in_second: Vec<StepSummary> = events_b
            .iter()
            .enumerate()
            .skip(min_len)
            .map(|(i, e)| StepSummary {
                index: i,
                id: e.id,
                kind: e.kind(),
            })
            .collect();

        let identical =
            differences.is_empty() && only_in_first.is_empty() && only_in_second.is_empty();

        TraceDiff {
            identical,
            differences,
            only_in_first,
            only_in_second,
            summary: DiffSummary {
                first_count: events_a.len(),
                second_count: events_b.len(),
                common_prefix_length,
                divergence_point: divergence,
            },
        }
    }
}

impl Default for ReplayEngine {
    fn default() -> Self {
        Self::new()
    }
}
