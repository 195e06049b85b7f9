//! Error types for AlgoTrace operations
//!
//! Each error variant has a stable error code (e.g. `EMPTY_INPUT`) for
//! programmatic handling and a category for grouping. There are no retries
//! and no partial-failure paths: a run is a single deterministic pass, and
//! every fault here is a caller error made before (or while) producing a
//! trace, or a consumer handing the replay machinery inconsistent data.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for AlgoTrace operations
pub type Result<T> = std::result::Result<T, AlgoTraceError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Input validation failed
    Validation,
    /// Recorded data violates a trace invariant
    Integrity,
    /// Serialization or other internal error
    Internal,
}

/// Errors that can occur while recording, verifying, or replaying a trace
#[derive(Error, Debug)]
pub enum AlgoTraceError {
    /// Algorithms require at least one element to operate on
    #[error("input buffer is empty: algorithms require at least one element")]
    EmptyInput,

    /// A recorded step referenced an index outside the working buffer
    #[error("index {index} out of bounds for buffer of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Compare and Swap steps act on two distinct positions
    #[error("paired indices must be distinct, got {index} twice")]
    IndicesNotDistinct { index: usize },

    /// The trace was sealed when an append was attempted
    #[error("trace is sealed: events can only be appended during a run")]
    TraceSealed,

    /// Verification found a trace that violates its invariants
    #[error("trace integrity failure: {reason}")]
    TraceIntegrity { reason: String },

    /// An event could not be decoded from its serialized form
    #[error("invalid trace event: {reason}")]
    InvalidTraceEvent { reason: String },

    /// Replay input does not match the trace being replayed
    #[error("replay mismatch at event {event_id}: {reason}")]
    ReplayMismatch { event_id: u64, reason: String },

    /// JSON serialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AlgoTraceError {
    /// Get the stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            AlgoTraceError::EmptyInput => "EMPTY_INPUT",
            AlgoTraceError::IndexOutOfBounds { .. } => "INDEX_OUT_OF_BOUNDS",
            AlgoTraceError::IndicesNotDistinct { .. } => "INDICES_NOT_DISTINCT",
            AlgoTraceError::TraceSealed => "TRACE_SEALED",
            AlgoTraceError::TraceIntegrity { .. } => "TRACE_INTEGRITY",
            AlgoTraceError::InvalidTraceEvent { .. } => "INVALID_TRACE_EVENT",
            AlgoTraceError::ReplayMismatch { .. } => "REPLAY_MISMATCH",
            AlgoTraceError::Serialization(_) => "SERIALIZATION",
        }
    }

    /// Get the category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            AlgoTraceError::EmptyInput
            | AlgoTraceError::IndexOutOfBounds { .. }
            | AlgoTraceError::IndicesNotDistinct { .. }
            | AlgoTraceError::TraceSealed
            | AlgoTraceError::InvalidTraceEvent { .. } => ErrorCategory::Validation,
            AlgoTraceError::TraceIntegrity { .. } | AlgoTraceError::ReplayMismatch { .. } => {
                ErrorCategory::Integrity
            }
            AlgoTraceError::Serialization(_) => ErrorCategory::Internal,
        }
    }
}
