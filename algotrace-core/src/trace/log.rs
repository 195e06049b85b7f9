//! The append-only trace log
//!
//! A [`Trace`] owns the ordered event log for one run. It is created empty,
//! populated by a single writer while the run executes, and sealed when the
//! run completes. After sealing it only hands out shared references, so any
//! number of independent readers can iterate it.
//!
//! Events live in an arena-style vector addressed by position; neighbouring
//! steps are index arithmetic, not pointers.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::{AlgoTraceError, Result};

use super::event::{ActionKind, Event, Value};

/// Append-only ordered log of events for one run
///
/// The trace does not assign event ids; the recorder supplies contiguous,
/// already-correct ids. The trace enforces the seal: once a run completes,
/// further appends are an error rather than a convention violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace<T> {
    /// Identifier for this recording, fresh per run
    trace_id: String,

    /// Name of the producing algorithm
    algorithm: String,

    /// The recorded events in append order
    events: Vec<Event<T>>,

    /// Whether the producing run has completed
    sealed: bool,
}

impl<T: Value> Trace<T> {
    /// Create an empty, unsealed trace
    pub fn new(algorithm: &str) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string(),
            algorithm: algorithm.to_string(),
            events: Vec::new(),
            sealed: false,
        }
    }

    /// Identifier of this recording
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Name of the producing algorithm
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Append an event; legal only while the trace is not sealed
    pub fn append(&mut self, event: Event<T>) -> Result<()> {
        if self.sealed {
            return Err(AlgoTraceError::TraceSealed);
        }
        self.events.push(event);
        Ok(())
    }

    /// Seal the trace; appends fail from here on
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Whether the producing run has completed
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events have been recorded
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Restartable forward iteration over the events
    pub fn iter(&self) -> std::slice::Iter<'_, Event<T>> {
        self.events.iter()
    }

    /// The events as a slice
    pub fn events(&self) -> &[Event<T>] {
        &self.events
    }

    /// Last recorded event, if any
    pub fn last(&self) -> Option<&Event<T>> {
        self.events.last()
    }

    /// Count events of one action kind
    pub fn count_kind(&self, kind: ActionKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    /// Reset to empty and unseal, under a fresh trace id
    ///
    /// Used only when the producing algorithm's input is being replaced
    /// before a new run.
    pub fn clear(&mut self) {
        self.trace_id = Uuid::new_v4().to_string();
        self.events.clear();
        self.sealed = false;
    }

    /// Hex SHA-256 digest of the step content
    ///
    /// Covers id, iteration, and action of every event in order; elapsed
    /// wall-clock offsets are excluded, so two runs of the same
    /// deterministic algorithm over the same input digest equal.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for event in &self.events {
            hasher.update(event.canonical_step().as_bytes());
            hasher.update(b"\n");
        }
        hex::encode(hasher.finalize())
    }

    /// Export the event log as JSON Lines
    pub fn to_jsonl(&self) -> Result<String> {
        let mut lines = Vec::with_capacity(self.events.len());
        for event in &self.events {
            lines.push(serde_json::to_string(event)?);
        }
        Ok(lines.join("\n"))
    }

    /// Import a sealed trace from JSON Lines
    pub fn from_jsonl(algorithm: &str, jsonl: &str) -> Result<Self> {
        let mut trace = Self::new(algorithm);
        for line in jsonl.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let event: Event<T> =
                serde_json::from_str(line).map_err(|e| AlgoTraceError::InvalidTraceEvent {
                    reason: e.to_string(),
                })?;
            trace.events.push(event);
        }
        trace.sealed = true;
        Ok(trace)
    }
}

impl<'a, T: Value> IntoIterator for &'a Trace<T> {
    type Item = &'a Event<T>;
    type IntoIter = std::slice::Iter<'a, Event<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
