//! Trace invariant verification
//!
//! Post-hoc integrity checking for a recorded trace. The recorder already
//! guarantees these invariants for traces it produces; the verifier exists
//! for traces that crossed a serialization boundary, and as the gate the
//! replay engine runs before trusting a trace.
//!
//! Checks, in order per event:
//! 1. ids form exactly `1..=len` in append order
//! 2. elapsed time is non-negative and non-decreasing
//! 3. the pass counter never decreases
//! 4. every snapshot has the same buffer length
//! 5. indices are in bounds and paired indices distinct
//! 6. recorded elements match their snapshots
//! 7. a Swap's snapshots are exchanged at exactly the swapped positions

use serde::{Deserialize, Serialize};

use super::event::{Event, SortAction, Value};
use super::log::Trace;

/// Result of verifying a trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceVerification {
    /// Whether the trace upholds every invariant
    pub is_valid: bool,

    /// Total number of events checked
    pub event_count: usize,

    /// Index of the first invalid event (if any)
    pub first_invalid_index: Option<usize>,

    /// Kind of fault if the trace is invalid
    pub fault: Option<TraceFault>,

    /// Human-readable fault message
    pub message: Option<String>,
}

impl TraceVerification {
    /// Create a valid verification result
    pub fn valid(event_count: usize) -> Self {
        Self {
            is_valid: true,
            event_count,
            first_invalid_index: None,
            fault: None,
            message: None,
        }
    }

    /// Create an invalid verification result
    pub fn invalid(event_count: usize, index: usize, fault: TraceFault, message: String) -> Self {
        Self {
            is_valid: false,
            event_count,
            first_invalid_index: Some(index),
            fault: Some(fault),
            message: Some(message),
        }
    }
}

/// Kinds of trace invariant faults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceFault {
    /// Event id is not its 1-based position in the trace
    IdMismatch,
    /// Elapsed time is negative or decreased
    TimeRegression,
    /// Pass counter decreased
    IterationRegression,
    /// Snapshot length differs from the rest of the trace
    SnapshotLengthMismatch,
    /// An index lies outside the buffer
    IndexOutOfBounds,
    /// A paired index appears twice
    IndicesNotDistinct,
    /// A recorded element disagrees with its snapshot
    ElementMismatch,
    /// Swap snapshots are not an exchange at the swapped positions
    SwapInconsistent,
}

impl std::fmt::Display for TraceFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TraceFault::IdMismatch => "id_mismatch",
            TraceFault::TimeRegression => "time_regression",
            TraceFault::IterationRegression => "iteration_regression",
            TraceFault::SnapshotLengthMismatch => "snapshot_length_mismatch",
            TraceFault::IndexOutOfBounds => "index_out_of_bounds",
            TraceFault::IndicesNotDistinct => "indices_not_distinct",
            TraceFault::ElementMismatch => "element_mismatch",
            TraceFault::SwapInconsistent => "swap_inconsistent",
        };
        write!(f, "{}", name)
    }
}

/// Trace invariant verifier
pub struct TraceVerifier;

impl TraceVerifier {
    /// Verify every invariant over a trace, reporting the first fault
    pub fn verify<T: Value>(trace: &Trace<T>) -> TraceVerification {
        let events = trace.events();
        if events.is_empty() {
            return TraceVerification::valid(0);
        }

        let buffer_len = events[0].buffer_len();
        let mut last_elapsed = 0.0f64;
        let mut last_iteration = 0u32;

        for (i, event) in events.iter().enumerate() {
            let expected_id = (i + 1) as u64;
            if event.id != expected_id {
                return TraceVerification::invalid(
                    events.len(),
                    i,
                    TraceFault::IdMismatch,
                    format!("event {} has id {}, expected {}", i, event.id, expected_id),
                );
            }

            if event.elapsed < 0.0 || event.elapsed < last_elapsed {
                return TraceVerification::invalid(
                    events.len(),
                    i,
                    TraceFault::TimeRegression,
                    format!(
                        "event {} elapsed {} regressed below {}",
                        i, event.elapsed, last_elapsed
                    ),
                );
            }

            if event.iteration < last_iteration {
                return TraceVerification::invalid(
                    events.len(),
                    i,
                    TraceFault::IterationRegression,
                    format!(
                        "event {} iteration {} regressed below {}",
                        i, event.iteration, last_iteration
                    ),
                );
            }

            if event.buffer_len() != buffer_len {
                return TraceVerification::invalid(
                    events.len(),
                    i,
                    TraceFault::SnapshotLengthMismatch,
                    format!(
                        "event {} snapshot length {} differs from {}",
                        i,
                        event.buffer_len(),
                        buffer_len
                    ),
                );
            }

            if let Some(result) = Self::check_action(event, i, events.len(), buffer_len) {
                return result;
            }

            last_elapsed = event.elapsed;
            last_iteration = event.iteration;
        }

        TraceVerification::valid(events.len())
    }

    fn check_action<T: Value>(
        event: &Event<T>,
        index: usize,
        event_count: usize,
        buffer_len: usize,
    ) -> Option<TraceVerification> {
        let invalid = |fault, message| {
            Some(TraceVerification::invalid(
                event_count,
                index,
                fault,
                message,
            ))
        };

        match &event.action {
            SortAction::Highlight {
                index: at,
                element,
                array,
            } => {
                if *at >= buffer_len {
                    return invalid(
                        TraceFault::IndexOutOfBounds,
                        format!("highlight index {} out of bounds for {}", at, buffer_len),
                    );
                }
                if array[*at] != *element {
                    return invalid(
                        TraceFault::ElementMismatch,
                        format!(
                            "highlight element {} disagrees with snapshot value {}",
                            element, array[*at]
                        ),
                    );
                }
            }
            SortAction::Compare {
                indices,
                elements,
                array,
            } => {
                if indices.first >= buffer_len || indices.second >= buffer_len {
                    return invalid(
                        TraceFault::IndexOutOfBounds,
                        format!("compare indices {} out of bounds for {}", indices, buffer_len),
                    );
                }
                if !indices.is_distinct() {
                    return invalid(
                        TraceFault::IndicesNotDistinct,
                        format!("compare indices {} are not distinct", indices),
                    );
                }
                if array[indices.first] != elements.first || array[indices.second] != elements.second
                {
                    return invalid(
                        TraceFault::ElementMismatch,
                        format!("compare elements {} disagree with snapshot", elements),
                    );
                }
            }
            SortAction::Swap {
                indices,
                elements,
                before,
                after,
            } => {
                if indices.first >= buffer_len || indices.second >= buffer_len {
                    return invalid(
                        TraceFault::IndexOutOfBounds,
                        format!("swap indices {} out of bounds for {}", indices, buffer_len),
                    );
                }
                if !indices.is_distinct() {
                    return invalid(
                        TraceFault::IndicesNotDistinct,
                        format!("swap indices {} are not distinct", indices),
                    );
                }
                if after.len() != before.len() {
                    return invalid(
                        TraceFault::SnapshotLengthMismatch,
                        format!(
                            "swap after length {} differs from before length {}",
                            after.len(),
                            before.len()
                        ),
                    );
                }
                if after[indices.first] != before[indices.second]
                    || after[indices.second] != before[indices.first]
                {
                    return invalid(
                        TraceFault::SwapInconsistent,
                        format!("swap at {} is not an exchange of the snapshots", indices),
                    );
                }
                let untouched_changed = (0..buffer_len)
                    .filter(|p| *p != indices.first && *p != indices.second)
                    .any(|p| before[p] != after[p]);
                if untouched_changed {
                    return invalid(
                        TraceFault::SwapInconsistent,
                        format!("swap at {} changed positions outside the pair", indices),
                    );
                }
                if elements.first != after[indices.first] || elements.second != after[indices.second]
                {
                    return invalid(
                        TraceFault::ElementMismatch,
                        format!("swap elements {} disagree with the after snapshot", elements),
                    );
                }
            }
        }

        None
    }

    /// Find the point where two traces diverge
    ///
    /// Steps are compared structurally (wall-clock excluded). Returns the
    /// index of the first differing step, or `None` if the traces record
    /// the same run.
    pub fn find_divergence<T: Value>(a: &Trace<T>, b: &Trace<T>) -> Option<usize> {
        let events_a = a.events();
        let events_b = b.events();
        let min_len = events_a.len().min(events_b.len());

        for i in 0..min_len {
            if !events_a[i].same_step(&events_b[i]) {
                return Some(i);
            }
        }

        if events_a.len() != events_b.len() {
            Some(min_len)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::event::Pair;
    use crate::trace::recorder::Recorder;

    fn recorded_trace() -> Trace<i64> {
        let mut recorder = Recorder::new("bubble sort");
        let mut buffer = vec![3i64, 1, 2];

        recorder.begin_pass();
        recorder.compare(&buffer, 0, 1).unwrap();
        recorder.swap(&mut buffer, 0, 1).unwrap();
        recorder.compare(&buffer, 1, 2).unwrap();
        recorder.swap(&mut buffer, 1, 2).unwrap();
        recorder.begin_pass();
        recorder.compare(&buffer, 0, 1).unwrap();

        recorder.finish()
    }

    #[test]
    fn test_recorded_trace_verifies() {
        let trace = recorded_trace();
        let result = TraceVerifier::verify(&trace);

        assert!(result.is_valid);
        assert_eq!(result.event_count, 5);
        assert!(result.fault.is_none());
    }

    #[test]
    fn test_empty_trace_is_valid() {
        let trace: Trace<i64> = Trace::new("bubble sort");
        assert!(TraceVerifier::verify(&trace).is_valid);
    }

    #[test]
    fn test_detect_id_gap() {
        let trace = recorded_trace();
        let mut events: Vec<_> = trace.events().to_vec();
        events[2].id = 7;

        let mut tampered = Trace::new("bubble sort");
        for event in events {
            tampered.append(event).unwrap();
        }

        let result = TraceVerifier::verify(&tampered);
        assert!(!result.is_valid);
        assert_eq!(result.first_invalid_index, Some(2));
        assert_eq!(result.fault, Some(TraceFault::IdMismatch));
    }

    #[test]
    fn test_detect_time_regression() {
        let trace = recorded_trace();
        let mut events: Vec<_> = trace.events().to_vec();
        events[3].elapsed = -0.5;

        let mut tampered = Trace::new("bubble sort");
        for event in events {
            tampered.append(event).unwrap();
        }

        let result = TraceVerifier::verify(&tampered);
        assert!(!result.is_valid);
        assert_eq!(result.fault, Some(TraceFault::TimeRegression));
    }

    #[test]
    fn test_detect_iteration_regression() {
        let trace = recorded_trace();
        let mut events: Vec<_> = trace.events().to_vec();
        events[4].iteration = 0;

        let mut tampered = Trace::new("bubble sort");
        for event in events {
            tampered.append(event).unwrap();
        }

        let result = TraceVerifier::verify(&tampered);
        assert!(!result.is_valid);
        assert_eq!(result.first_invalid_index, Some(4));
        assert_eq!(result.fault, Some(TraceFault::IterationRegression));
    }

    #[test]
    fn test_detect_tampered_swap() {
        let trace = recorded_trace();
        let mut events: Vec<_> = trace.events().to_vec();
        if let SortAction::Swap { after, .. } = &mut events[1].action {
            after[2] = 99;
        } else {
            panic!("expected swap at index 1");
        }

        let mut tampered = Trace::new("bubble sort");
        for event in events {
            tampered.append(event).unwrap();
        }

        let result = TraceVerifier::verify(&tampered);
        assert!(!result.is_valid);
        assert_eq!(result.first_invalid_index, Some(1));
        assert_eq!(result.fault, Some(TraceFault::SwapInconsistent));
    }

    #[test]
    fn test_detect_compare_element_mismatch() {
        let trace = recorded_trace();
        let mut events: Vec<_> = trace.events().to_vec();
        if let SortAction::Compare { elements, .. } = &mut events[0].action {
            *elements = Pair::new(42, 41);
        } else {
            panic!("expected compare at index 0");
        }

        let mut tampered = Trace::new("bubble sort");
        for event in events {
            tampered.append(event).unwrap();
        }

        let result = TraceVerifier::verify(&tampered);
        assert!(!result.is_valid);
        assert_eq!(result.fault, Some(TraceFault::ElementMismatch));
    }

    #[test]
    fn test_find_divergence() {
        let a = recorded_trace();
        let b = recorded_trace();

        // Same steps, different wall-clock offsets
        assert!(TraceVerifier::find_divergence(&a, &b).is_none());

        let mut events: Vec<_> = a.events().to_vec();
        events[2] = Event::compare(3, 0.0, 1, &[1i64, 3, 2], 0, 2);
        let mut c = Trace::new("bubble sort");
        for event in events {
            c.append(event).unwrap();
        }

        assert_eq!(TraceVerifier::find_divergence(&a, &c), Some(2));
    }
}
