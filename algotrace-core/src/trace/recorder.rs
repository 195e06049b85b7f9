//! Trace recorder
//!
//! The [`Recorder`] is the single writer behind a trace: it assigns
//! contiguous event ids, stamps every step with the monotonic clock, tracks
//! the current outer pass, and validates indices on behalf of the producing
//! algorithm (events themselves perform no checks).
//!
//! Mutation and recording are one operation: [`Recorder::swap`] performs the
//! exchange it records, so a Swap event's before/after snapshots are
//! consistent with the buffer by construction.

use std::cmp::Ordering;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::error::{AlgoTraceError, Result};

use super::event::{Event, Value};
use super::log::Trace;

/// Single writer for one run's trace
#[derive(Debug)]
pub struct Recorder<T> {
    trace: Trace<T>,
    next_id: u64,
    pass: u32,
    start: Instant,
    started_at: DateTime<Utc>,
}

impl<T: Value> Recorder<T> {
    /// Create a recorder with an empty trace and start the run clock
    pub fn new(algorithm: &str) -> Self {
        Self {
            trace: Trace::new(algorithm),
            next_id: 1,
            pass: 0,
            start: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Seconds since the run started, on a monotonic clock
    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Wall-clock instant at which the run started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Current outer pass (0 until the first `begin_pass`)
    pub fn pass(&self) -> u32 {
        self.pass
    }

    /// Enter the next outer pass and return its 1-based number
    pub fn begin_pass(&mut self) -> u32 {
        self.pass += 1;
        self.pass
    }

    /// Record a Highlight of `buffer[index]`
    pub fn highlight(&mut self, buffer: &[T], index: usize) -> Result<()> {
        self.check_index(index, buffer.len())?;
        let event = Event::highlight(self.next_id, self.elapsed(), self.pass, buffer, index);
        self.push(event)
    }

    /// Record a Compare of `buffer[first]` against `buffer[second]` and
    /// return their ordering
    pub fn compare(&mut self, buffer: &[T], first: usize, second: usize) -> Result<Ordering> {
        self.check_pair(first, second, buffer.len())?;
        let event = Event::compare(self.next_id, self.elapsed(), self.pass, buffer, first, second);
        self.push(event)?;
        Ok(buffer[first].cmp(&buffer[second]))
    }

    /// Exchange `buffer[first]` and `buffer[second]` and record the Swap
    pub fn swap(&mut self, buffer: &mut [T], first: usize, second: usize) -> Result<()> {
        self.check_pair(first, second, buffer.len())?;
        let before = buffer.to_vec();
        buffer.swap(first, second);
        let after = buffer.to_vec();
        let event = Event::swap(
            self.next_id,
            self.elapsed(),
            self.pass,
            before,
            after,
            first,
            second,
        );
        self.push(event)
    }

    /// Seal and hand over the finished trace
    pub fn finish(mut self) -> Trace<T> {
        self.trace.seal();
        tracing::debug!(
            trace_id = %self.trace.trace_id(),
            events = self.trace.len(),
            passes = self.pass,
            "trace recording finished"
        );
        self.trace
    }

    fn push(&mut self, event: Event<T>) -> Result<()> {
        self.trace.append(event)?;
        self.next_id += 1;
        Ok(())
    }

    fn check_index(&self, index: usize, len: usize) -> Result<()> {
        if index >= len {
            return Err(AlgoTraceError::IndexOutOfBounds { index, len });
        }
        Ok(())
    }

    fn check_pair(&self, first: usize, second: usize, len: usize) -> Result<()> {
        self.check_index(first, len)?;
        self.check_index(second, len)?;
        if first == second {
            return Err(AlgoTraceError::IndicesNotDistinct { index: first });
        }
        Ok(())
    }
}
