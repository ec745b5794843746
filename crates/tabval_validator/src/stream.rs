//! Chunked stream orchestration.
//!
//! [`ValidationStream`] turns an unbounded CSV source into bounded-memory
//! validation work: it pulls one chunk of rows at a time, hands each chunk
//! to the engine with its global row offset, and yields the resulting
//! errors one by one as a finite, forward-only sequence.
//!
//! The sequence is never left malformed. Hitting the error cap stops
//! consumption exactly at the cap boundary; a fault after processing has
//! begun is absorbed into one terminal [`StreamFault`] item appended to
//! whatever was already yielded. Dropping the stream early (a disconnected
//! consumer) drops the underlying reader with it on every exit path.

use std::collections::VecDeque;
use std::io::Read;
use std::sync::Arc;

use tabval_core::{DataModel, Delimiter, StreamFault, StreamItem, ValidationError};

use crate::{RowBatch, ValidateError, engine};

/// Orchestrator state: `Streaming → {Capped | Failed} → Done`.
#[derive(Debug)]
enum State {
    /// Chunks are still being consumed
    Streaming,
    /// The error cap was reached; no further chunks are read
    Capped,
    /// A stream fault occurred; the terminal record is still to be yielded
    Failed(StreamFault),
    /// Terminal; the sequence is closed
    Done,
}

/// A lazy, finite, forward-only validation error sequence over a CSV
/// source. Not restartable.
pub struct ValidationStream<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
    columns: Vec<String>,
    model: Arc<DataModel>,
    chunk_size: usize,
    max_errors: Option<usize>,
    global_offset: u64,
    emitted: usize,
    pending: VecDeque<ValidationError>,
    state: State,
}

impl<R: Read> ValidationStream<R> {
    /// Opens a stream over `reader`.
    ///
    /// Performs the zero-row structural parse up front: the header is read
    /// and validated here, so an unparseable header or delimiter fails
    /// fast before anything is emitted.
    pub fn new(
        reader: R,
        delimiter: Delimiter,
        model: Arc<DataModel>,
        chunk_size: usize,
        max_errors: Option<usize>,
    ) -> Result<Self, ValidateError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter.as_byte())
            .has_headers(true)
            .from_reader(reader);

        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        Ok(Self {
            records: rdr.into_records(),
            columns,
            model,
            chunk_size: chunk_size.max(1),
            max_errors,
            global_offset: 0,
            emitted: 0,
            pending: VecDeque::new(),
            state: State::Streaming,
        })
    }

    /// Drives the stream to completion and returns the full sequence.
    ///
    /// The batch delivery mode: identical per-chunk logic, materialized
    /// instead of emitted incrementally.
    pub fn collect_all(self) -> Vec<StreamItem> {
        self.collect()
    }

    /// Number of errors yielded so far.
    pub fn errors_emitted(&self) -> usize {
        self.emitted
    }

    /// Consumes the next chunk of rows and queues its errors.
    fn advance(&mut self) {
        let mut batch = RowBatch::new(self.columns.clone());
        let mut fault = None;

        while batch.len() < self.chunk_size {
            match self.records.next() {
                Some(Ok(record)) => {
                    batch.push_row(record.iter().map(str::to_string).collect());
                }
                Some(Err(e)) => {
                    fault = Some(StreamFault::mid_stream(e.to_string()));
                    break;
                }
                None => break,
            }
        }

        if batch.is_empty() && fault.is_none() {
            // End of input.
            self.state = State::Done;
            return;
        }

        let offset = self.global_offset;
        self.global_offset += batch.len() as u64;

        match engine::validate(&batch, &self.model, offset) {
            Ok(mut outcome) => {
                // `pending` is drained before each advance, so the cap
                // budget is determined by the emitted count alone.
                if let Some(cap) = self.max_errors {
                    let remaining = cap.saturating_sub(self.emitted);
                    outcome.truncate_to(remaining);
                    if outcome.errors.len() >= remaining {
                        // Truncated exactly at the cap boundary; no
                        // further chunks are read.
                        self.pending.extend(outcome.errors);
                        self.state = State::Capped;
                        return;
                    }
                }
                self.pending.extend(outcome.errors);
            }
            Err(e) => fault = Some(StreamFault::mid_stream(e.to_string())),
        }

        if let Some(fault) = fault {
            self.state = State::Failed(fault);
        }
    }
}

impl<R: Read> Iterator for ValidationStream<R> {
    type Item = StreamItem;

    fn next(&mut self) -> Option<StreamItem> {
        loop {
            if let Some(err) = self.pending.pop_front() {
                self.emitted += 1;
                return Some(StreamItem::Error(err));
            }

            match std::mem::replace(&mut self.state, State::Done) {
                State::Done | State::Capped => return None,
                State::Failed(fault) => return Some(StreamItem::Fault(fault)),
                State::Streaming => {
                    self.state = State::Streaming;
                    self.advance();
                }
            }
        }
    }
}
