// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Resumable, size-bounded batch reader.
//!
//! [`BatchReader::read_batch`] picks up at a [`Checkpoint`], scans forward
//! one complete line at a time, and stops after `max_records_per_batch`
//! lines have been examined or no complete line remains. Lines larger than
//! `max_record_bytes` are dropped with a diagnostic; everything else goes to
//! the configured [`PayloadBuilder`].
//!
//! The returned checkpoint always points at the next unread byte, including
//! past dropped lines, so feeding it back in never repeats or skips a line.

use serde::{Deserialize, Serialize};
use std::fs::File;

use crate::checkpoint::Checkpoint;
use crate::error::Result;
use crate::payload::{Accumulator, PayloadBuilder};
use crate::scanner::{try_read_line, LineTerminator};

/// Bounds on the work done by a single batch call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Upper bound on lines examined, counting dropped lines.
    pub max_records_per_batch: usize,
    /// Lines whose UTF-8 encoding exceeds this many bytes are dropped.
    pub max_record_bytes: Option<u64>,
}

impl Limits {
    pub fn new(max_records_per_batch: usize) -> Self {
        Limits {
            max_records_per_batch,
            max_record_bytes: None,
        }
    }

    pub fn with_max_record_bytes(mut self, max_record_bytes: Option<u64>) -> Self {
        self.max_record_bytes = max_record_bytes;
        self
    }

    fn accepts(&self, line: &str) -> bool {
        match self.max_record_bytes {
            Some(max) => line.len() as u64 <= max,
            None => true,
        }
    }
}

/// Outcome of one batch call.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<P> {
    /// Accepted lines, in file order, as built by the payload builder.
    pub payload: P,
    /// Position of the next unread byte.
    pub checkpoint: Checkpoint,
    /// Lines examined so far, including the caller's starting count.
    pub count: usize,
}

/// Reads batches of lines from record files.
#[derive(Debug, Clone)]
pub struct BatchReader<B> {
    builder: B,
    terminator: LineTerminator,
}

impl<B: PayloadBuilder> BatchReader<B> {
    /// Creates a reader expecting the platform's native line terminator.
    pub fn new(builder: B) -> Self {
        BatchReader {
            builder,
            terminator: LineTerminator::native(),
        }
    }

    pub fn with_terminator(mut self, terminator: LineTerminator) -> Self {
        self.terminator = terminator;
        self
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn terminator(&self) -> LineTerminator {
        self.terminator
    }

    /// Payload of a batch with nothing to report.
    pub fn no_payload(&self) -> B::Payload {
        self.builder.empty()
    }

    /// Reads one batch starting at `checkpoint`.
    ///
    /// `count` is the number of lines the caller has already examined
    /// against the same `limits`; the batch stops once it reaches
    /// `limits.max_records_per_batch`. Dropped lines count too, so a batch
    /// may return fewer payload items than the limit even though more lines
    /// are available.
    ///
    /// # Errors
    ///
    /// Fails without a payload if the builder rejects the file, the file
    /// cannot be opened or read, or the builder rejects a line. The caller's
    /// checkpoint is then still the last safe position to retry from.
    pub fn read_batch(
        &self,
        limits: &Limits,
        checkpoint: &Checkpoint,
        count: usize,
    ) -> Result<Batch<B::Payload>> {
        let mut acc = self.builder.init(&checkpoint.file)?;

        // Read-only handles do not block writers appending to the file.
        let mut file = File::open(&checkpoint.file)?;

        let mut position = checkpoint.clone();
        let mut count = count;
        let mut dropped = 0usize;

        while count < limits.max_records_per_batch {
            let Some(scanned) = try_read_line(&mut file, position.offset, self.terminator)? else {
                break;
            };

            position = position.advanced_to(scanned.next_offset);
            count += 1;

            if !limits.accepts(&scanned.line) {
                dropped += 1;
                tracing::warn!(
                    target: "spool::selflog",
                    "Event JSON representation exceeds the byte size limit of {} and will be dropped; data: {}",
                    limits.max_record_bytes.unwrap_or_default(),
                    scanned.line
                );
                continue;
            }

            acc.add(&scanned.line)?;
        }

        tracing::debug!(
            file = %position.file.display(),
            from = checkpoint.offset,
            to = position.offset,
            count,
            dropped,
            "read batch"
        );

        Ok(Batch {
            payload: acc.finish(),
            checkpoint: position,
            count,
        })
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
