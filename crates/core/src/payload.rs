// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pluggable payload construction.
//!
//! A [`PayloadBuilder`] is configured once and then, for every batch call,
//! opens a fresh [`Accumulator`] that receives the accepted lines in file
//! order and is finally turned into the payload handed back to the caller.
//! Accumulation state never outlives the call that created it.

use std::path::Path;

use crate::error::Result;

/// Strategy turning accepted lines into a payload.
pub trait PayloadBuilder {
    /// The aggregate returned to the caller.
    type Payload;
    /// Call-scoped accumulation state.
    type Accumulator: Accumulator<Payload = Self::Payload>;

    /// Payload of a batch that produced nothing.
    fn empty(&self) -> Self::Payload;

    /// Prepares accumulation for a batch over `file`.
    ///
    /// Runs before the file is opened; an error aborts the whole batch.
    fn init(&self, file: &Path) -> Result<Self::Accumulator>;
}

/// Accumulation state of a single batch.
pub trait Accumulator {
    type Payload;

    /// Adds one accepted line. Whether a failing line aborts the batch or is
    /// skipped is up to the implementation and must be documented there.
    fn add(&mut self, line: &str) -> Result<()>;

    /// Finalizes the payload.
    fn finish(self) -> Self::Payload;
}

/// Passes lines through untouched.
///
/// Accepts any file name and never fails on a line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawLines;

impl PayloadBuilder for RawLines {
    type Payload = Vec<String>;
    type Accumulator = Vec<String>;

    fn empty(&self) -> Vec<String> {
        Vec::new()
    }

    fn init(&self, _file: &Path) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

impl Accumulator for Vec<String> {
    type Payload = Vec<String>;

    fn add(&mut self, line: &str) -> Result<()> {
        self.push(line.to_string());
        Ok(())
    }

    fn finish(self) -> Vec<String> {
        self
    }
}
