// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! spool-core: resumable, size-bounded batch reading of rolling log files.
//!
//! A writer appends one JSON event per line to time-bucketed `.clef` files.
//! This crate reads those files forward from a saved [`Checkpoint`] in
//! bounded batches, tolerating a writer that is still appending, and hands
//! the accepted lines to a pluggable [`PayloadBuilder`].
//!
//! ```rust,ignore
//! use spool_core::{BatchReader, Bookmark, Checkpoint, ClefEvents, Limits, RollingInterval};
//!
//! let reader = BatchReader::new(ClefEvents::new(RollingInterval::Day));
//! let bookmark = Bookmark::new("state/app.bookmark");
//! let start = bookmark.load()?.unwrap_or_else(|| Checkpoint::start_of(path));
//!
//! let batch = reader.read_batch(&Limits::new(1000), &start, 0)?;
//! ship(batch.payload)?;
//! bookmark.save(&batch.checkpoint)?;
//! ```

pub mod checkpoint;
pub mod clef;
pub mod error;
pub mod payload;
pub mod reader;
pub mod rolling;
pub mod scanner;

pub use checkpoint::{Bookmark, Checkpoint};
pub use clef::{ClefEvents, DecodePolicy, Level, LogEvent};
pub use error::{Error, Result};
pub use payload::{Accumulator, PayloadBuilder, RawLines};
pub use reader::{Batch, BatchReader, Limits};
pub use rolling::RollingInterval;
pub use scanner::{try_read_line, LineTerminator, ScannedLine};
