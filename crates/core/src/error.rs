// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for spool-core operations.

use std::path::PathBuf;

use thiserror::Error;

/// All possible errors that can occur while reading a batch.
///
/// Oversized records and partial tail lines are not errors; they never
/// surface here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid file name '{name}': {reason}\n  hint: files must be named [whatever]-{{Date}}[_n].clef")]
    FileName { name: String, reason: String },

    #[error("invalid rolling interval: '{0}'\n  hint: valid intervals are: infinite, year, month, day, hour, minute")]
    InvalidRollingInterval(String),

    #[error("invalid line terminator: '{0}'\n  hint: valid terminators are: lf, crlf")]
    InvalidLineTerminator(String),

    #[error("cannot decode event: {0}")]
    Decode(String),

    #[error("bookmark error at {path}: {reason}")]
    Bookmark { path: PathBuf, reason: String },
}

/// A specialized Result type for spool-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
