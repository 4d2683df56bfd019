// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Line scanner over a growing record file.
//!
//! [`try_read_line`] yields one complete, terminated line at a time together
//! with the byte offset of the line that follows it. A trailing line the
//! writer has not finished yet is never returned; the next call picks it up
//! once its terminator lands on disk.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::str::FromStr;

use crate::error::{Error, Result};

/// UTF-8 byte-order mark, only ever honored at offset 0.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Line terminator written by the producer of the file.
///
/// Offsets advance by the configured terminator's byte length, so this must
/// match what the writer emits or checkpoints drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineTerminator {
    /// `\n`
    Lf,
    /// `\r\n`
    #[serde(rename = "crlf")]
    CrLf,
}

impl LineTerminator {
    /// The terminator of the current platform.
    pub fn native() -> Self {
        if cfg!(windows) {
            LineTerminator::CrLf
        } else {
            LineTerminator::Lf
        }
    }

    /// Encoded length of the terminator in bytes.
    pub fn byte_len(&self) -> u64 {
        match self {
            LineTerminator::Lf => 1,
            LineTerminator::CrLf => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineTerminator::Lf => "lf",
            LineTerminator::CrLf => "crlf",
        }
    }
}

impl Default for LineTerminator {
    fn default() -> Self {
        Self::native()
    }
}

impl fmt::Display for LineTerminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LineTerminator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lf" => Ok(LineTerminator::Lf),
            "crlf" => Ok(LineTerminator::CrLf),
            _ => Err(Error::InvalidLineTerminator(s.to_string())),
        }
    }
}

/// A complete line and the offset of the byte right after its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    pub line: String,
    pub next_offset: u64,
}

/// Reads the next complete line starting at `offset`.
///
/// `offset` must be 0 or a value previously returned in
/// [`ScannedLine::next_offset`] for the same file. Returns `Ok(None)` when
/// no complete line is available yet: the file ends at or before `offset`,
/// or the remaining bytes lack a terminator.
///
/// A trailing `\r` is stripped from the returned text in both modes.
///
/// The returned offset is computed from encoded byte lengths: the raw bytes
/// of the line content, plus [`LineTerminator::byte_len`], plus the BOM
/// width when a BOM was skipped at offset 0. Under [`LineTerminator::Lf`] a
/// stripped `\r` is counted as well, so the offset always lands on the byte
/// after the `\n`. Invalid UTF-8 is replaced
/// lossily in the returned text without affecting the offset.
///
/// The stream is left open; its position afterwards is unspecified.
pub fn try_read_line<R: Read + Seek>(
    stream: &mut R,
    offset: u64,
    terminator: LineTerminator,
) -> Result<Option<ScannedLine>> {
    let len = stream.seek(SeekFrom::End(0))?;
    if len <= offset {
        return Ok(None);
    }

    stream.seek(SeekFrom::Start(offset))?;
    let mut buf = Vec::new();
    BufReader::new(&mut *stream).read_until(b'\n', &mut buf)?;

    // Partial tail line: the writer may still be appending to it.
    if buf.pop() != Some(b'\n') {
        return Ok(None);
    }
    // A `\r` before the `\n` is never content, whatever the configured
    // terminator. Under `Lf` it still occupies a byte on disk.
    let carriage_return = buf.last() == Some(&b'\r');
    if carriage_return {
        buf.pop();
    }
    let terminator_len = match terminator {
        LineTerminator::Lf => terminator.byte_len() + u64::from(carriage_return),
        LineTerminator::CrLf => terminator.byte_len(),
    };

    let mut content: &[u8] = &buf;
    let mut skipped = 0;
    if offset == 0 {
        if let Some(rest) = content.strip_prefix(&UTF8_BOM) {
            content = rest;
            skipped = UTF8_BOM.len() as u64;
        }
    }

    let next_offset = offset + skipped + content.len() as u64 + terminator_len;
    let line = match std::str::from_utf8(content) {
        Ok(text) => text.to_string(),
        Err(_) => String::from_utf8_lossy(content).into_owned(),
    };

    Ok(Some(ScannedLine { line, next_offset }))
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
