// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Read positions and their on-disk bookmark.
//!
//! A [`Checkpoint`] names a record file and the byte offset of the next
//! unread byte in it. Checkpoints are plain values: the batch reader hands
//! back a new one after every call and the caller decides when to persist
//! it through a [`Bookmark`].

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// How far into a specific file records have been consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Record file the offset refers to.
    pub file: PathBuf,
    /// Byte offset of the start of the next unread line.
    pub offset: u64,
}

impl Checkpoint {
    pub fn new(file: impl Into<PathBuf>, offset: u64) -> Self {
        Checkpoint {
            file: file.into(),
            offset,
        }
    }

    /// A checkpoint at the very beginning of `file`.
    pub fn start_of(file: impl Into<PathBuf>) -> Self {
        Self::new(file, 0)
    }

    /// Returns a checkpoint for the same file at `offset`.
    pub fn advanced_to(&self, offset: u64) -> Self {
        Checkpoint {
            file: self.file.clone(),
            offset,
        }
    }

    /// Returns true if this checkpoint refers to `file`.
    ///
    /// Paths that differ textually still match when both resolve to the
    /// same file on disk, e.g. a relative and an absolute spelling.
    pub fn is_for(&self, file: &Path) -> bool {
        if self.file == file {
            return true;
        }
        match (fs::canonicalize(&self.file), fs::canonicalize(file)) {
            (Ok(ours), Ok(theirs)) => ours == theirs,
            _ => false,
        }
    }
}

/// A checkpoint persisted as a small JSON document.
///
/// Saves go through a temporary sibling file that is fsynced and renamed
/// over the bookmark, so a crash leaves either the old or the new
/// checkpoint, never a torn one.
#[derive(Debug, Clone)]
pub struct Bookmark {
    path: PathBuf,
}

impl Bookmark {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Bookmark { path: path.into() }
    }

    /// Returns the path of the bookmark file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored checkpoint.
    ///
    /// Returns `Ok(None)` if the bookmark does not exist yet or is empty.
    pub fn load(&self) -> Result<Option<Checkpoint>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let checkpoint = serde_json::from_str(&content).map_err(|e| Error::Bookmark {
            path: self.path.clone(),
            reason: format!("failed to parse bookmark: {e}"),
        })?;
        Ok(Some(checkpoint))
    }

    /// Atomically replaces the stored checkpoint.
    pub fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self
            .path
            .with_extension(format!("tmp.{}", std::process::id()));

        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, checkpoint)?;
        writer.flush()?;
        writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))?
            .sync_all()?;

        fs::rename(&temp_path, &self.path).map_err(|e| Error::Bookmark {
            path: self.path.clone(),
            reason: format!("failed to replace bookmark: {e}"),
        })?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
