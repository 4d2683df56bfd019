// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Follow a file to its last complete line, one batch at a time.
//!
//! Records of each batch are written out before the bookmark is advanced,
//! so an interrupted drain repeats at most one batch and never loses one.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use spool_core::{BatchReader, Bookmark, Checkpoint, Limits, PayloadBuilder};

use crate::config::Config;
use crate::error::{Error, Result};

use super::{with_reader, Record};

/// Totals over all batches of one drain.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DrainSummary {
    pub batches: usize,
    pub records: usize,
    pub examined: usize,
    pub checkpoint: Checkpoint,
}

pub fn run(config: &Config, file: &Path, bookmark_path: &Path) -> Result<()> {
    let _lock = lock_bookmark(bookmark_path)?;
    let bookmark = Bookmark::new(bookmark_path);
    let limits = config.limits();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = with_reader!(config, |reader| run_impl(
        &reader, &limits, file, &bookmark, &mut out
    ))?;

    eprintln!(
        "Drained {} records ({} examined) in {} batches, next offset {}",
        summary.records, summary.examined, summary.batches, summary.checkpoint.offset
    );
    Ok(())
}

/// Internal implementation that accepts a writer for testing.
pub(crate) fn run_impl<B, T, W>(
    reader: &BatchReader<B>,
    limits: &Limits,
    file: &Path,
    bookmark: &Bookmark,
    out: &mut W,
) -> Result<DrainSummary>
where
    B: PayloadBuilder<Payload = Vec<T>>,
    T: Record,
    W: Write,
{
    // Bookmarks always record the canonical path, however the file was named.
    let file = fs::canonicalize(file)?;
    let mut checkpoint = match bookmark.load()? {
        Some(saved) if saved.is_for(&file) => Checkpoint::new(&file, saved.offset),
        Some(saved) => {
            tracing::info!(
                previous = %saved.file.display(),
                file = %file.display(),
                "bookmark refers to another file, starting from the beginning"
            );
            Checkpoint::start_of(&file)
        }
        None => Checkpoint::start_of(&file),
    };

    let mut summary = DrainSummary {
        batches: 0,
        records: 0,
        examined: 0,
        checkpoint: checkpoint.clone(),
    };

    loop {
        let batch = reader.read_batch(limits, &checkpoint, 0)?;
        if batch.count == 0 {
            break;
        }

        for record in &batch.payload {
            writeln!(out, "{}", record.to_line())?;
        }
        out.flush()?;
        bookmark.save(&batch.checkpoint)?;

        summary.batches += 1;
        summary.records += batch.payload.len();
        summary.examined += batch.count;
        checkpoint = batch.checkpoint;
    }

    summary.checkpoint = checkpoint;
    Ok(summary)
}

/// Path of the advisory lock guarding a bookmark.
pub(crate) fn lock_path(bookmark_path: &Path) -> PathBuf {
    let mut path = bookmark_path.as_os_str().to_owned();
    path.push(".lock");
    PathBuf::from(path)
}

/// Takes an exclusive lock so only one drain advances a bookmark at a time.
///
/// The lock is released when the returned handle is dropped.
fn lock_bookmark(bookmark_path: &Path) -> Result<File> {
    use fs2::FileExt;

    let lock_path = lock_path(bookmark_path);
    if let Some(parent) = lock_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&lock_path)?;
    file.try_lock_exclusive()
        .map_err(|_| Error::BookmarkLocked(bookmark_path.display().to_string()))?;

    Ok(file)
}

#[cfg(test)]
#[path = "drain_tests.rs"]
mod tests;
