// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use spool_core::{BatchReader, Checkpoint, Limits, PayloadBuilder};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;

use super::{with_reader, Record};

#[derive(Serialize)]
struct BatchReport<'a> {
    records: Vec<Value>,
    checkpoint: &'a Checkpoint,
    count: usize,
}

pub fn run(
    config: &Config,
    file: &Path,
    offset: u64,
    count: usize,
    output: OutputFormat,
) -> Result<()> {
    let checkpoint = Checkpoint::new(file, offset);
    let limits = config.limits();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    with_reader!(config, |reader| run_impl(
        &reader,
        &limits,
        &checkpoint,
        count,
        output,
        &mut out
    ))
}

/// Internal implementation that accepts a writer for testing.
pub(crate) fn run_impl<B, T, W>(
    reader: &BatchReader<B>,
    limits: &Limits,
    checkpoint: &Checkpoint,
    count: usize,
    output: OutputFormat,
    out: &mut W,
) -> Result<()>
where
    B: PayloadBuilder<Payload = Vec<T>>,
    T: Record,
    W: Write,
{
    let batch = reader.read_batch(limits, checkpoint, count)?;

    match output {
        OutputFormat::Text => {
            for record in &batch.payload {
                writeln!(out, "{}", record.to_line())?;
            }
            out.flush()?;
            eprintln!(
                "Read {} records ({} examined), next offset {}",
                batch.payload.len(),
                batch.count.saturating_sub(count),
                batch.checkpoint.offset
            );
        }
        OutputFormat::Json => {
            let report = BatchReport {
                records: batch.payload.iter().map(Record::to_json).collect(),
                checkpoint: &batch.checkpoint,
                count: batch.count,
            };
            serde_json::to_writer(&mut *out, &report)?;
            writeln!(out)?;
            out.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "read_tests.rs"]
mod tests;
