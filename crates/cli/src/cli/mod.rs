// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use clap::{Parser, Subcommand, ValueEnum};
use spool_core::RollingInterval;
use std::path::PathBuf;

pub use args::BatchArgs;

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "spool")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Read rolling .clef log files in resumable, size-bounded batches")]
#[command(
    long_about = "Read rolling .clef log files in resumable, size-bounded batches.\n\n\
    Each batch starts from a byte-offset checkpoint and stops after a record limit or at the \
    last complete line, so a file that is still being written can be followed safely."
)]
pub struct Cli {
    /// Configuration file (defaults to $SPOOL_CONFIG, then ./spool.toml)
    #[arg(short = 'c', long = "config", global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read one batch from a file
    #[command(after_help = "\
Examples:
  spool read app-20240131.clef                    Read from the start of the file
  spool read app-20240131.clef --offset 4096      Resume from a saved offset
  spool read app-20240131.clef -n 10 -o json      Read 10 records, report as JSON
  spool read app.log --format raw --no-max-bytes  Pass lines through untouched")]
    Read {
        /// Record file to read
        file: PathBuf,

        /// Byte offset to start from (0 or a previously reported offset)
        #[arg(long, default_value_t = 0)]
        offset: u64,

        /// Records already examined against the batch limit
        #[arg(long, default_value_t = 0)]
        count: usize,

        #[command(flatten)]
        batch: BatchArgs,

        /// Output format
        #[arg(long, short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Read batches until the file is exhausted, persisting progress in a bookmark
    #[command(after_help = "\
Examples:
  spool drain app-20240131.clef --bookmark app.bookmark
  spool drain app-20240131.clef --bookmark app.bookmark -n 100 --max-bytes 262144")]
    Drain {
        /// Record file to read
        file: PathBuf,

        /// Bookmark file holding the checkpoint between runs
        #[arg(long, short = 'b', value_name = "path")]
        bookmark: PathBuf,

        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Check that a file name follows the rolling naming convention
    Check {
        /// File name or path to check
        file: PathBuf,

        /// Rolling interval encoded in file names
        #[arg(long, value_name = "interval")]
        rolling: Option<RollingInterval>,
    },

    /// Print the effective configuration
    Config {
        #[command(flatten)]
        batch: BatchArgs,
    },
}
