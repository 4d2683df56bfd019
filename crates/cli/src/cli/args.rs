// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.
//!
//! These structs are used with `#[command(flatten)]` so `read` and `drain`
//! accept the same reader overrides.

use clap::Args;
use spool_core::{DecodePolicy, LineTerminator, RollingInterval};

use crate::config::PayloadFormat;

/// Reader settings that override the configuration file.
#[derive(Args, Clone, Debug, Default)]
pub struct BatchArgs {
    /// Maximum records examined per batch
    #[arg(short = 'n', long, value_name = "count")]
    pub limit: Option<usize>,

    /// Drop records larger than this many bytes
    #[arg(long, value_name = "bytes", conflicts_with = "no_max_bytes")]
    pub max_bytes: Option<u64>,

    /// Accept records of any size
    #[arg(long)]
    pub no_max_bytes: bool,

    /// Payload format
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<PayloadFormat>,

    /// Rolling interval encoded in file names (infinite, year, month, day, hour, minute)
    #[arg(long, value_name = "interval")]
    pub rolling: Option<RollingInterval>,

    /// Line terminator used by the writer (lf, crlf)
    #[arg(long, value_name = "terminator")]
    pub terminator: Option<LineTerminator>,

    /// What to do with lines that are not valid events (fail, skip)
    #[arg(long, value_name = "policy")]
    pub decode_policy: Option<DecodePolicy>,
}
