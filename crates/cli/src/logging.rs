// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging to stderr.
//!
//! Records go to stdout, so diagnostics never share a stream with them.
//! The filter comes from `SPOOL_LOG`, then `RUST_LOG`, then [`DEFAULT_FILTER`].
//! Dropped or skipped records are reported on the `spool::selflog` target.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::env;

/// Filter used when neither `SPOOL_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Builds the filter directive set from the environment.
pub fn filter() -> EnvFilter {
    env::log_filter()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Calling it again is a no-op.
pub fn init() {
    let ansi = std::io::stderr().is_terminal() && !env::no_color();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .try_init();
}
