// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the log filter directive from `SPOOL_LOG`, if set and non-empty.
pub fn log_filter() -> Option<String> {
    std::env::var(vars::SPOOL_LOG)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Returns the configuration file named by `SPOOL_CONFIG`, if set.
pub fn config_path() -> Option<PathBuf> {
    std::env::var(vars::SPOOL_CONFIG)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Returns `true` if `NO_COLOR` is set to a non-empty value.
pub fn no_color() -> bool {
    std::env::var(vars::NO_COLOR).is_ok_and(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
