// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use spool_core::RollingInterval;

use crate::config::Config;
use crate::error::Result;

pub fn run(config: &Config, file: &Path, rolling: Option<RollingInterval>) -> Result<()> {
    let interval = rolling.unwrap_or(config.rolling_interval);
    println!("{}", run_impl(file, interval)?);
    Ok(())
}

/// Validates the file name and returns the confirmation line.
pub(crate) fn run_impl(file: &Path, interval: RollingInterval) -> Result<String> {
    interval.validate_file_name(file)?;
    Ok(format!("{}: ok ({} rolling)", file.display(), interval))
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
