// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! spoolrs - the library behind the `spool` CLI.
//!
//! Wires configuration, logging and command dispatch around
//! [`spool_core`], which does the actual batch reading.
//!
//! ```rust,ignore
//! use clap::Parser;
//!
//! let cli = spoolrs::Cli::parse();
//! spoolrs::logging::init();
//! spoolrs::run(cli)?;
//! ```

mod cli;
mod commands;
mod env;

pub mod config;
pub mod error;
pub mod logging;

pub use cli::{BatchArgs, Cli, Command, OutputFormat};
pub use config::{Config, PayloadFormat};
pub use error::{Error, Result};

use std::path::Path;

/// Resolves configuration for one command invocation.
///
/// An explicit path must exist; otherwise `spool.toml` in the working
/// directory is used when present. Command-line overrides are applied last.
fn resolve_config(
    explicit: Option<&Path>,
    cwd: &Path,
    batch: Option<&BatchArgs>,
) -> Result<Config> {
    let mut config = Config::discover(explicit, cwd)?;
    if let Some(batch) = batch {
        config.apply(batch)?;
    }
    Ok(config)
}

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    // `--config` wins over `SPOOL_CONFIG`.
    let explicit = cli.config.or_else(env::config_path);
    let explicit = explicit.as_deref();

    match cli.command {
        Command::Read {
            file,
            offset,
            count,
            batch,
            output,
        } => {
            let config = resolve_config(explicit, &cwd, Some(&batch))?;
            commands::read::run(&config, &file, offset, count, output)
        }
        Command::Drain {
            file,
            bookmark,
            batch,
        } => {
            let config = resolve_config(explicit, &cwd, Some(&batch))?;
            commands::drain::run(&config, &file, &bookmark)
        }
        Command::Check { file, rolling } => {
            let config = resolve_config(explicit, &cwd, None)?;
            commands::check::run(&config, &file, rolling)
        }
        Command::Config { batch } => {
            let config = resolve_config(explicit, &cwd, Some(&batch))?;
            commands::config::run(&config)
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
