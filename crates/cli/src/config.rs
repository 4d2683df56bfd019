// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reader configuration.
//!
//! Configuration is read from a TOML file (`--config`, `SPOOL_CONFIG`, or
//! `spool.toml` in the working directory). Every key is optional:
//! - `rolling_interval`: date granularity embedded in file names
//! - `batch_posting_limit`: records examined per batch
//! - `event_body_limit_bytes`: lines above this size are dropped (unbounded if absent)
//! - `line_terminator`: terminator the writer uses (`lf` or `crlf`)
//! - `format`: payload builder (`raw` or `clef`)
//! - `decode_policy`: what `clef` does with undecodable lines (`fail` or `skip`)

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use spool_core::{DecodePolicy, Limits, LineTerminator, RollingInterval};

use crate::cli::BatchArgs;
use crate::error::{Error, Result};

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "spool.toml";

const DEFAULT_BATCH_POSTING_LIMIT: usize = 1000;

/// Which payload builder turns lines into output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PayloadFormat {
    /// Lines passed through verbatim.
    Raw,
    /// Lines decoded as CLEF events.
    #[default]
    Clef,
}

/// Effective reader settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub rolling_interval: RollingInterval,
    pub batch_posting_limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_body_limit_bytes: Option<u64>,
    pub line_terminator: LineTerminator,
    pub format: PayloadFormat,
    pub decode_policy: DecodePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rolling_interval: RollingInterval::default(),
            batch_posting_limit: DEFAULT_BATCH_POSTING_LIMIT,
            event_body_limit_bytes: None,
            line_terminator: LineTerminator::native(),
            format: PayloadFormat::default(),
            decode_policy: DecodePolicy::default(),
        }
    }
}

impl Config {
    /// Loads and validates configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the configuration to use.
    ///
    /// An explicit path must exist. Otherwise `spool.toml` in `cwd` is used
    /// when present, and built-in defaults when not.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let local: PathBuf = cwd.join(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::load(&local);
        }

        Ok(Config::default())
    }

    /// Checks invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.batch_posting_limit == 0 {
            return Err(Error::MustBePositive {
                field: "batch_posting_limit",
            });
        }
        Ok(())
    }

    /// Overrides file settings with command-line flags.
    pub fn apply(&mut self, args: &BatchArgs) -> Result<()> {
        if let Some(limit) = args.limit {
            self.batch_posting_limit = limit;
        }
        if let Some(max_bytes) = args.max_bytes {
            self.event_body_limit_bytes = Some(max_bytes);
        }
        if args.no_max_bytes {
            self.event_body_limit_bytes = None;
        }
        if let Some(format) = args.format {
            self.format = format;
        }
        if let Some(interval) = args.rolling {
            self.rolling_interval = interval;
        }
        if let Some(terminator) = args.terminator {
            self.line_terminator = terminator;
        }
        if let Some(policy) = args.decode_policy {
            self.decode_policy = policy;
        }
        self.validate()
    }

    /// Batch limits derived from this configuration.
    pub fn limits(&self) -> Limits {
        Limits::new(self.batch_posting_limit).with_max_record_bytes(self.event_body_limit_bytes)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
