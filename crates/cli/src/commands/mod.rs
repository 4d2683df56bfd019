// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod check;
pub mod config;
pub mod drain;
pub mod read;

use serde_json::Value;
use spool_core::LogEvent;

/// A payload item as written to stdout.
pub(crate) trait Record {
    /// Single-line text form.
    fn to_line(&self) -> String;
    /// Structured form used by `--output json`.
    fn to_json(&self) -> Value;
}

impl Record for String {
    fn to_line(&self) -> String {
        self.clone()
    }

    /// Raw lines are usually JSON already; anything else is kept as a string.
    fn to_json(&self) -> Value {
        serde_json::from_str(self).unwrap_or_else(|_| Value::String(self.clone()))
    }
}

impl Record for LogEvent {
    fn to_line(&self) -> String {
        self.to_clef().to_string()
    }

    fn to_json(&self) -> Value {
        self.to_clef()
    }
}

/// Binds `$reader` to a [`spool_core::BatchReader`] for the configured
/// payload format and evaluates `$body` with it.
macro_rules! with_reader {
    ($config:expr, |$reader:ident| $body:expr) => {{
        let config: &$crate::config::Config = $config;
        match config.format {
            $crate::config::PayloadFormat::Raw => {
                let $reader = spool_core::BatchReader::new(spool_core::RawLines)
                    .with_terminator(config.line_terminator);
                $body
            }
            $crate::config::PayloadFormat::Clef => {
                let builder = spool_core::ClefEvents::new(config.rolling_interval)
                    .with_decode_policy(config.decode_policy);
                let $reader = spool_core::BatchReader::new(builder)
                    .with_terminator(config.line_terminator);
                $body
            }
        }
    }};
}
pub(crate) use with_reader;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
