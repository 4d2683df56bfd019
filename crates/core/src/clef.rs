// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Compact Log Event Format (CLEF) decoding.
//!
//! Each line of a `.clef` file is one JSON object. Reserved fields are
//! prefixed with `@`:
//! - `@t`: timestamp (ISO 8601, required)
//! - `@l`: level (defaults to `Information`)
//! - `@mt` / `@m`: message template / rendered message
//! - `@x`: exception text
//! - `@i`: event id
//! - `@r`: renderings of template tokens
//!
//! Everything else is a property. User properties whose names start with
//! `@` are escaped on disk as `@@`.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::payload::{Accumulator, PayloadBuilder};
use crate::rolling::RollingInterval;

/// Severity of a log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Level {
    Verbose,
    Debug,
    #[default]
    Information,
    Warning,
    Error,
    Fatal,
}

impl Level {
    /// Returns the canonical level name as written in CLEF.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Verbose => "Verbose",
            Level::Debug => "Debug",
            Level::Information => "Information",
            Level::Warning => "Warning",
            Level::Error => "Error",
            Level::Fatal => "Fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "verbose" | "trace" => Ok(Level::Verbose),
            "debug" => Ok(Level::Debug),
            "information" | "info" => Ok(Level::Information),
            "warning" | "warn" => Ok(Level::Warning),
            "error" | "err" => Ok(Level::Error),
            "fatal" | "critical" => Ok(Level::Fatal),
            _ => Err(Error::Decode(format!("unknown level '{s}'"))),
        }
    }
}

/// A structured event decoded from one CLEF line.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub timestamp: DateTime<FixedOffset>,
    pub level: Level,
    pub message_template: Option<String>,
    pub message: Option<String>,
    pub exception: Option<String>,
    /// `@i` as written: writers emit both numeric and string ids.
    pub event_id: Option<Value>,
    pub renderings: Option<Value>,
    pub properties: BTreeMap<String, Value>,
}

impl LogEvent {
    /// Decodes a single CLEF line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the line is not a JSON object, `@t` is
    /// missing or not a valid timestamp, or `@l` names an unknown level.
    pub fn from_clef(line: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(line).map_err(|e| Error::Decode(format!("invalid JSON: {e}")))?;
        let Value::Object(fields) = value else {
            return Err(Error::Decode("event is not a JSON object".to_string()));
        };

        let timestamp = match fields.get("@t") {
            Some(Value::String(t)) => DateTime::parse_from_rfc3339(t)
                .map_err(|e| Error::Decode(format!("invalid @t '{t}': {e}")))?,
            Some(_) => return Err(Error::Decode("@t must be a string".to_string())),
            None => return Err(Error::Decode("missing @t".to_string())),
        };

        let level = match fields.get("@l") {
            Some(Value::String(l)) => l.parse()?,
            Some(_) => return Err(Error::Decode("@l must be a string".to_string())),
            None => Level::default(),
        };

        let mut event = LogEvent {
            timestamp,
            level,
            message_template: string_field(&fields, "@mt"),
            message: string_field(&fields, "@m"),
            exception: string_field(&fields, "@x"),
            event_id: fields.get("@i").cloned(),
            renderings: fields.get("@r").cloned(),
            properties: BTreeMap::new(),
        };

        for (key, value) in fields {
            if let Some(escaped) = key.strip_prefix("@@") {
                event.properties.insert(format!("@{escaped}"), value);
            } else if !key.starts_with('@') {
                event.properties.insert(key, value);
            }
        }

        Ok(event)
    }

    /// Encodes the event back into a CLEF object.
    pub fn to_clef(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("@t".into(), Value::String(self.timestamp.to_rfc3339()));
        if self.level != Level::Information {
            fields.insert("@l".into(), Value::String(self.level.as_str().into()));
        }
        let optional = [
            ("@mt", &self.message_template),
            ("@m", &self.message),
            ("@x", &self.exception),
        ];
        for (key, value) in optional {
            if let Some(v) = value {
                fields.insert(key.into(), Value::String(v.clone()));
            }
        }
        if let Some(id) = &self.event_id {
            fields.insert("@i".into(), id.clone());
        }
        if let Some(r) = &self.renderings {
            fields.insert("@r".into(), r.clone());
        }
        for (key, value) in &self.properties {
            let key = if key.starts_with('@') {
                format!("@{key}")
            } else {
                key.clone()
            };
            fields.insert(key, value.clone());
        }
        Value::Object(fields)
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

/// What to do with a line that cannot be decoded as a CLEF event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Abort the batch; the caller keeps its previous checkpoint.
    #[default]
    Fail,
    /// Log the line on the diagnostics channel and leave it out of the payload.
    Skip,
}

impl DecodePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecodePolicy::Fail => "fail",
            DecodePolicy::Skip => "skip",
        }
    }
}

impl fmt::Display for DecodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DecodePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(DecodePolicy::Fail),
            "skip" => Ok(DecodePolicy::Skip),
            _ => Err(Error::Decode(format!(
                "unknown decode policy '{s}' (expected fail or skip)"
            ))),
        }
    }
}

/// Decodes lines into [`LogEvent`]s.
///
/// `init` rejects files that do not follow the rolling naming convention.
/// Undecodable lines are handled per [`DecodePolicy`]: with
/// [`DecodePolicy::Fail`] the first bad line fails the whole batch and every
/// event accumulated so far is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClefEvents {
    rolling_interval: RollingInterval,
    decode_policy: DecodePolicy,
}

impl ClefEvents {
    pub fn new(rolling_interval: RollingInterval) -> Self {
        ClefEvents {
            rolling_interval,
            decode_policy: DecodePolicy::default(),
        }
    }

    pub fn with_decode_policy(mut self, decode_policy: DecodePolicy) -> Self {
        self.decode_policy = decode_policy;
        self
    }

    pub fn rolling_interval(&self) -> RollingInterval {
        self.rolling_interval
    }

    pub fn decode_policy(&self) -> DecodePolicy {
        self.decode_policy
    }
}

impl PayloadBuilder for ClefEvents {
    type Payload = Vec<LogEvent>;
    type Accumulator = ClefAccumulator;

    fn empty(&self) -> Vec<LogEvent> {
        Vec::new()
    }

    fn init(&self, file: &Path) -> Result<ClefAccumulator> {
        self.rolling_interval.validate_file_name(file)?;
        Ok(ClefAccumulator {
            file: file.to_path_buf(),
            policy: self.decode_policy,
            events: Vec::new(),
        })
    }
}

/// Events decoded so far in one batch.
#[derive(Debug)]
pub struct ClefAccumulator {
    file: PathBuf,
    policy: DecodePolicy,
    events: Vec<LogEvent>,
}

impl Accumulator for ClefAccumulator {
    type Payload = Vec<LogEvent>;

    fn add(&mut self, line: &str) -> Result<()> {
        match LogEvent::from_clef(line) {
            Ok(event) => {
                self.events.push(event);
                Ok(())
            }
            Err(e) if self.policy == DecodePolicy::Skip => {
                tracing::warn!(
                    target: "spool::selflog",
                    file = %self.file.display(),
                    error = %e,
                    data = line,
                    "skipping event that cannot be decoded"
                );
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn finish(self) -> Vec<LogEvent> {
        self.events
    }
}

#[cfg(test)]
#[path = "clef_tests.rs"]
mod tests;
