// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rolling file naming convention.
//!
//! Record files are time-bucketed: `[whatever]-{Date}[_n].clef`, where the
//! shape of `{Date}` depends on the configured [`RollingInterval`] and `_n`
//! is an optional numeric disambiguator added when a bucket overflows into
//! several files. This module only validates names; choosing, rotating, or
//! deleting files belongs to the writer side.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Suffix identifying a supported record file.
pub const RECORD_FILE_SUFFIX: &str = ".clef";

/// Digits of a fully-qualified date (`yyyyMMddHHmm`) used to fill in the
/// components a coarser interval omits: Jan 1st, midnight.
const DATE_DEFAULTS: &str = "000001010000";

/// Granularity at which record files roll over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollingInterval {
    /// A single file that never rolls; names carry no date.
    Infinite,
    Year,
    Month,
    /// One file per day (the writer's default).
    #[default]
    Day,
    Hour,
    Minute,
}

impl RollingInterval {
    /// Returns the string representation used in configuration and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            RollingInterval::Infinite => "infinite",
            RollingInterval::Year => "year",
            RollingInterval::Month => "month",
            RollingInterval::Day => "day",
            RollingInterval::Hour => "hour",
            RollingInterval::Minute => "minute",
        }
    }

    /// chrono format string of the date embedded in file names.
    pub fn format(&self) -> &'static str {
        match self {
            RollingInterval::Infinite => "",
            RollingInterval::Year => "%Y",
            RollingInterval::Month => "%Y%m",
            RollingInterval::Day => "%Y%m%d",
            RollingInterval::Hour => "%Y%m%d%H",
            RollingInterval::Minute => "%Y%m%d%H%M",
        }
    }

    /// Number of digits in the embedded date.
    pub fn date_len(&self) -> usize {
        match self {
            RollingInterval::Infinite => 0,
            RollingInterval::Year => 4,
            RollingInterval::Month => 6,
            RollingInterval::Day => 8,
            RollingInterval::Hour => 10,
            RollingInterval::Minute => 12,
        }
    }

    /// Regular expression fragment matching the embedded date.
    pub fn date_regex(&self) -> &'static str {
        match self {
            RollingInterval::Infinite => "",
            RollingInterval::Year => r"\d{4}",
            RollingInterval::Month => r"\d{6}",
            RollingInterval::Day => r"\d{8}",
            RollingInterval::Hour => r"\d{10}",
            RollingInterval::Minute => r"\d{12}",
        }
    }

    /// Builds an anchored regex matching every file of the set rooted at
    /// `base` (e.g. `app` matches `app-20240131.clef` and
    /// `app-20240131_2.clef` for [`RollingInterval::Day`]).
    pub fn file_name_regex(&self, base: &str) -> Result<Regex> {
        let base = regex::escape(base);
        let pattern = match self {
            RollingInterval::Infinite => format!(r"^{base}(_\d+)?(?i:\.clef)$"),
            _ => format!(r"^{base}-{}(_\d+)?(?i:\.clef)$", self.date_regex()),
        };
        Regex::new(&pattern).map_err(|e| Error::FileName {
            name: base,
            reason: e.to_string(),
        })
    }

    /// Renders the date segment of a file name for the bucket containing `at`.
    pub fn format_date(&self, at: &NaiveDateTime) -> String {
        at.format(self.format()).to_string()
    }

    /// Parses the date segment of a file name into the start of its bucket.
    ///
    /// [`RollingInterval::Infinite`] accepts only the empty string and yields
    /// the Unix epoch.
    pub fn parse_date(&self, date: &str) -> Option<NaiveDateTime> {
        if date.len() != self.date_len() || !date.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if date.is_empty() {
            return NaiveDate::from_ymd_opt(1970, 1, 1)?.and_hms_opt(0, 0, 0);
        }

        // Pad to minute precision and let chrono check the calendar.
        let padding = DATE_DEFAULTS.get(date.len()..)?;
        NaiveDateTime::parse_from_str(
            &format!("{date}{padding}"),
            RollingInterval::Minute.format(),
        )
        .ok()
    }

    /// Validates that `path` follows the `[whatever]-{Date}[_n].clef`
    /// convention for this interval.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileName`] when the suffix is wrong, the date segment
    /// does not parse, or anything other than `_n` follows the date.
    pub fn validate_file_name(&self, path: &Path) -> Result<()> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let reject = |reason: &str| Error::FileName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        // The date lives in the last '-'-separated token, e.g. `20150218_3.clef`.
        let token = name.rsplit('-').next().unwrap_or_default();
        if !token.to_lowercase().ends_with(RECORD_FILE_SUFFIX) {
            return Err(reject("missing .clef suffix"));
        }
        let stem = token
            .len()
            .checked_sub(RECORD_FILE_SUFFIX.len())
            .and_then(|end| token.get(..end))
            .ok_or_else(|| reject("missing .clef suffix"))?;

        let date_len = self.date_len();
        let date = stem.get(..date_len).ok_or_else(|| reject("date segment too short"))?;
        if self.parse_date(date).is_none() {
            return Err(reject(&format!(
                "'{date}' is not a date in {} format",
                self.format()
            )));
        }

        if *self != RollingInterval::Infinite {
            let rest = &stem[date_len..];
            let valid_rest = rest.is_empty()
                || rest
                    .strip_prefix('_')
                    .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
            if !valid_rest {
                return Err(reject(&format!("unexpected '{rest}' after date")));
            }
        }

        Ok(())
    }
}

impl fmt::Display for RollingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RollingInterval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "infinite" | "none" => Ok(RollingInterval::Infinite),
            "year" => Ok(RollingInterval::Year),
            "month" => Ok(RollingInterval::Month),
            "day" => Ok(RollingInterval::Day),
            "hour" => Ok(RollingInterval::Hour),
            "minute" => Ok(RollingInterval::Minute),
            _ => Err(Error::InvalidRollingInterval(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "rolling_tests.rs"]
mod tests;
