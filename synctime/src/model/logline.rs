/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use crate::error::{SyncTimeError, SyncTimeResult};
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// 2018-08-13 02:11:07 UpdateTip: new best=... height=1024 version=...
static HEIGHT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}).* height=(\d+) .*")
        .expect("valid regex literal")
});

/// A log line carrying a timestamp and a `height=` field.
#[derive(Debug, Clone, PartialEq)]
pub struct LogMatch {
    /// Timestamp text exactly as it appears in the log.
    pub date: String,
    pub timestamp: NaiveDateTime,
    /// Digit run exactly as it appears in the log, leading zeros included.
    pub height: String,
}

/// Returns `Ok(None)` for lines that do not carry a height sample.
///
/// A line whose leading timestamp has the right shape but is not a real
/// calendar date-time fails with `SyncTimeError::Parse`.
pub fn parse_line(line: usize, text: &str) -> SyncTimeResult<Option<LogMatch>> {
    let Some(caps) = HEIGHT_PATTERN.captures(text) else {
        return Ok(None);
    };
    let date = &caps[1];
    let timestamp =
        NaiveDateTime::parse_from_str(date, TIMESTAMP_FORMAT).map_err(|_| SyncTimeError::Parse {
            line,
            text: date.to_string(),
        })?;

    Ok(Some(LogMatch {
        date: date.to_string(),
        timestamp,
        height: caps[2].to_string(),
    }))
}

#[cfg(test)]
#[path = "logline_test.rs"]
mod tests;
