/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use crate::error::{SyncTimeError, SyncTimeResult};
use chrono::TimeDelta;
use serde::Serialize;

pub static HEADER: &[&str] = &["date", "elapsed time", "height"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElapsedFormat {
    SECONDS,
    DURATION,
}

pub fn parse_elapsed_format(format_string: &str) -> SyncTimeResult<ElapsedFormat> {
    match format_string {
        "seconds" => Ok(ElapsedFormat::SECONDS),
        "duration" => Ok(ElapsedFormat::DURATION),
        _ => Err(SyncTimeError::Config(format!(
            "invalid elapsed format [{}], expected seconds or duration",
            format_string
        ))),
    }
}

/// One accepted sample.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub date: String,
    pub elapsed: TimeDelta,
    pub height: String,
}

#[derive(Debug, Serialize)]
pub struct CsvRecord<'a> {
    pub date: &'a str,
    pub elapsed: String,
    pub height: &'a str,
}

impl OutputRow {
    /// Whole seconds since the first sample.
    pub fn elapsed_seconds(&self) -> i64 {
        self.elapsed.num_seconds()
    }

    pub fn to_record(&self, format: ElapsedFormat) -> CsvRecord<'_> {
        let elapsed = match format {
            ElapsedFormat::SECONDS => self.elapsed_seconds().to_string(),
            ElapsedFormat::DURATION => format_duration(self.elapsed),
        };
        CsvRecord {
            date: &self.date,
            elapsed,
            height: &self.height,
        }
    }
}

/// `H:MM:SS`, prefixed with `N day(s), ` from 24 hours on.
///
/// Negative spans borrow a whole day, so -5 minutes is `-1 day, 23:55:00`.
pub fn format_duration(delta: TimeDelta) -> String {
    let total = delta.num_seconds();
    let days = total.div_euclid(86_400);
    let rest = total.rem_euclid(86_400);
    let clock = format!("{}:{:02}:{:02}", rest / 3600, (rest % 3600) / 60, rest % 60);

    match days {
        0 => clock,
        1 | -1 => format!("{} day, {}", days, clock),
        _ => format!("{} days, {}", days, clock),
    }
}

#[cfg(test)]
#[path = "row_test.rs"]
mod tests;
