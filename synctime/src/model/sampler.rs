/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use crate::error::{SyncTimeError, SyncTimeResult};
use crate::model::logline::{parse_line, LogMatch};
use crate::model::row::OutputRow;
use chrono::{NaiveDateTime, TimeDelta};
use std::path::PathBuf;

pub const DEFAULT_STEP_MINUTES: i64 = 10;

/// Cadence filter over height samples.
///
/// The threshold starts at zero and advances by exactly one step per
/// accepted sample, never by more. After a gap longer than a step, every
/// following match is accepted until the threshold catches up with the
/// elapsed time again.
///
/// Input is expected in chronological order. A match earlier than the first
/// one has a negative elapsed time and is never accepted.
#[derive(Debug, Clone)]
pub struct Sampler {
    step: TimeDelta,
    start: Option<NaiveDateTime>,
    threshold: TimeDelta,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(TimeDelta::minutes(DEFAULT_STEP_MINUTES))
    }
}

impl Sampler {
    pub fn new(step: TimeDelta) -> Self {
        Self {
            step,
            start: None,
            threshold: TimeDelta::zero(),
        }
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    pub fn threshold(&self) -> TimeDelta {
        self.threshold
    }

    pub fn accept(&mut self, sample: LogMatch) -> Option<OutputRow> {
        let start = *self.start.get_or_insert(sample.timestamp);
        let elapsed = sample.timestamp - start;
        if elapsed < self.threshold {
            return None;
        }
        self.threshold += self.step;

        Some(OutputRow {
            date: sample.date,
            elapsed,
            height: sample.height,
        })
    }

    /// Single forward pass over `lines`, consuming the sampler.
    pub fn samples<I>(self, path: impl Into<PathBuf>, lines: I) -> Samples<I::IntoIter>
    where
        I: IntoIterator<Item = std::io::Result<String>>,
    {
        Samples {
            sampler: self,
            path: path.into(),
            lines: lines.into_iter(),
            line: 0,
            done: false,
        }
    }
}

/// Lazy sequence of accepted rows. Stops after the first error.
pub struct Samples<I> {
    sampler: Sampler,
    path: PathBuf,
    lines: I,
    line: usize,
    done: bool,
}

impl<I> Iterator for Samples<I>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    type Item = SyncTimeResult<OutputRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for text in self.lines.by_ref() {
            self.line += 1;
            let text = match text {
                Ok(text) => text,
                Err(e) => {
                    self.done = true;
                    return Some(Err(SyncTimeError::io(&self.path, e)));
                }
            };
            match parse_line(self.line, &text) {
                Ok(Some(sample)) => {
                    if let Some(row) = self.sampler.accept(sample) {
                        return Some(Ok(row));
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        self.done = true;
        None
    }
}

#[cfg(test)]
#[path = "sampler_test.rs"]
mod tests;
