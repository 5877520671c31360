/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use crate::error::{SyncTimeError, SyncTimeResult};
use crate::model::row::{parse_elapsed_format, ElapsedFormat, OutputRow, HEADER};
use crate::model::sampler::Sampler;
use crate::pipeline::parse_options;
use crate::pipeline::parse_step;
use crate::pipeline::FileProcessor;
use crate::utils::filename::{generate_output_in, generate_output_name, generate_tmp_name};
use chrono::TimeDelta;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct ConvertProcessor {
    pub command: String,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub step: TimeDelta,
    pub elapsed: ElapsedFormat,
    pub suffix: String,
    pub extension: String,
}

impl ConvertProcessor {
    pub fn new(
        command: &str,
        input: &str,
        output: &str,
        options_string: &str,
    ) -> SyncTimeResult<Self> {
        let mut options = parse_options(options_string)?;
        options.entry("interval").or_insert("10m");
        options.entry("elapsed").or_insert("seconds");
        options.entry("suffix").or_insert(".csv");
        options.entry("extension").or_insert(".log");
        for (key, value) in &options {
            if !value.is_empty() {
                info!("{}: [{}={}]", command, key, value);
            }
        }

        let step = parse_step(options["interval"])?;
        let elapsed = parse_elapsed_format(options["elapsed"])?;
        let suffix = options["suffix"];
        if suffix.is_empty() {
            return Err(SyncTimeError::Config(
                "suffix must not be empty, the output would replace the input".to_string(),
            ));
        }

        Ok(Self {
            command: command.to_string(),
            input: PathBuf::from(input),
            output: if output.is_empty() {
                None
            } else {
                Some(PathBuf::from(output))
            },
            step,
            elapsed,
            suffix: suffix.to_string(),
            extension: options["extension"].to_string(),
        })
    }

    pub fn output_path(&self, input: &Path) -> PathBuf {
        match &self.output {
            Some(output) if output.is_dir() => generate_output_in(output, input, &self.suffix),
            Some(output) => output.clone(),
            None => generate_output_name(input, &self.suffix),
        }
    }

    /// Converts one log into a CSV, returning the number of samples written.
    ///
    /// The CSV is written to a hidden sibling and renamed into place once
    /// complete; on failure the partial file is removed.
    pub fn convert_file(&self, input: &Path, output: &Path) -> SyncTimeResult<usize> {
        let reader = File::open(input)
            .map(BufReader::new)
            .map_err(|e| SyncTimeError::open(input, e))?;

        let tmp_filename = generate_tmp_name(output);
        debug!("{}: writing {:?}", self.command, tmp_filename);
        let result = File::create(&tmp_filename)
            .map_err(|e| SyncTimeError::io(&tmp_filename, e))
            .and_then(|file| {
                let rows = Sampler::new(self.step).samples(input, read_lines(reader));
                write_csv(file, &tmp_filename, rows, self.elapsed)
            })
            .and_then(|count| {
                fs::rename(&tmp_filename, output)
                    .map(|_| count)
                    .map_err(|e| SyncTimeError::io(output, e))
            });

        match result {
            Ok(count) => {
                info!(
                    "{}: {:?} -> {:?} ({} samples)",
                    self.command, input, output, count
                );
                Ok(count)
            }
            Err(error) => {
                let _ = fs::remove_file(&tmp_filename);
                Err(error)
            }
        }
    }
}

/// Lines end at `\n`, `\r\n` or a bare `\r`. Invalid UTF-8 is replaced
/// rather than rejected.
pub fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = std::io::Result<String>> {
    reader.split(b'\n').flat_map(|chunk| {
        let lines: Vec<std::io::Result<String>> = match chunk {
            Ok(bytes) => {
                let trimmed = bytes.strip_suffix(b"\r").unwrap_or(&bytes[..]);
                trimmed
                    .split(|byte| *byte == b'\r')
                    .map(|line| Ok(String::from_utf8_lossy(line).into_owned()))
                    .collect()
            }
            Err(e) => vec![Err(e)],
        };
        lines
    })
}

/// True when both paths name the same file on disk, or are equal as written.
pub fn is_same_file(first: &Path, second: &Path) -> bool {
    match (fs::canonicalize(first), fs::canonicalize(second)) {
        (Ok(first), Ok(second)) => first == second,
        _ => first == second,
    }
}

/// Writes the header followed by one record per row and flushes.
pub fn write_csv<W, I>(
    writer: W,
    path: &Path,
    rows: I,
    format: ElapsedFormat,
) -> SyncTimeResult<usize>
where
    W: Write,
    I: IntoIterator<Item = SyncTimeResult<OutputRow>>,
{
    let csv_error = |e: csv::Error| SyncTimeError::Csv {
        path: path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(HEADER).map_err(csv_error)?;
    let mut count = 0;
    for row in rows {
        let row = row?;
        csv_writer
            .serialize(row.to_record(format))
            .map_err(csv_error)?;
        count += 1;
    }
    csv_writer
        .flush()
        .map_err(|e| SyncTimeError::io(path, e))?;
    Ok(count)
}

impl FileProcessor for ConvertProcessor {
    fn get_command(&self) -> &String {
        &self.command
    }
    fn get_input(&self) -> &PathBuf {
        &self.input
    }
    fn get_file_extension(&self) -> &String {
        &self.extension
    }
    fn process(&mut self, file_list: &[PathBuf]) -> SyncTimeResult<usize> {
        if let Some(output) = &self.output {
            if file_list.len() > 1 && !output.is_dir() {
                return Err(SyncTimeError::Config(format!(
                    "output {:?} must be a directory for {} input files",
                    output,
                    file_list.len()
                )));
            }
        }

        let mut total_rows = 0;
        for file in file_list {
            let output = self.output_path(file);
            if is_same_file(file, &output) {
                return Err(SyncTimeError::Config(format!(
                    "output {:?} would replace the input log",
                    output
                )));
            }
            total_rows += self.convert_file(file, &output)?;
        }
        Ok(total_rows)
    }
}

#[cfg(test)]
#[path = "convert_test.rs"]
mod tests;
