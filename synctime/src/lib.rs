/*!
 *  Galileo Network Analytics (GNA) Toolkit
 *
 *  Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 *  All Rights Reserved.
 *  See license information in LICENSE.
 */

pub mod error;

pub mod utils {
    pub mod filename;
    pub mod logging;
}

pub mod model {
    pub mod logline;
    pub mod row;
    pub mod sampler;
}

pub mod pipeline {
    use crate::error::{SyncTimeError, SyncTimeResult};
    use chrono::TimeDelta;
    use dotenv::dotenv;
    use std::collections::HashMap;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::Instant;
    use tracing::info;

    pub mod convert;

    pub static OPTIONS: &[&str] = &["interval", "elapsed", "suffix", "extension"];

    /// `key=value;key=value`; an empty string yields no options.
    pub fn parse_options(options_string: &str) -> SyncTimeResult<HashMap<&str, &str>> {
        let mut options: HashMap<&str, &str> = HashMap::new();
        for option in options_string.split(';').filter(|s| !s.trim().is_empty()) {
            let (key, value) = option.split_once('=').ok_or_else(|| {
                SyncTimeError::Config(format!("missing '=' in option [{}]", option))
            })?;
            let key = key.trim();
            if !OPTIONS.contains(&key) {
                return Err(SyncTimeError::Config(format!("unknown option [{}]", key)));
            }
            options.insert(key, value.trim());
        }
        Ok(options)
    }

    /// Sampling step such as `600`, `90s`, `10m` or `1h`. Bare numbers are seconds.
    pub fn parse_step(step_string: &str) -> SyncTimeResult<TimeDelta> {
        let invalid = || SyncTimeError::Config(format!("invalid interval [{}]", step_string));
        let (digits, unit) = match step_string.char_indices().last() {
            Some((index, 's')) => (&step_string[..index], 1),
            Some((index, 'm')) => (&step_string[..index], 60),
            Some((index, 'h')) => (&step_string[..index], 3600),
            Some(_) => (step_string, 1),
            None => return Err(invalid()),
        };
        let count = digits.parse::<i64>().map_err(|_| invalid())?;
        if count <= 0 {
            return Err(invalid());
        }
        count
            .checked_mul(unit)
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(invalid)
    }

    pub fn load_environment() {
        dotenv().ok();
    }

    pub trait FileProcessor {
        /// Handles every file in `file_list`, returning the number of rows written.
        fn process(&mut self, file_list: &[PathBuf]) -> SyncTimeResult<usize>;
        fn get_command(&self) -> &String;
        fn get_input(&self) -> &PathBuf;
        fn get_file_extension(&self) -> &String;

        /// The input itself when it is a file, otherwise the non-hidden files
        /// in the directory ending with `file_extension`, sorted by name.
        fn collect_files(&self, input: &Path, file_extension: &str) -> SyncTimeResult<Vec<PathBuf>> {
            let metadata = fs::metadata(input).map_err(|e| SyncTimeError::open(input, e))?;
            if !metadata.is_dir() {
                return Ok(vec![input.to_path_buf()]);
            }

            let mut file_list: Vec<PathBuf> = Vec::new();
            for entry in fs::read_dir(input).map_err(|e| SyncTimeError::open(input, e))? {
                let file = entry.map_err(|e| SyncTimeError::io(input, e))?;
                let file_name = file.file_name().to_string_lossy().to_string();
                if !file_name.starts_with('.')
                    && file_name.ends_with(file_extension)
                    && file.path().is_file()
                {
                    file_list.push(file.path());
                }
            }
            file_list.sort();
            Ok(file_list)
        }

        fn run(&mut self) -> SyncTimeResult<usize> {
            let command = self.get_command().clone();
            let input = self.get_input().clone();
            let file_extension = self.get_file_extension().clone();

            info!("{}: input: {:?}", command, input);
            let file_list = self.collect_files(&input, &file_extension)?;
            if file_list.is_empty() {
                info!("{}: no {} files to process", command, file_extension);
                return Ok(0);
            }

            let start = Instant::now();
            let total_rows = self.process(&file_list)?;
            info!(
                "{}: processed {} file(s), {} sample(s) in {:?}",
                command,
                file_list.len(),
                total_rows,
                start.elapsed()
            );
            Ok(file_list.len())
        }
    }

}
