use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// `<input><suffix>`, e.g. `debug.log` -> `debug.log.csv`.
pub fn generate_output_name(input: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// `<file name><suffix>` inside `directory`.
pub fn generate_output_in(directory: &Path, input: &Path, suffix: &str) -> PathBuf {
    let file_name = input.file_name().unwrap_or(input.as_os_str());
    generate_output_name(&directory.join(file_name), suffix)
}

/// Hidden sibling used while the output is being written.
pub fn generate_tmp_name(output: &Path) -> PathBuf {
    let mut tmp_name = OsString::from(".");
    tmp_name.push(output.file_name().unwrap_or(output.as_os_str()));
    output.with_file_name(tmp_name)
}
