/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncTimeError {
    #[error("input not found: {path}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid timestamp on line {line}: [{text}]")]
    Parse { line: usize, text: String },

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type SyncTimeResult<T> = Result<T, SyncTimeError>;

impl SyncTimeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncTimeError::Io {
            path: path.into(),
            source,
        }
    }

    /// Opening an input: a missing or unreadable file is `NotFound`, anything
    /// else stays an i/o failure.
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                SyncTimeError::NotFound {
                    path: path.into(),
                    source,
                }
            }
            _ => SyncTimeError::io(path, source),
        }
    }

    pub fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            SyncTimeError::NotFound { .. } => exitcode::NOINPUT,
            SyncTimeError::Parse { .. } => exitcode::DATAERR,
            SyncTimeError::Io { .. } => exitcode::IOERR,
            SyncTimeError::Csv { .. } => exitcode::IOERR,
            SyncTimeError::Config(_) => exitcode::CONFIG,
        }
    }
}
