//! Error types for tape-layout.
//!
//! Layout errors live in [`crate::tape::TapeError`]; this module covers the
//! file-facing layers (configuration and job files).

use std::path::PathBuf;

use thiserror::Error;

use crate::tape::TapeError;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors that can occur while loading or resolving a job file.
#[derive(Error, Debug)]
pub enum JobError {
    /// Job file could not be read.
    #[error("failed to read job file: {path}")]
    ReadError {
        /// Path to the job file (`-` for stdin).
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Job JSON could not be parsed.
    #[error("failed to parse job: {source}")]
    ParseError {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The job lists no tapes.
    #[error("job contains no tapes")]
    Empty,

    /// A tape entry lacks a value that cannot be defaulted.
    #[error("tape {index} ({name}): missing {field}")]
    MissingField {
        /// Zero-based position of the tape in the job.
        index: usize,
        /// Tape name, or `unnamed`.
        name: String,
        /// Description of the missing value.
        field: String,
    },

    /// A tape entry failed validation.
    #[error("tape {index} ({name}): {source}")]
    Tape {
        /// Zero-based position of the tape in the job.
        index: usize,
        /// Tape name, or `unnamed`.
        name: String,
        /// The underlying layout error.
        #[source]
        source: TapeError,
    },

    /// The job-level gap is not a usable length.
    #[error("invalid gap between tapes: {message}")]
    InvalidGap {
        /// Description of what's wrong.
        message: String,
    },
}

impl JobError {
    /// Returns the layout error behind a [`JobError::Tape`].
    #[must_use]
    pub const fn tape_error(&self) -> Option<&TapeError> {
        match self {
            Self::Tape { source, .. } => Some(source),
            _ => None,
        }
    }
}
