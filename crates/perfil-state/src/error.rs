//! Error types for state persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while encoding, decoding, or storing state.
#[derive(Debug, Error)]
pub enum StateError {
    /// The state blob was empty.
    #[error("state blob is empty")]
    Empty,

    /// Failed to parse the state blob
    #[error("failed to parse state: {0}")]
    Parse(#[source] serde_json::Error),

    /// Failed to serialize state
    #[error("failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A slope field held a value that names no supported slope
    #[error("invalid slope value: {0} dB/Oct")]
    InvalidSlope(u32),

    /// Failed to read a state file
    #[error("failed to read state file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a state file
    #[error("failed to write state file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl StateError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StateError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StateError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StateError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
