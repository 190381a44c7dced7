//! Error types for wklint.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while linting or fixing workload definition files.
#[derive(Debug, Error)]
pub enum WklintError {
    /// A source file could not be parsed into a declaration tree.
    #[error("{path}: parse error at {line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        line: u32,
        column: u32,
        message: String,
    },

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The given path does not exist or is not a lintable source file.
    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),

    /// Serializing results failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result alias used across the crate.
pub type Result<T> = std::result::Result<T, WklintError>;
