//! Error handling for the slidectl crate.

use std::{io, path::PathBuf, result};

use thiserror::Error;

/// Convenient result type for slidectl operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running a session.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Reading a file failed.
    #[error("Unable to read {path}: {source}")]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The script is not valid RON.
    #[error("Failed to parse script: {0}")]
    Script(String),
    /// Option parsing or validation failed.
    #[error("Configuration error: {0}")]
    Config(#[from] slider_config::Error),
    /// The slider rejected a step.
    #[error("Slider error: {0}")]
    Slider(#[from] slider_engine::Error),
    /// A `wait` step carried an unparseable duration.
    #[error("Invalid duration: {0}")]
    Duration(#[from] humantime::DurationError),
    /// JSON output failed.
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ron::error::SpannedError> for Error {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::Script(err.to_string())
    }
}
