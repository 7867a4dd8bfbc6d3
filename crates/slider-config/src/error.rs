//! Error types for configuration parsing and validation.

use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for the config crate.
pub type Result<T> = StdResult<T, Error>;

#[derive(Debug, Error, Clone, PartialEq)]
/// Errors produced while parsing or validating slider options.
pub enum Error {
    /// `ceil` lies below `floor`.
    #[error("ceil ({ceil}) must not be below floor ({floor})")]
    InvertedBounds {
        /// Configured lower bound.
        floor: f64,
        /// Configured upper bound.
        ceil: f64,
    },

    /// `step` is zero, negative, or not a number.
    #[error("step must be a positive finite number, got {step}")]
    InvalidStep {
        /// Offending step value.
        step: f64,
    },

    /// A numeric option is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Option name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// RON text could not be parsed into options.
    #[error("Options parse error: {message}")]
    Parse {
        /// Parser message including the location.
        message: String,
    },
}

impl From<ron::error::SpannedError> for Error {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}
