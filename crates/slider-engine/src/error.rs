use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for slider controls.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested configuration is invalid; the control keeps its previous one.
    #[error("Invalid slider configuration: {0}")]
    Config(#[from] slider_config::Error),

    /// The control has been torn down.
    #[error("Slider has been destroyed")]
    Destroyed,
}
