//! CLI error type.

use thiserror::Error;

use kvmotion::{ConfigError, RecordingError, SessionError};

/// Errors surfaced to the operator by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// CLI-level configuration problem (bad flag combination, signal
    /// handler setup, ...).
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid session configuration or config file.
    #[error(transparent)]
    Setup(#[from] ConfigError),

    /// The recording session failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A recording file could not be read or parsed.
    #[error(transparent)]
    Recording(#[from] RecordingError),
}
