//! Error types for leechup
//!
//! Uses `thiserror` for library errors. Failures of individual shell steps are
//! not errors: they are reported as [`crate::provision::StepOutcome`] values and
//! abort the pipeline without propagating.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for provisioning operations
pub type ProvisionResult<T> = Result<T, ProvisionError>;

/// Main error type for provisioning operations
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// One or more required credential fields are empty or zero
    #[error("missing required credentials: {}", .fields.join(", "))]
    MissingCredentials { fields: Vec<&'static str> },

    /// Removing a previous installation artifact failed
    #[error("failed to remove {path}: {source}")]
    Reset {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing or re-reading the credentials file failed
    #[error("failed to persist credentials to {path}: {source}")]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Credentials could not be encoded or decoded as JSON
    #[error("credentials encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The persisted credentials differ from the in-memory value (strict mode only)
    #[error("credentials file {path} does not match the configured credentials")]
    VerificationMismatch { path: PathBuf },

    /// Config file could not be parsed
    #[error("invalid config file {file}: {message}")]
    ConfigFile { file: PathBuf, message: String },

    /// The bot process could not be started
    #[error("failed to start '{program}': {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
