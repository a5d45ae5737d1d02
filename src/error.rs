//! Custom error types for envput
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for envput operations
#[derive(Error, Debug)]
pub enum EnvputError {
    /// Missing or invalid configuration file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Named environment is not present in the configuration
    #[error("Environment '{name}' not found. Available: {available}")]
    EnvironmentNotFound { name: String, available: String },

    /// Local environment file is missing
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Remote blob is missing
    #[error("File not found: {0}")]
    StorageNotFound(String),

    /// Network, permission or service failure while talking to the blob store
    #[error("Storage error: {0}")]
    StorageTransfer(String),

    /// Packed blob is too short or declares an out-of-range length
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Padding or format failure after decrypting.
    /// A wrong passphrase and corrupted data both end up here.
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// Local file I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Some environments of an `--all` run failed; each was reported as it happened
    #[error("{failed} of {total} environment(s) failed")]
    BatchFailed { failed: usize, total: usize },

    /// The user declined an interactive confirmation
    #[error("{0}")]
    Cancelled(String),
}

impl EnvputError {
    /// Create a "not found" error for an environment, listing the alternatives
    pub fn environment_not_found<'a>(
        name: impl Into<String>,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::EnvironmentNotFound {
            name: name.into(),
            available: available.into_iter().collect::<Vec<_>>().join(", "),
        }
    }

    /// Check if the stored data could not be turned back into plaintext
    pub fn is_decryption(&self) -> bool {
        matches!(self, Self::Decryption(_) | Self::MalformedEnvelope(_))
    }

    /// Check if the user cancelled the operation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

impl From<std::io::Error> for EnvputError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EnvputError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for envput operations
pub type EnvputResult<T> = Result<T, EnvputError>;
