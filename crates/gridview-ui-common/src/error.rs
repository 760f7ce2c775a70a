//! Error types for UI services.

use std::path::PathBuf;

use gridview_core::GridError;
use thiserror::Error;

/// Result type for UI service operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from UI service operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A grid model operation failed (unresolved id, missing reference, ...).
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Failed to load a grid or scenario file.
    #[error("failed to load {}", path.display())]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// True when the error is an unresolved id or a missing reference.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Grid(err) if err.is_not_found())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
