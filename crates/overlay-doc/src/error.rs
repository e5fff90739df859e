//! Error types for overlay-doc

use std::path::PathBuf;

/// Result type for overlay-doc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or parsing a settings document
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed settings document {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn malformed(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Malformed {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
