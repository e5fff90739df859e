//! Error types for overlay-settings

use std::path::PathBuf;

/// Result type for overlay-settings operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or saving a settings graph
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Doc(#[from] overlay_doc::Error),

    #[error(transparent)]
    Fs(#[from] overlay_fs::Error),

    #[error("Imported settings file not found: {path} (imported from {imported_from})")]
    ImportNotFound {
        path: PathBuf,
        imported_from: PathBuf,
    },

    #[error("Import cycle detected at {path}")]
    ImportCycle { path: PathBuf },
}
