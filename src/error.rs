//! Error types for Wakeful
//!
//! Uses `thiserror` for library errors. Per-file failures during
//! provisioning and removal are converted into outcome values at the call
//! site and never surface through this type; only failures outside the
//! per-entry loop do.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Wakeful operations
pub type SetupResult<T> = Result<T, SetupError>;

/// Main error type for Wakeful operations
#[derive(Error, Debug)]
pub enum SetupError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Package manifest could not be parsed
    #[error("invalid package manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    /// Package manifest not found in the target project
    #[error("no package manifest found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// The package manager install command reported failure
    #[error("'{command}' exited with status {status}")]
    InstallFailed { command: String, status: i32 },
}
