//! Error types for reposync-core

use std::path::PathBuf;

use crate::report::SyncReport;

/// Result type for reposync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can end a sync pass
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The token named no registered repository; nothing was read or written
    #[error("Repository \"{token}\" not listed in manifest")]
    RepositoryNotFound { token: String },

    /// The metadata pass could not complete; nothing was written
    #[error("Scan failed at {path}: {reason}")]
    ScanFailed { path: PathBuf, reason: String },

    /// Some verified changes could not be copied; the others were kept
    #[error("{} of {} file(s) failed to copy", report.failed.len(), report.verified_changes.len())]
    CopyPartialFailure { report: Box<SyncReport> },

    /// Sync direction other than `to` or `from`
    #[error("Invalid direction \"{value}\" (expected \"to\" or \"from\")")]
    InvalidDirection { value: String },

    /// Settings file not found at an explicitly requested path
    #[error("Settings not found at {path}")]
    SettingsNotFound { path: PathBuf },

    /// Settings were readable but unusable
    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },

    /// Registry, manifest or selector error from reposync-meta
    #[error(transparent)]
    Meta(#[from] reposync_meta::Error),

    /// Filesystem error from reposync-fs
    #[error(transparent)]
    Fs(#[from] reposync_fs::Error),
}

impl Error {
    pub(crate) fn scan_failed(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::ScanFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
