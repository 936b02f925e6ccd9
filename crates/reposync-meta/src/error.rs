//! Error types for reposync-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] reposync_fs::Error),

    #[error("Unknown repository: {name}")]
    UnknownRepository { name: String },

    #[error("Repository \"{token}\" not listed in manifest")]
    RepositoryNotFound { token: String },

    #[error("Duplicate repository name \"{name}\" in manifest")]
    DuplicateRepository { name: String },

    #[error("Invalid path \"{path}\" for repository \"{name}\": must be relative and stay inside its root")]
    InvalidPathFragment { name: String, path: String },

    #[error("Invalid manifest at {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },
}
