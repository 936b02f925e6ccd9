//! Error types for reposync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from reposync-core
    #[error(transparent)]
    Core(#[from] reposync_core::Error),

    /// Error from reposync-meta
    #[error(transparent)]
    Meta(#[from] reposync_meta::Error),

    /// Error from reposync-fs
    #[error(transparent)]
    Fs(#[from] reposync_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    ///
    /// `2` repository not found, `3` scan failed, `4` partial copy failure,
    /// `1` for everything else.
    pub fn exit_code(&self) -> i32 {
        use reposync_core::Error as Core;
        use reposync_meta::Error as Meta;

        match self {
            CliError::Core(Core::RepositoryNotFound { .. })
            | CliError::Core(Core::Meta(Meta::RepositoryNotFound { .. }))
            | CliError::Meta(Meta::RepositoryNotFound { .. })
            | CliError::Meta(Meta::UnknownRepository { .. }) => 2,
            CliError::Core(Core::ScanFailed { .. }) => 3,
            CliError::Core(Core::CopyPartialFailure { .. }) => 4,
            _ => 1,
        }
    }
}
