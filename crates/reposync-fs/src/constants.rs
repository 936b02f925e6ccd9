//! Well-known directory names and file names.

use std::path::Path;

/// Metadata directories that never take part in a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataDir {
    /// The `.git` directory (version-control database)
    Git,
    /// The `.vscode` directory (editor settings)
    VsCode,
}

impl MetadataDir {
    /// Every metadata directory excluded by default.
    pub const ALL: [MetadataDir; 2] = [MetadataDir::Git, MetadataDir::VsCode];

    /// Get the directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Git => ".git",
            Self::VsCode => ".vscode",
        }
    }
}

impl AsRef<Path> for MetadataDir {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for MetadataDir {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for MetadataDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Directory name used under the platform config dir.
pub const APP_DIR_NAME: &str = "reposync";

/// Settings file name inside [`APP_DIR_NAME`].
pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Prefix of temporary files written next to a destination during a copy.
///
/// Temp names never embed the destination name, so they stay short however
/// long the file being replaced is.
pub const TEMP_FILE_PREFIX: &str = ".reposync-";

/// Suffix of temporary files written next to a destination during a copy.
pub const TEMP_FILE_SUFFIX: &str = ".tmp";
