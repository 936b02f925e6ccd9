//! Selective copy of verified changes
//!
//! Each file is replaced atomically; the list as a whole is not. A failed
//! file is recorded and the rest are still copied. Directories missing at
//! the destination are created as well, so an empty source directory does
//! not stay a candidate forever.

use reposync_fs::{ExclusionSet, RelPath, io};

use crate::pair::PathPair;
use crate::report::CopyFailure;

/// What the copy stage did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyOutcome {
    pub copied: Vec<RelPath>,
    /// Directories created at the destination
    pub created_dirs: Vec<RelPath>,
    pub failed: Vec<CopyFailure>,
    /// Paths refused because they fall under the exclusion set
    pub skipped_excluded: Vec<RelPath>,
    pub bytes_copied: u64,
}

impl CopyOutcome {
    /// Fold a later outcome of the same pass into this one.
    pub fn absorb(&mut self, other: CopyOutcome) {
        self.copied.extend(other.copied);
        self.created_dirs.extend(other.created_dirs);
        self.failed.extend(other.failed);
        self.skipped_excluded.extend(other.skipped_excluded);
        self.bytes_copied += other.bytes_copied;
    }
}

/// Copy stage. Never deletes and never writes to the source.
pub trait Copier: Send + Sync {
    fn copy(
        &self,
        changes: &[RelPath],
        pair: &PathPair,
        exclusions: &ExclusionSet,
    ) -> CopyOutcome;

    /// Create directories that exist only at the source.
    fn create_dirs(
        &self,
        dirs: &[RelPath],
        pair: &PathPair,
        exclusions: &ExclusionSet,
    ) -> CopyOutcome;
}

/// Copies files with [`io::copy_atomic`], keeping mode and mtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCopier;

impl FileCopier {
    pub fn new() -> Self {
        Self
    }
}

impl Copier for FileCopier {
    fn copy(
        &self,
        changes: &[RelPath],
        pair: &PathPair,
        exclusions: &ExclusionSet,
    ) -> CopyOutcome {
        let mut outcome = CopyOutcome::default();

        for path in changes {
            if exclusions.is_excluded(path) {
                tracing::warn!(path = %path, "Refusing to copy excluded path");
                outcome.skipped_excluded.push(path.clone());
                continue;
            }

            match io::copy_atomic(&pair.source_of(path), &pair.destination_of(path)) {
                Ok(bytes) => {
                    tracing::debug!(path = %path, bytes, "Copied");
                    outcome.bytes_copied += bytes;
                    outcome.copied.push(path.clone());
                }
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Copy failed");
                    outcome.failed.push(CopyFailure {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        outcome
    }

    fn create_dirs(
        &self,
        dirs: &[RelPath],
        pair: &PathPair,
        exclusions: &ExclusionSet,
    ) -> CopyOutcome {
        let mut outcome = CopyOutcome::default();

        for path in dirs {
            if exclusions.is_excluded(path) {
                tracing::warn!(path = %path, "Refusing to create excluded directory");
                outcome.skipped_excluded.push(path.clone());
                continue;
            }

            match io::create_dir_all(&pair.destination_of(path)) {
                Ok(()) => {
                    tracing::debug!(path = %path, "Created directory");
                    outcome.created_dirs.push(path.clone());
                }
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Directory creation failed");
                    outcome.failed.push(CopyFailure {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        outcome
    }
}
