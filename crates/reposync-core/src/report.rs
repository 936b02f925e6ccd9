//! Structured summary of one sync pass

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reposync_fs::RelPath;
use serde::{Deserialize, Serialize};

use crate::pair::{Direction, PathPair};

/// A verified change that could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyFailure {
    pub path: RelPath,
    pub reason: String,
}

/// A file whose content could not be read during verification.
///
/// The file is still treated as changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyWarning {
    pub path: RelPath,
    pub reason: String,
}

/// Outcome of one pass, built up stage by stage by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Selected repository name
    pub repository: String,
    pub direction: Direction,
    pub source: PathBuf,
    pub destination: PathBuf,

    /// Number of entries the metadata pass flagged
    pub candidates_found: usize,

    /// Files confirmed different by content, in discovery order
    pub verified_changes: Vec<RelPath>,

    /// True once at least one file was written
    pub copied: bool,

    /// Verified changes that were written
    pub copied_paths: Vec<RelPath>,

    /// Source-only directories created at the destination
    pub created_dirs: Vec<RelPath>,

    /// Verified changes that failed to copy
    pub failed: Vec<CopyFailure>,

    /// Unreadable files treated as changed
    pub warnings: Vec<VerifyWarning>,

    /// Verified changes refused by the copier's exclusion check
    pub skipped_excluded: Vec<RelPath>,

    /// Paths present only at the destination; never deleted
    pub destination_only: Vec<RelPath>,

    pub bytes_copied: u64,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl SyncReport {
    /// Start an empty report for `repository` over `pair`.
    pub fn begin(repository: impl Into<String>, direction: Direction, pair: &PathPair) -> Self {
        Self {
            repository: repository.into(),
            direction,
            source: pair.source().to_path_buf(),
            destination: pair.destination().to_path_buf(),
            candidates_found: 0,
            verified_changes: Vec::new(),
            copied: false,
            copied_paths: Vec::new(),
            created_dirs: Vec::new(),
            failed: Vec::new(),
            warnings: Vec::new(),
            skipped_excluded: Vec::new(),
            destination_only: Vec::new(),
            bytes_copied: 0,
            dry_run: false,
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
        }
    }

    /// False if any verified change failed to copy.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// True when the pass found nothing to do.
    pub fn is_unchanged(&self) -> bool {
        self.verified_changes.is_empty() && self.created_dirs.is_empty()
    }
}
