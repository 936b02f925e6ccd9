//! Metadata pass: flag paths that might differ between source and destination
//!
//! The scanner only looks at file type, size and modification time. Its
//! output is a superset of the real changes; the verifier narrows it down.

use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime};

use reposync_fs::{ExclusionSet, RelPath};
use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::pair::PathPair;
use crate::{Error, Result};

/// File or directory, after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    fn of(metadata: &Metadata) -> Self {
        if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }
}

/// Why the scanner flagged a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateReason {
    /// Nothing at the destination
    Missing,
    /// File on one side, directory on the other
    TypeChanged,
    SizeChanged,
    ModifiedChanged,
}

impl CandidateReason {
    /// Whether the destination is known to lack a usable copy, so no content
    /// comparison is needed.
    pub fn is_absent(self) -> bool {
        matches!(self, CandidateReason::Missing | CandidateReason::TypeChanged)
    }
}

/// A source path that possibly differs from its destination counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub path: RelPath,
    pub kind: EntryKind,
    pub reason: CandidateReason,
}

/// Result of the metadata pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Candidates in discovery order
    pub candidates: Vec<CandidateEntry>,
    /// Top-most paths found only at the destination (informational)
    pub destination_only: Vec<RelPath>,
}

impl ScanOutcome {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Candidate discovery stage.
pub trait Scanner: Send + Sync {
    /// Compare the two trees of `pair`, ignoring everything under `exclusions`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScanFailed`] when either root is unusable or the
    /// source tree cannot be walked.
    fn scan(&self, pair: &PathPair, exclusions: &ExclusionSet) -> Result<ScanOutcome>;
}

/// Walks both trees in file-name order and compares metadata.
#[derive(Debug, Clone, Default)]
pub struct MetadataScanner {
    /// Modification times closer than this count as equal
    mtime_tolerance: Duration,
}

impl MetadataScanner {
    pub fn new(mtime_tolerance: Duration) -> Self {
        Self { mtime_tolerance }
    }

    fn compare(
        &self,
        path: RelPath,
        source: &Metadata,
        destination: &Path,
    ) -> Option<CandidateEntry> {
        let kind = EntryKind::of(source);
        let candidate = |reason| {
            Some(CandidateEntry {
                path: path.clone(),
                kind,
                reason,
            })
        };

        let existing = match fs::metadata(destination) {
            Ok(metadata) => metadata,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::debug!(
                        ?destination,
                        error = %e,
                        "Destination unreadable, treating as missing"
                    );
                }
                return candidate(CandidateReason::Missing);
            }
        };

        if EntryKind::of(&existing) != kind {
            return candidate(CandidateReason::TypeChanged);
        }
        if kind == EntryKind::Directory {
            return None;
        }
        if existing.len() != source.len() {
            return candidate(CandidateReason::SizeChanged);
        }
        if !self.same_mtime(source.modified(), existing.modified()) {
            return candidate(CandidateReason::ModifiedChanged);
        }
        None
    }

    fn same_mtime(&self, left: io::Result<SystemTime>, right: io::Result<SystemTime>) -> bool {
        let (Ok(left), Ok(right)) = (left, right) else {
            return false;
        };
        let delta = left
            .duration_since(right)
            .or_else(|_| right.duration_since(left))
            .unwrap_or(Duration::MAX);
        delta <= self.mtime_tolerance
    }

    fn scan_source(
        &self,
        pair: &PathPair,
        exclusions: &ExclusionSet,
    ) -> Result<Vec<CandidateEntry>> {
        let mut candidates = Vec::new();

        for entry in walk(pair.source(), exclusions) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(pair.source()).to_path_buf();
                Error::scan_failed(path, e)
            })?;
            let Some(path) = RelPath::strip_root(pair.source(), entry.path()) else {
                continue;
            };

            let metadata = match fs::metadata(entry.path()) {
                Ok(metadata) => metadata,
                Err(e) if entry.path_is_symlink() => {
                    tracing::warn!(path = %path, error = %e, "Skipping dangling symlink");
                    continue;
                }
                Err(e) => return Err(Error::scan_failed(entry.path(), e)),
            };

            let destination = pair.destination_of(&path);
            if let Some(candidate) = self.compare(path, &metadata, &destination) {
                tracing::debug!(path = %candidate.path, reason = ?candidate.reason, "Candidate");
                candidates.push(candidate);
            }
        }

        Ok(candidates)
    }

    fn scan_destination_only(&self, pair: &PathPair, exclusions: &ExclusionSet) -> Vec<RelPath> {
        let mut only = Vec::new();
        let mut entries = walk(pair.destination(), exclusions);

        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable destination entry");
                    continue;
                }
            };
            let Some(path) = RelPath::strip_root(pair.destination(), entry.path()) else {
                continue;
            };
            if fs::symlink_metadata(pair.source_of(&path)).is_err() {
                if entry.file_type().is_dir() {
                    entries.skip_current_dir();
                }
                only.push(path);
            }
        }

        only
    }
}

/// Sorted walk below `root`, pruning excluded names. The root itself is not
/// yielded.
fn walk(
    root: &Path,
    exclusions: &ExclusionSet,
) -> walkdir::FilterEntry<walkdir::IntoIter, impl FnMut(&DirEntry) -> bool> {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            entry.depth() == 0 || !exclusions.matches_name(entry.file_name())
        })
}

fn require_dir(root: &Path, side: &str) -> Result<()> {
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(Error::scan_failed(root, format!("{side} root is not a directory"))),
        Err(e) => Err(Error::scan_failed(root, format!("{side} root unavailable: {e}"))),
    }
}

impl Scanner for MetadataScanner {
    fn scan(&self, pair: &PathPair, exclusions: &ExclusionSet) -> Result<ScanOutcome> {
        require_dir(pair.source(), "source")?;
        require_dir(pair.destination(), "destination")?;

        let candidates = self.scan_source(pair, exclusions)?;
        let destination_only = self.scan_destination_only(pair, exclusions);

        tracing::debug!(
            candidates = candidates.len(),
            destination_only = destination_only.len(),
            "Metadata pass complete"
        );

        Ok(ScanOutcome {
            candidates,
            destination_only,
        })
    }
}
