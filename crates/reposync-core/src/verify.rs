//! Content pass: confirm which candidates really changed
//!
//! Text files are compared with CRLF folded to LF, so a checkout that only
//! rewrote line endings is not a change. Binary files compare byte for byte.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use reposync_fs::{RelPath, files_equivalent};

use crate::pair::PathPair;
use crate::report::VerifyWarning;
use crate::scan::{CandidateEntry, EntryKind};

/// Result of the content pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyOutcome {
    /// Confirmed changes in candidate order, each path once
    pub changes: Vec<RelPath>,
    /// Files that could not be compared and were kept as changes
    pub warnings: Vec<VerifyWarning>,
}

/// Content verification stage.
///
/// Infallible: a file that cannot be compared counts as changed.
pub trait Verifier: Send + Sync {
    fn verify(&self, candidates: &[CandidateEntry], pair: &PathPair) -> VerifyOutcome;
}

/// Reads both sides of each file candidate and compares them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentVerifier;

impl ContentVerifier {
    pub fn new() -> Self {
        Self
    }
}

/// Destination vanished (or a parent became a file) between the passes.
fn destination_gone(error: &reposync_fs::Error, destination: &Path) -> bool {
    match error {
        reposync_fs::Error::Io { path, source } => {
            path == destination
                && matches!(
                    source.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                )
        }
        _ => false,
    }
}

impl Verifier for ContentVerifier {
    fn verify(&self, candidates: &[CandidateEntry], pair: &PathPair) -> VerifyOutcome {
        let mut outcome = VerifyOutcome::default();
        let mut seen = HashSet::new();

        for candidate in candidates {
            if candidate.kind == EntryKind::Directory || !seen.insert(&candidate.path) {
                continue;
            }

            if candidate.reason.is_absent() {
                tracing::debug!(path = %candidate.path, "Changed (absent at destination)");
                outcome.changes.push(candidate.path.clone());
                continue;
            }

            let source = pair.source_of(&candidate.path);
            let destination = pair.destination_of(&candidate.path);

            match files_equivalent(&source, &destination) {
                Ok(true) => {
                    tracing::debug!(path = %candidate.path, "Unchanged after normalization");
                }
                Ok(false) => {
                    tracing::debug!(path = %candidate.path, "Changed");
                    outcome.changes.push(candidate.path.clone());
                }
                Err(e) if destination_gone(&e, &destination) => {
                    outcome.changes.push(candidate.path.clone());
                }
                Err(e) => {
                    tracing::warn!(
                        path = %candidate.path,
                        error = %e,
                        "Could not compare, treating as changed"
                    );
                    outcome.warnings.push(VerifyWarning {
                        path: candidate.path.clone(),
                        reason: e.to_string(),
                    });
                    outcome.changes.push(candidate.path.clone());
                }
            }
        }

        outcome
    }
}
