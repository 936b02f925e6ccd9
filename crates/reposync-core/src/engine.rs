//! Sync orchestration
//!
//! One pass is a strictly sequential state machine:
//!
//! ```text
//! SELECT -> SCAN -> (VERIFY -> COPY | SKIP) -> REPORT
//! ```
//!
//! Selection and scanning failures end the pass before anything is written.
//! Verify and copy problems are collected into the [`SyncReport`].

use std::fmt;
use std::time::Instant;

use reposync_fs::{ExclusionSet, RelPath};
use reposync_meta::Registry;

use crate::config::Settings;
use crate::copy::{CopyOutcome, Copier, FileCopier};
use crate::pair::{Direction, PathPair, RepositoryPaths};
use crate::report::SyncReport;
use crate::scan::{CandidateReason, EntryKind, MetadataScanner, Scanner};
use crate::verify::{ContentVerifier, Verifier};
use crate::{Error, Result};

/// States of a sync pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Select,
    Scan,
    Verify,
    Copy,
    /// Nothing to copy; straight to the report
    Skip,
    Report,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncStage::Select => "select",
            SyncStage::Scan => "scan",
            SyncStage::Verify => "verify",
            SyncStage::Copy => "copy",
            SyncStage::Skip => "skip",
            SyncStage::Report => "report",
        };
        f.write_str(name)
    }
}

/// Per-pass behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Scan and verify, but write nothing
    pub dry_run: bool,
}

/// Runs sync passes for the repositories of one registry.
///
/// The scan, verify and copy stages are replaceable through
/// [`SyncEngine::with_scanner`], [`SyncEngine::with_verifier`] and
/// [`SyncEngine::with_copier`].
pub struct SyncEngine {
    settings: Settings,
    registry: Registry,
    exclusions: ExclusionSet,
    options: SyncOptions,
    scanner: Box<dyn Scanner>,
    verifier: Box<dyn Verifier>,
    copier: Box<dyn Copier>,
}

impl SyncEngine {
    /// Create an engine with the default stages.
    ///
    /// # Errors
    ///
    /// Fails if the settings do not validate.
    pub fn new(settings: &Settings, registry: Registry) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            exclusions: settings.exclusion_set()?,
            scanner: Box::new(MetadataScanner::new(settings.mtime_tolerance())),
            verifier: Box::new(ContentVerifier::new()),
            copier: Box::new(FileCopier::new()),
            options: SyncOptions::default(),
            settings: settings.clone(),
            registry,
        })
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_scanner(mut self, scanner: impl Scanner + 'static) -> Self {
        self.scanner = Box::new(scanner);
        self
    }

    pub fn with_verifier(mut self, verifier: impl Verifier + 'static) -> Self {
        self.verifier = Box::new(verifier);
        self
    }

    pub fn with_copier(mut self, copier: impl Copier + 'static) -> Self {
        self.copier = Box::new(copier);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Both locations of a registered repository.
    pub fn paths_for(&self, name: &str) -> Result<RepositoryPaths> {
        let fragment = self.registry.resolve(name)?;
        Ok(RepositoryPaths::derive(&self.settings, fragment))
    }

    /// Workspace to build tree.
    pub fn sync_to(&self, token: &str) -> Result<SyncReport> {
        self.sync(Direction::To, token)
    }

    /// Build tree to workspace.
    pub fn sync_from(&self, token: &str) -> Result<SyncReport> {
        self.sync(Direction::From, token)
    }

    /// Run one pass for the repository named or numbered by `token`.
    ///
    /// # Errors
    ///
    /// - [`Error::RepositoryNotFound`] if the token selects nothing
    /// - [`Error::ScanFailed`] if the metadata pass cannot complete
    /// - [`Error::CopyPartialFailure`] if any verified change failed to copy;
    ///   the report inside lists what was and was not written
    pub fn sync(&self, direction: Direction, token: &str) -> Result<SyncReport> {
        let started = Instant::now();

        enter(SyncStage::Select);
        let repository = self.registry.select(token).map_err(|e| match e {
            reposync_meta::Error::RepositoryNotFound { token } => {
                Error::RepositoryNotFound { token }
            }
            other => Error::Meta(other),
        })?;
        let pair = self.paths_for(repository.as_str())?.orient(direction);

        let span = tracing::info_span!("sync", repository = %repository, %direction);
        let _guard = span.enter();

        let mut report = SyncReport::begin(repository.as_str(), direction, &pair);
        report.dry_run = self.options.dry_run;
        self.run(&pair, &mut report)?;

        enter(SyncStage::Report);
        report.elapsed = started.elapsed();
        tracing::info!(
            candidates = report.candidates_found,
            changes = report.verified_changes.len(),
            copied = report.copied_paths.len(),
            created_dirs = report.created_dirs.len(),
            failed = report.failed.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Sync pass complete"
        );

        if report.is_success() {
            Ok(report)
        } else {
            Err(Error::CopyPartialFailure {
                report: Box::new(report),
            })
        }
    }

    /// SCAN, VERIFY and COPY, stopping early when a stage leaves nothing to do.
    fn run(&self, pair: &PathPair, report: &mut SyncReport) -> Result<()> {
        enter(SyncStage::Scan);
        let scan = self.scanner.scan(pair, &self.exclusions)?;
        report.candidates_found = scan.candidates.len();
        report.destination_only = scan.destination_only;
        if scan.candidates.is_empty() {
            enter(SyncStage::Skip);
            return Ok(());
        }

        let missing_dirs: Vec<RelPath> = scan
            .candidates
            .iter()
            .filter(|c| c.kind == EntryKind::Directory && c.reason == CandidateReason::Missing)
            .map(|c| c.path.clone())
            .collect();

        enter(SyncStage::Verify);
        let verified = self.verifier.verify(&scan.candidates, pair);
        report.verified_changes = verified.changes;
        report.warnings = verified.warnings;
        if (report.verified_changes.is_empty() && missing_dirs.is_empty()) || self.options.dry_run
        {
            enter(SyncStage::Skip);
            return Ok(());
        }

        enter(SyncStage::Copy);
        let mut outcome = CopyOutcome::default();
        if !missing_dirs.is_empty() {
            outcome.absorb(self.copier.create_dirs(&missing_dirs, pair, &self.exclusions));
        }
        if !report.verified_changes.is_empty() {
            outcome.absorb(
                self.copier
                    .copy(&report.verified_changes, pair, &self.exclusions),
            );
        }
        report.copied = !outcome.copied.is_empty();
        report.copied_paths = outcome.copied;
        report.created_dirs = outcome.created_dirs;
        report.failed = outcome.failed;
        report.skipped_excluded = outcome.skipped_excluded;
        report.bytes_copied = outcome.bytes_copied;
        Ok(())
    }
}

fn enter(stage: SyncStage) {
    tracing::debug!(%stage, "Entering stage");
}

impl fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncEngine")
            .field("settings", &self.settings)
            .field("repositories", &self.registry.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
