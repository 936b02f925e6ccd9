//! Reconciliation engine for reposync
//!
//! Mirrors one registered repository between a build tree and a workspace
//! tree, copying only files whose content really changed:
//!
//! ```text
//!   token --select--> RepositoryId --resolve--> PathPair
//!         --scan-->   candidates   (cheap metadata pass)
//!         --verify--> changes      (content pass, CRLF-insensitive)
//!         --copy-->   written files
//!         --report--> SyncReport
//! ```
//!
//! An empty candidate set ends the pass before any content is read, and an
//! empty change set ends it before anything is written.
//!
//! # Example
//!
//! ```no_run
//! use reposync_core::{Direction, Settings, SyncEngine};
//! use reposync_meta::Registry;
//!
//! fn example() -> reposync_core::Result<()> {
//!     let mut registry = Registry::new();
//!     registry.register("alpha", "components/alpha")?;
//!
//!     let engine = SyncEngine::new(&Settings::default(), registry)?;
//!     let report = engine.sync(Direction::To, "1")?;
//!     println!("{} file(s) changed", report.verified_changes.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod copy;
pub mod engine;
pub mod error;
pub mod pair;
pub mod report;
pub mod scan;
pub mod verify;

pub use config::{Settings, SettingsOverrides, SettingsResolver, WorkspaceLayout};
pub use copy::{CopyOutcome, Copier, FileCopier};
pub use engine::{SyncEngine, SyncOptions, SyncStage};
pub use error::{Error, Result};
pub use pair::{Direction, PathPair, RepositoryPaths};
pub use report::{CopyFailure, SyncReport, VerifyWarning};
pub use scan::{CandidateEntry, CandidateReason, EntryKind, MetadataScanner, ScanOutcome, Scanner};
pub use verify::{ContentVerifier, VerifyOutcome, Verifier};
