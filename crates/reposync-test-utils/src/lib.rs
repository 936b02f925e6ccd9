//! Shared test utilities for the reposync workspace.
//!
//! This crate provides directory fixtures for the crate test suites. It is a
//! dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`], a temporary directory with file helpers
//! - [`roots`]: [`SyncRoots`], a build root and a workspace root side by side

pub mod roots;
pub mod tree;

pub use roots::SyncRoots;
pub use tree::TestTree;
