//! Filesystem layer for reposync
//!
//! Provides root-relative path keys, the exclusion set shared by the scanner
//! and the copier, line-ending-insensitive content comparison and atomic
//! per-file copies.

pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod exclude;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::MetadataDir;
pub use content::{ContentKind, contents_equivalent, files_equivalent, normalize_line_endings};
pub use error::{Error, Result};
pub use exclude::ExclusionSet;
pub use path::RelPath;
