//! Repository metadata for reposync
//!
//! - [`Registry`]: ordered table of repository names and path fragments
//! - [`Manifest`]: the on-disk project list a registry is built from
//! - [`select`]: pure resolution of a user token (name or 1-based index)

pub mod error;
pub mod manifest;
pub mod registry;
pub mod selector;

pub use error::{Error, Result};
pub use manifest::{Manifest, ProjectEntry, load_registry};
pub use registry::{Registry, RepositoryEntry, RepositoryId};
pub use selector::select;
