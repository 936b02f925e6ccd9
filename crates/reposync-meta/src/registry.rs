//! Ordered registry of repository names and their path fragments
//!
//! Declaration order is part of the contract: the selector maps 1-based
//! indices onto [`Registry::list`] exactly as the manifest declared them.

use reposync_fs::RelPath;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A validated repository name.
///
/// Only produced by [`crate::select`], so holding one means the name was a
/// member of the registry it was selected from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryId(String);

impl RepositoryId {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RepositoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One registered repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    /// Unique repository name
    pub name: String,
    /// Path fragment below the build root
    pub path: RelPath,
}

/// Registry mapping repository names to path fragments.
///
/// # Example
///
/// ```
/// use reposync_meta::Registry;
///
/// let mut registry = Registry::new();
/// registry.register("alpha", "components/alpha").unwrap();
/// registry.register("beta", "libs/beta").unwrap();
///
/// assert_eq!(registry.list(), vec!["alpha", "beta"]);
/// assert_eq!(registry.resolve("beta").unwrap().to_string(), "libs/beta");
/// assert!(registry.resolve("gamma").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: Vec<RepositoryEntry>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from entries in declaration order.
    ///
    /// # Errors
    ///
    /// Fails on the first duplicate name or escaping path fragment.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = RepositoryEntry>,
    {
        let mut registry = Self::new();
        for entry in entries {
            registry.push(entry)?;
        }
        Ok(registry)
    }

    /// Register a repository at the end of the declaration order.
    pub fn register(&mut self, name: impl Into<String>, path: impl Into<RelPath>) -> Result<()> {
        self.push(RepositoryEntry {
            name: name.into(),
            path: path.into(),
        })
    }

    fn push(&mut self, entry: RepositoryEntry) -> Result<()> {
        if self.contains(&entry.name) {
            return Err(Error::DuplicateRepository { name: entry.name });
        }
        if !entry.path.is_contained() {
            return Err(Error::InvalidPathFragment {
                name: entry.name,
                path: entry.path.to_string(),
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Look up the path fragment for a repository name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownRepository`] if the name is not registered.
    pub fn resolve(&self, name: &str) -> Result<&RelPath> {
        self.get(name)
            .map(|entry| &entry.path)
            .ok_or_else(|| Error::UnknownRepository {
                name: name.to_string(),
            })
    }

    /// Repository names in declaration order.
    pub fn list(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[RepositoryEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&RepositoryEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Resolve a user token against this registry's names.
    pub fn select(&self, token: &str) -> Result<RepositoryId> {
        crate::select(token, &self.list())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
