//! Exclusion set shared by the scanner and the copier
//!
//! Patterns are globs matched against every segment of a relative path, so
//! a pattern such as `.git` excludes the directory and everything below it
//! at any depth.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::constants::MetadataDir;
use crate::{Error, RelPath, Result};

/// Directory-name patterns that never take part in a sync.
///
/// Patterns without glob metacharacters are kept as literal names and
/// compared directly; the rest are compiled into a [`GlobSet`].
#[derive(Debug, Clone)]
pub struct ExclusionSet {
    /// Names matched exactly.
    literals: Vec<OsString>,
    /// Compiled glob set for wildcard patterns.
    glob_set: GlobSet,
    /// Raw pattern strings (for display/serialization).
    patterns: Vec<String>,
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl PartialEq for ExclusionSet {
    fn eq(&self, other: &Self) -> bool {
        self.patterns == other.patterns
    }
}

fn is_literal(pattern: &str) -> bool {
    !pattern.contains(['*', '?', '[', ']', '{', '}', '\\'])
}

impl ExclusionSet {
    /// Build a set from glob patterns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] for the first pattern that does not
    /// compile.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut literals = Vec::new();
        let mut globs = Vec::new();
        let mut pattern_list = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref().trim().trim_end_matches('/');
            if pattern.is_empty() || pattern_list.iter().any(|p| p == pattern) {
                continue;
            }
            if is_literal(pattern) {
                literals.push(OsString::from(pattern));
            } else {
                let glob = Glob::new(pattern).map_err(|e| Error::InvalidPattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })?;
                builder.add(glob);
                globs.push(pattern.to_string());
            }
            pattern_list.push(pattern.to_string());
        }

        let glob_set = builder.build().map_err(|e| Error::InvalidPattern {
            pattern: globs.join(", "),
            message: e.to_string(),
        })?;

        Ok(Self {
            literals,
            glob_set,
            patterns: pattern_list,
        })
    }

    /// Version-control and editor metadata directories.
    pub fn with_defaults() -> Self {
        Self {
            literals: MetadataDir::ALL
                .iter()
                .map(|dir| OsString::from(dir.as_str()))
                .collect(),
            glob_set: GlobSet::empty(),
            patterns: MetadataDir::ALL
                .iter()
                .map(|dir| dir.as_str().to_string())
                .collect(),
        }
    }

    /// A set that excludes nothing.
    pub fn empty() -> Self {
        Self {
            literals: Vec::new(),
            glob_set: GlobSet::empty(),
            patterns: Vec::new(),
        }
    }

    /// Get the list of patterns.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Check a single path segment.
    pub fn matches_name(&self, name: impl AsRef<OsStr>) -> bool {
        let name = name.as_ref();
        self.literals.iter().any(|literal| literal == name)
            || self.glob_set.is_match(Path::new(name))
    }

    /// Check whether any segment of `path` is excluded.
    pub fn is_excluded(&self, path: &RelPath) -> bool {
        path.components().any(|segment| self.matches_name(segment))
    }
}
