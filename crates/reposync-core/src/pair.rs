//! Source/destination path pairs for a repository
//!
//! A repository lives at `build_root/<fragment>` in the build tree and at a
//! layout-dependent location under the workspace root. The [`Direction`] of
//! a pass decides which of the two is the source.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use reposync_fs::RelPath;
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::config::Settings;

/// Which way a sync pass copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Workspace to build tree: push local work into the build.
    To,
    /// Build tree to workspace: pull build edits back.
    From,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::To => "to",
            Direction::From => "from",
        }
    }

    /// Human description of the copy direction.
    pub fn label(self) -> &'static str {
        match self {
            Direction::To => "workspace -> build",
            Direction::From => "build -> workspace",
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "to" | "push" => Ok(Direction::To),
            "from" | "pull" => Ok(Direction::From),
            _ => Err(Error::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Both locations of one repository, independent of direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryPaths {
    pub build: PathBuf,
    pub workspace: PathBuf,
}

impl RepositoryPaths {
    /// Locate a repository's path fragment under the configured roots.
    pub fn derive(settings: &Settings, fragment: &RelPath) -> Self {
        Self {
            build: fragment.under(&settings.build_root),
            workspace: settings
                .workspace_layout
                .locate(&settings.workspace_root, fragment),
        }
    }

    /// Pick source and destination for `direction`.
    pub fn orient(self, direction: Direction) -> PathPair {
        match direction {
            Direction::To => PathPair::new(self.workspace, self.build),
            Direction::From => PathPair::new(self.build, self.workspace),
        }
    }
}

/// Source and destination roots of one pass. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPair {
    source: PathBuf,
    destination: PathBuf,
}

impl PathPair {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn source_of(&self, path: &RelPath) -> PathBuf {
        path.under(&self.source)
    }

    pub fn destination_of(&self, path: &RelPath) -> PathBuf {
        path.under(&self.destination)
    }
}
