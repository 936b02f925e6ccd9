//! Project manifest parsing
//!
//! The manifest lists the projects of a build tree in declaration order:
//!
//! ```toml
//! [[project]]
//! name = "alpha"
//! path = "components/alpha"
//! ```
//!
//! JSON and YAML files with the same shape are accepted by extension, as is
//! the XML manifest format of the `repo` tool:
//!
//! ```xml
//! <manifest>
//!   <remote name="origin" fetch=".."/>
//!   <project name="alpha.git" path="components/alpha"/>
//! </manifest>
//! ```
//!
//! A trailing `.git` on a project name is dropped, so `alpha.git` registers
//! as `alpha`.

use std::path::Path;

use reposync_fs::{ConfigStore, RelPath, io};
use serde::{Deserialize, Serialize};

use crate::{Error, Registry, RepositoryEntry, Result};

/// A `[[project]]` entry as written in the manifest.
///
/// Both fields are optional on disk; entries lacking either are ignored when
/// the registry is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default, alias = "@name")]
    pub name: Option<String>,
    #[serde(default, alias = "@path")]
    pub path: Option<String>,
}

const GIT_SUFFIX: &str = ".git";

/// Registry name for a declared project name.
fn repository_name(declared: &str) -> &str {
    let declared = declared.trim();
    declared.strip_suffix(GIT_SUFFIX).unwrap_or(declared)
}

/// Parsed project manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "project")]
    pub projects: Vec<ProjectEntry>,
}

impl Manifest {
    /// Parse a manifest from TOML content.
    ///
    /// # Example
    ///
    /// ```
    /// use reposync_meta::Manifest;
    ///
    /// let manifest = Manifest::parse(r#"
    /// [[project]]
    /// name = "alpha"
    /// path = "components/alpha"
    /// "#).unwrap();
    ///
    /// assert_eq!(manifest.projects.len(), 1);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::InvalidManifest {
            path: "<inline>".into(),
            message: e.to_string(),
        })
    }

    /// Parse a `repo`-style XML manifest.
    ///
    /// Only the `name` and `path` attributes of `<project>` elements are
    /// read; every other element and attribute is ignored.
    pub fn parse_xml(content: &str) -> Result<Self> {
        quick_xml::de::from_str(content).map_err(|e| Error::InvalidManifest {
            path: "<inline>".into(),
            message: e.to_string(),
        })
    }

    /// Load a manifest file, choosing the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let is_xml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
        let manifest = if is_xml {
            let content = io::read_text(path)?;
            Self::parse_xml(&content).map_err(|e| match e {
                Error::InvalidManifest { message, .. } => Error::InvalidManifest {
                    path: path.to_path_buf(),
                    message,
                },
                other => other,
            })?
        } else {
            ConfigStore::new().load(path)?
        };
        tracing::debug!(?path, projects = manifest.projects.len(), "Loaded manifest");
        Ok(manifest)
    }

    /// Build a registry from the usable entries, keeping declaration order.
    ///
    /// # Errors
    ///
    /// Fails if a name is declared twice or a path escapes its root.
    pub fn into_registry(self) -> Result<Registry> {
        let entries = self.projects.into_iter().filter_map(|project| {
            match (project.name, project.path) {
                (Some(name), Some(path)) if !repository_name(&name).is_empty() => {
                    Some(RepositoryEntry {
                        name: repository_name(&name).to_string(),
                        path: RelPath::new(path),
                    })
                }
                (name, path) => {
                    tracing::debug!(?name, ?path, "Skipping incomplete manifest entry");
                    None
                }
            }
        });
        Registry::from_entries(entries)
    }
}

/// Load a manifest file straight into a registry.
pub fn load_registry(path: &Path) -> Result<Registry> {
    Manifest::load(path)?.into_registry()
}
