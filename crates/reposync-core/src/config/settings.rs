//! Effective settings for the reconciliation engine

use std::path::{Path, PathBuf};
use std::time::Duration;

use reposync_fs::{ExclusionSet, MetadataDir, RelPath};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// How repository directories are laid out under the workspace root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceLayout {
    /// One checkout per repository directly under the root, named after the
    /// last segment of its path fragment
    #[default]
    Flat,
    /// The full path fragment is repeated under the workspace root
    Mirrored,
}

impl WorkspaceLayout {
    /// Location of a repository below `workspace_root`.
    pub fn locate(self, workspace_root: &Path, fragment: &RelPath) -> PathBuf {
        match self {
            Self::Flat => match fragment.file_name() {
                Some(name) => workspace_root.join(name),
                None => workspace_root.to_path_buf(),
            },
            Self::Mirrored => fragment.under(workspace_root),
        }
    }
}

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Settings loaded from `config.toml` (or JSON/YAML).
///
/// Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the generated build tree
    pub build_root: PathBuf,

    /// Root of the persistent workspace checkouts
    pub workspace_root: PathBuf,

    /// Project manifest; defaults to `<build_root>/manifest.toml`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,

    /// Directory-name glob patterns excluded from scanning and copying
    pub exclude: Vec<String>,

    /// Modification times closer than this are treated as equal
    pub mtime_tolerance_ms: u64,

    /// Workspace directory layout
    pub workspace_layout: WorkspaceLayout,
}

impl Default for Settings {
    fn default() -> Self {
        let home = home();
        Self {
            build_root: home.join("tmp_build"),
            workspace_root: home.join("workspace"),
            manifest: None,
            exclude: MetadataDir::ALL
                .iter()
                .map(|dir| dir.as_str().to_string())
                .collect(),
            mtime_tolerance_ms: 0,
            workspace_layout: WorkspaceLayout::Flat,
        }
    }
}

impl Settings {
    /// Path of the project manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| self.build_root.join("manifest.toml"))
    }

    /// Compile the exclusion patterns.
    pub fn exclusion_set(&self) -> Result<ExclusionSet> {
        Ok(ExclusionSet::new(&self.exclude)?)
    }

    pub fn mtime_tolerance(&self) -> Duration {
        Duration::from_millis(self.mtime_tolerance_ms)
    }

    /// Reject settings that would make every pass fail.
    pub fn validate(&self) -> Result<()> {
        if self.build_root.as_os_str().is_empty() {
            return Err(Error::InvalidSettings {
                message: "build_root is empty".into(),
            });
        }
        if self.workspace_root.as_os_str().is_empty() {
            return Err(Error::InvalidSettings {
                message: "workspace_root is empty".into(),
            });
        }
        if self.build_root == self.workspace_root {
            return Err(Error::InvalidSettings {
                message: format!(
                    "build_root and workspace_root are both {}",
                    self.build_root.display()
                ),
            });
        }
        self.exclusion_set().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_exclude_metadata_dirs() {
        let settings = Settings::default();
        assert_eq!(settings.exclude, vec![".git".to_string(), ".vscode".to_string()]);
        assert_eq!(settings.mtime_tolerance(), Duration::ZERO);
        assert_eq!(settings.manifest_path(), settings.build_root.join("manifest.toml"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_toml_overrides_fields() {
        let settings: Settings = toml::from_str(
            "build_root = \"/b\"\nworkspace_layout = \"mirrored\"\nmtime_tolerance_ms = 2000\n",
        )
        .unwrap();
        assert_eq!(settings.build_root, PathBuf::from("/b"));
        assert_eq!(settings.workspace_layout, WorkspaceLayout::Mirrored);
        assert_eq!(settings.mtime_tolerance(), Duration::from_secs(2));
    }

    #[test]
    fn test_layout_locate() {
        let fragment = RelPath::new("components/net/alpha");
        let root = Path::new("/ws");
        assert_eq!(WorkspaceLayout::Flat.locate(root, &fragment), root.join("alpha"));
        assert_eq!(
            WorkspaceLayout::Mirrored.locate(root, &fragment),
            root.join("components").join("net").join("alpha")
        );
    }

    #[test]
    fn test_validate_rejects_identical_roots() {
        let settings = Settings {
            build_root: "/same".into(),
            workspace_root: "/same".into(),
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(Error::InvalidSettings { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let settings = Settings {
            exclude: vec!["[oops".into()],
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(Error::Fs(_))));
    }
}
