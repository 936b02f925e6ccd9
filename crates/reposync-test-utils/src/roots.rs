//! [`SyncRoots`]: a build tree and a workspace tree in one temp directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::TestTree;

/// Two sibling roots, `build/` and `workspace/`, plus a manifest writer.
///
/// # Example
///
/// ```rust
/// use reposync_test_utils::SyncRoots;
///
/// let roots = SyncRoots::new();
/// let manifest = roots.write_manifest(&[("alpha", "components/alpha")]);
/// roots.build_tree("components/alpha").write("a.txt", "hello\n");
/// assert!(manifest.exists());
/// ```
pub struct SyncRoots {
    temp_dir: TempDir,
}

impl Default for SyncRoots {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncRoots {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("build")).unwrap();
        fs::create_dir_all(temp_dir.path().join("workspace")).unwrap();
        Self { temp_dir }
    }

    /// Directory holding both roots.
    pub fn base(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn build_root(&self) -> PathBuf {
        self.base().join("build")
    }

    pub fn workspace_root(&self) -> PathBuf {
        self.base().join("workspace")
    }

    /// Helpers for the repository at `fragment` under the build root.
    pub fn build_tree(&self, fragment: &str) -> TestTree {
        TestTree::at(TestTree::at(self.build_root()).path(fragment))
    }

    /// Helpers for the repository directory `name` under the workspace root.
    pub fn workspace_tree(&self, name: &str) -> TestTree {
        TestTree::at(TestTree::at(self.workspace_root()).path(name))
    }

    /// Write `build/manifest.toml` listing `projects` as `(name, path)`.
    pub fn write_manifest(&self, projects: &[(&str, &str)]) -> PathBuf {
        let content: String = projects
            .iter()
            .map(|(name, path)| format!("[[project]]\nname = \"{name}\"\npath = \"{path}\"\n\n"))
            .collect();
        let path = self.build_root().join("manifest.toml");
        fs::write(&path, content).unwrap();
        path
    }
}
