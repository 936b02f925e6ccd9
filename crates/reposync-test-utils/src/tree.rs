//! [`TestTree`] fixture for filesystem test scenarios.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Helpers rooted at an arbitrary directory.
///
/// Paths passed to the helpers are relative to the root and use `/`.
///
/// # Example
///
/// ```rust
/// use reposync_test_utils::TestTree;
///
/// let tree = TestTree::temp();
/// tree.write("src/main.c", "int main() {}\n");
/// tree.assert_file_contains("src/main.c", "main");
/// ```
pub struct TestTree {
    root: PathBuf,
    _temp_dir: Option<tempfile::TempDir>,
}

impl TestTree {
    /// A fresh, empty temporary directory, removed on drop.
    pub fn temp() -> Self {
        let temp_dir = tempfile::TempDir::new().unwrap();
        Self {
            root: temp_dir.path().to_path_buf(),
            _temp_dir: Some(temp_dir),
        }
    }

    /// Helpers over an existing directory (created if missing).
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        fs::create_dir_all(&root).unwrap();
        Self {
            root,
            _temp_dir: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `rel`.
    pub fn path(&self, rel: &str) -> PathBuf {
        rel.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }

    /// Write a file, creating parent directories.
    pub fn write(&self, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> Vec<u8> {
        fs::read(self.path(rel))
            .unwrap_or_else(|e| panic!("Could not read {}: {e}", self.path(rel).display()))
    }

    pub fn read_string(&self, rel: &str) -> String {
        String::from_utf8(self.read(rel)).unwrap()
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    /// Set the modification time of an existing file.
    pub fn set_mtime(&self, rel: &str, time: SystemTime) {
        File::options()
            .write(true)
            .open(self.path(rel))
            .and_then(|file| file.set_modified(time))
            .unwrap();
    }

    pub fn mtime(&self, rel: &str) -> SystemTime {
        fs::metadata(self.path(rel)).unwrap().modified().unwrap()
    }

    /// Give `rel` the same modification time as `other`'s file at the same
    /// relative path.
    pub fn copy_mtime_from(&self, other: &TestTree, rel: &str) {
        self.set_mtime(rel, other.mtime(rel));
    }

    /// # Panics
    /// Panics if the path does not exist.
    pub fn assert_file_exists(&self, rel: &str) {
        let path = self.path(rel);
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// # Panics
    /// Panics if the path exists.
    pub fn assert_file_not_exists(&self, rel: &str) {
        let path = self.path(rel);
        assert!(!path.exists(), "Expected file NOT to exist: {}", path.display());
    }

    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, rel: &str, content: &str) {
        let actual = self.read_string(rel);
        assert!(
            actual.contains(content),
            "File {rel} does not contain expected content.\nExpected: {content}\nActual: {actual}"
        );
    }
}
