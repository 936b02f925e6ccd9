//! Root-relative path keys shared by both sides of a sync

use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// A path relative to a tree root.
///
/// The same `RelPath` addresses an entry in the source tree and its
/// counterpart in the destination tree, so it never carries a root, a
/// leading slash, `.` segments or empty segments. Segments are kept as
/// native `OsStr` values: a key taken from the filesystem resolves back to
/// the exact entry it came from, whatever bytes its name holds.
///
/// Textual input (manifests, serialized reports) goes through
/// [`RelPath::new`], which treats both `/` and `\` as separators. Keys read
/// from a directory walk go through [`RelPath::strip_root`], which never
/// reinterprets a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RelPath {
    inner: PathBuf,
}

impl RelPath {
    /// Parse a textual relative path.
    ///
    /// Backslashes are separators; empty and `.` segments and any leading
    /// root are dropped. `..` segments are kept verbatim so callers can
    /// reject them with [`RelPath::is_contained`].
    pub fn new(path: impl AsRef<str>) -> Self {
        let inner = path
            .as_ref()
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect();
        Self { inner }
    }

    /// Build a key from a native relative path, segment by segment.
    ///
    /// Names are taken as-is; only roots, prefixes and `.` are dropped.
    pub fn from_native(path: &Path) -> Self {
        let mut inner = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(segment) => inner.push(segment),
                Component::ParentDir => inner.push(".."),
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
        Self { inner }
    }

    /// Express `full` relative to `root`.
    ///
    /// Returns `None` if `full` is not located under `root`.
    pub fn strip_root(root: &Path, full: &Path) -> Option<Self> {
        full.strip_prefix(root).ok().map(Self::from_native)
    }

    /// Borrow the key as a relative native path.
    pub fn as_path(&self) -> &Path {
        &self.inner
    }

    /// True for the tree root itself.
    pub fn is_empty(&self) -> bool {
        self.inner.as_os_str().is_empty()
    }

    /// Iterate over the path segments.
    pub fn components(&self) -> impl Iterator<Item = &OsStr> {
        self.inner.iter()
    }

    /// Number of segments (the root has depth 0).
    pub fn depth(&self) -> usize {
        self.components().count()
    }

    /// Check that the path cannot climb out of the root it is joined to.
    pub fn is_contained(&self) -> bool {
        !self.is_empty() && self.components().all(|segment| segment != "..")
    }

    /// Join this path with a textual segment.
    pub fn join(&self, segment: &str) -> Self {
        let mut inner = self.inner.clone();
        inner.extend(Self::new(segment).inner.iter());
        Self { inner }
    }

    /// Get the parent path, `None` for single-segment paths and the root.
    pub fn parent(&self) -> Option<Self> {
        self.inner
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(|parent| Self {
                inner: parent.to_path_buf(),
            })
    }

    /// Get the last segment.
    pub fn file_name(&self) -> Option<&OsStr> {
        self.inner.file_name()
    }

    /// Resolve this path below `root` as a platform-native path.
    pub fn under(&self, root: &Path) -> PathBuf {
        let mut native = root.to_path_buf();
        native.extend(self.components());
        native
    }
}

impl AsRef<Path> for RelPath {
    fn as_ref(&self) -> &Path {
        &self.inner
    }
}

/// Forward-slash rendering; names that are not valid UTF-8 are shown lossily.
impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, segment) in self.components().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", segment.to_string_lossy())?;
        }
        Ok(())
    }
}

impl From<&str> for RelPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RelPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<RelPath> for String {
    fn from(p: RelPath) -> Self {
        p.to_string()
    }
}

impl From<&Path> for RelPath {
    fn from(p: &Path) -> Self {
        Self::from_native(p)
    }
}

impl PartialEq<&str> for RelPath {
    fn eq(&self, other: &&str) -> bool {
        *self == Self::new(other)
    }
}
