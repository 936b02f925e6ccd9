//! Atomic I/O operations with file locking

use std::fs::{self, File};
use std::io::{self as stdio, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::constants::{TEMP_FILE_PREFIX, TEMP_FILE_SUFFIX};
use crate::{Error, Result};

/// Directory that receives the temp file for `path`, created if missing.
///
/// The temp file lives next to its target (same filesystem), so the final
/// rename is atomic.
fn ensure_parent(path: &Path) -> Result<PathBuf> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| Error::io(&parent, e))?;
    Ok(parent)
}

fn open_locked_temp(dir: &Path, target: &Path) -> Result<NamedTempFile> {
    let temp_file = tempfile::Builder::new()
        .prefix(TEMP_FILE_PREFIX)
        .suffix(TEMP_FILE_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| Error::io(dir, e))?;

    temp_file.as_file().lock_exclusive().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    Ok(temp_file)
}

/// Run `fill` against a locked temp file, then rename it over `path`.
///
/// The temp file is removed if anything fails before the rename.
fn replace_via_temp<F>(path: &Path, fill: F) -> Result<u64>
where
    F: FnOnce(&mut File, &Path) -> Result<u64>,
{
    let parent = ensure_parent(path)?;
    let mut temp_file = open_locked_temp(&parent, path)?;
    let temp_path = temp_file.path().to_path_buf();

    let written = fill(temp_file.as_file_mut(), &temp_path)?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| Error::io(&temp_path, e))?;
    FileExt::unlock(temp_file.as_file()).map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    temp_file
        .persist(path)
        .map_err(|e| Error::io(path, e.error))?;

    Ok(written)
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    replace_via_temp(path, |file, temp_path| {
        file.write_all(content)
            .map_err(|e| Error::io(temp_path, e))?;
        Ok(content.len() as u64)
    })?;
    Ok(())
}

/// Copy `source` over `destination` atomically.
///
/// Missing destination parents are created. Permissions and the modification
/// time of the source are carried over so a later metadata scan sees both
/// sides as equal. Returns the number of bytes copied.
pub fn copy_atomic(source: &Path, destination: &Path) -> Result<u64> {
    let metadata = fs::metadata(source).map_err(|e| Error::io(source, e))?;
    let mut reader = File::open(source).map_err(|e| Error::io(source, e))?;

    replace_via_temp(destination, |file, temp_path| {
        let copied = stdio::copy(&mut reader, file).map_err(|e| Error::io(temp_path, e))?;
        if let Ok(modified) = metadata.modified() {
            file.set_modified(modified)
                .map_err(|e| Error::io(temp_path, e))?;
        }
        file.set_permissions(metadata.permissions())
            .map_err(|e| Error::io(temp_path, e))?;
        Ok(copied)
    })
}

/// Create `path` and any missing parents.
pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Read a whole file.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
