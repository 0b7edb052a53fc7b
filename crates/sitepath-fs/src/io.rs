//! Mutating filesystem operations used by the placement engines

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use fs2::FileExt;

use crate::{EntryKind, Error, Result};

/// Write content atomically to a file with locking.
///
/// Writes a temp file next to `path`, then renames it over the target.
/// The parent directory must already exist.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    let written = (|| {
        temp_file
            .lock_exclusive()
            .map_err(|_| Error::LockFailed {
                path: path.to_path_buf(),
            })?;
        temp_file
            .write_all(content)
            .map_err(|e| Error::io(&temp_path, e))?;
        temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;
        temp_file.unlock().map_err(|_| Error::LockFailed {
            path: path.to_path_buf(),
        })?;
        fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))
    })();

    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Copy a file or a directory tree from `origin` to `destination`.
///
/// Symlinks inside a copied tree are followed, so the copy holds real
/// files. `destination` must not exist.
pub fn copy_entry(origin: &Path, destination: &Path) -> Result<()> {
    let meta = fs::metadata(origin).map_err(|e| Error::io(origin, e))?;
    if meta.is_dir() {
        copy_dir(origin, destination)
    } else if meta.is_file() {
        fs::copy(origin, destination).map_err(|e| Error::io(destination, e))?;
        Ok(())
    } else {
        Err(Error::UnsupportedEntry {
            path: origin.to_path_buf(),
        })
    }
}

fn copy_dir(origin: &Path, destination: &Path) -> Result<()> {
    fs::create_dir(destination).map_err(|e| Error::io(destination, e))?;
    let entries = fs::read_dir(origin).map_err(|e| Error::io(origin, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(origin, e))?;
        copy_entry(&entry.path(), &destination.join(entry.file_name()))?;
    }
    Ok(())
}

/// Remove whatever is at `path`. A symlink is unlinked, never followed.
///
/// Removing an absent path succeeds.
pub fn remove_entry(path: &Path) -> Result<()> {
    let result = match EntryKind::of(path)? {
        EntryKind::Absent => return Ok(()),
        EntryKind::Directory => fs::remove_dir_all(path),
        EntryKind::Symlink => remove_symlink(path),
        EntryKind::File | EntryKind::Other => fs::remove_file(path),
    };
    result.map_err(|e| Error::io(path, e))
}

/// Create a symlink at `link` pointing to `origin`.
pub fn create_symlink(origin: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(origin, link);

    #[cfg(windows)]
    let result = if origin.is_dir() {
        std::os::windows::fs::symlink_dir(origin, link)
    } else {
        std::os::windows::fs::symlink_file(origin, link)
    };

    result.map_err(|e| Error::io(link, e))
}

#[cfg(unix)]
fn remove_symlink(path: &Path) -> std::io::Result<()> {
    fs::remove_file(path)
}

// Directory symlinks on Windows are removed like directories.
#[cfg(windows)]
fn remove_symlink(path: &Path) -> std::io::Result<()> {
    fs::remove_file(path).or_else(|_| fs::remove_dir(path))
}
