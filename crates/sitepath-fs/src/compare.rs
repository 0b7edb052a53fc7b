//! Byte-level comparison of a copy against its origin

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

const CHUNK: usize = 64 * 1024;

/// Differences between a copied tree and its origin.
///
/// Paths are relative to the compared roots. When two single files are
/// compared, a differing result holds the copy's file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeDiff {
    /// Present in the origin only
    pub added: Vec<PathBuf>,
    /// Present in the copy only
    pub removed: Vec<PathBuf>,
    /// Present in both with different content or a different entry type
    pub differing: Vec<PathBuf>,
}

impl TreeDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.differing.is_empty()
    }
}

/// Compare two files byte for byte.
pub fn files_identical(a: &Path, b: &Path) -> Result<bool> {
    let len_a = fs::metadata(a).map_err(|e| Error::io(a, e))?.len();
    let len_b = fs::metadata(b).map_err(|e| Error::io(b, e))?.len();
    if len_a != len_b {
        return Ok(false);
    }

    let mut ra = BufReader::new(File::open(a).map_err(|e| Error::io(a, e))?);
    let mut rb = BufReader::new(File::open(b).map_err(|e| Error::io(b, e))?);
    let mut buf_a = vec![0u8; CHUNK];
    let mut buf_b = vec![0u8; CHUNK];
    loop {
        let n = read_full(&mut ra, &mut buf_a).map_err(|e| Error::io(a, e))?;
        let m = read_full(&mut rb, &mut buf_b).map_err(|e| Error::io(b, e))?;
        if n != m || buf_a[..n] != buf_b[..m] {
            return Ok(false);
        }
        if n == 0 {
            return Ok(true);
        }
    }
}

/// Compare a copied entry against its origin, recursing into directories.
pub fn compare_entries(copy: &Path, origin: &Path) -> Result<TreeDiff> {
    let mut diff = TreeDiff::default();
    let root = PathBuf::from(copy.file_name().unwrap_or_default());
    match (copy.is_dir(), origin.is_dir()) {
        (true, true) => compare_dirs(copy, origin, Path::new(""), &mut diff)?,
        (false, false) => {
            if !files_identical(copy, origin)? {
                diff.differing.push(root);
            }
        }
        _ => diff.differing.push(root),
    }
    Ok(diff)
}

fn compare_dirs(copy: &Path, origin: &Path, rel: &Path, diff: &mut TreeDiff) -> Result<()> {
    let in_copy = child_names(copy)?;
    let in_origin = child_names(origin)?;

    for name in in_origin.difference(&in_copy) {
        diff.added.push(rel.join(name));
    }
    for name in in_copy.difference(&in_origin) {
        diff.removed.push(rel.join(name));
    }
    for name in in_copy.intersection(&in_origin) {
        let c = copy.join(name);
        let o = origin.join(name);
        let child_rel = rel.join(name);
        match (c.is_dir(), o.is_dir()) {
            (true, true) => compare_dirs(&c, &o, &child_rel, diff)?,
            (false, false) => {
                if !files_identical(&c, &o)? {
                    diff.differing.push(child_rel);
                }
            }
            _ => diff.differing.push(child_rel),
        }
    }
    Ok(())
}

fn child_names(dir: &Path) -> Result<BTreeSet<OsString>> {
    let mut names = BTreeSet::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        names.insert(entry.file_name());
    }
    Ok(names)
}

// `Read::read` may return short counts; fill as much of `buf` as possible.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
