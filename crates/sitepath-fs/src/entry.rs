//! Classification of destination entries
//!
//! Uses `symlink_metadata`, so a dangling symlink counts as present.

use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// What occupies a path, without following a final symlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Nothing at the path
    Absent,
    /// A symlink, dangling or not
    Symlink,
    /// A real directory
    Directory,
    /// A regular file
    File,
    /// Sockets, fifos, devices
    Other,
}

impl EntryKind {
    /// Classify whatever is at `path`.
    pub fn of(path: &Path) -> Result<Self> {
        match fs::symlink_metadata(path) {
            Ok(meta) => {
                let ft = meta.file_type();
                Ok(if ft.is_symlink() {
                    Self::Symlink
                } else if ft.is_dir() {
                    Self::Directory
                } else if ft.is_file() {
                    Self::File
                } else {
                    Self::Other
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::Absent),
            Err(e) => Err(Error::io(path, e)),
        }
    }

    pub fn is_present(self) -> bool {
        self != Self::Absent
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Symlink => "symlink",
            Self::Directory => "directory",
            Self::File => "file",
            Self::Other => "special file",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
