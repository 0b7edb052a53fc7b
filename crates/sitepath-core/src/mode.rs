//! Placement modes
//!
//! Each mode knows how to create its artifact at a destination and how to
//! take it away again. The engines pick the behaviour by enum value.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sitepath_fs::{EntryKind, io};

use crate::identifier::Identifier;
use crate::marker::{self, Marker};
use crate::{Error, Result};

/// How an origin is made available in a candidate directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// A symlink named after the origin
    Symlink,
    /// A recursive copy of the origin
    Copy,
    /// A `.pth` pointer registering the origin's parent directory
    Develop,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Symlink, Mode::Copy, Mode::Develop];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Symlink => "symlink",
            Self::Copy => "copy",
            Self::Develop => "develop",
        }
    }

    pub fn past(self) -> &'static str {
        match self {
            Self::Symlink => "symlinked",
            Self::Copy => "copied",
            Self::Develop => "developed",
        }
    }

    /// Name of the command that reverses this mode.
    pub fn undo_verb(self) -> &'static str {
        match self {
            Self::Symlink => "unsymlink",
            Self::Copy => "uncopy",
            Self::Develop => "undevelop",
        }
    }

    /// Where this mode places `origin_name` inside `candidate`.
    ///
    /// Symlinks and copies keep the origin's file name; pointers are named
    /// after the identifier.
    pub fn destination(self, candidate: &Path, ident: &Identifier, origin_name: &str) -> PathBuf {
        match self {
            Self::Symlink | Self::Copy => candidate.join(origin_name),
            Self::Develop => marker::pointer_path(candidate, ident),
        }
    }

    /// Create the artifact described by `record` at `destination`.
    ///
    /// For [`Mode::Develop`] the artifact is the pointer sidecar itself, so
    /// it carries the record. The other modes leave the marker to the
    /// caller.
    pub fn apply(self, record: &Marker, destination: &Path) -> Result<()> {
        match self {
            Self::Symlink => io::create_symlink(&record.from, destination)?,
            Self::Copy => io::copy_entry(&record.from, destination)?,
            Self::Develop => {
                let directory = record.from.parent().unwrap_or(&record.from);
                marker::write_pointer(destination, record, directory)?;
            }
        }
        Ok(())
    }

    /// Delete the artifact at `artifact`. Its marker is left alone.
    pub fn revert(self, artifact: &Path) -> Result<()> {
        io::remove_entry(artifact)?;
        Ok(())
    }

    /// Whether an entry of `kind` is an artifact this mode would create.
    pub fn matches(self, kind: EntryKind) -> bool {
        match self {
            Self::Symlink => kind == EntryKind::Symlink,
            Self::Copy => matches!(kind, EntryKind::Directory | EntryKind::File),
            Self::Develop => kind == EntryKind::File,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "symlink" | "link" => Ok(Self::Symlink),
            "copy" => Ok(Self::Copy),
            "develop" => Ok(Self::Develop),
            other => Err(Error::invalid_input(format!("Mode not recognized: {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names_and_link_alias() {
        assert_eq!("symlink".parse::<Mode>().unwrap(), Mode::Symlink);
        assert_eq!("link".parse::<Mode>().unwrap(), Mode::Symlink);
        assert_eq!("copy".parse::<Mode>().unwrap(), Mode::Copy);
        assert_eq!("develop".parse::<Mode>().unwrap(), Mode::Develop);
        assert!("move".parse::<Mode>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Copy).unwrap(), "\"copy\"");
        let mode: Mode = serde_json::from_str("\"develop\"").unwrap();
        assert_eq!(mode, Mode::Develop);
    }

    #[test]
    fn kind_matching_per_mode() {
        assert!(Mode::Symlink.matches(EntryKind::Symlink));
        assert!(!Mode::Symlink.matches(EntryKind::Directory));
        assert!(Mode::Copy.matches(EntryKind::Directory));
        assert!(Mode::Copy.matches(EntryKind::File));
        assert!(!Mode::Copy.matches(EntryKind::Symlink));
        assert!(Mode::Develop.matches(EntryKind::File));
        assert!(!Mode::Develop.matches(EntryKind::Directory));
    }

    #[test]
    fn destination_uses_name_or_pointer() {
        let candidate = Path::new("/site");
        let ident = Identifier::parse("my_file").unwrap();
        assert_eq!(
            Mode::Copy.destination(candidate, &ident, "my_file.py"),
            PathBuf::from("/site/my_file.py")
        );
        assert_eq!(
            Mode::Develop.destination(candidate, &ident, "my_file.py"),
            PathBuf::from("/site/my_file.sitepath.pth")
        );
    }
}
