//! Marker store
//!
//! A marker is the JSON sidecar `<destination>.sitepath` placed next to a
//! symlink or copy. Its presence is the only proof that sitepath owns the
//! destination. Develop placements use a pointer sidecar
//! `<ident>.sitepath.pth` instead: one `# sitepath:` comment line carrying
//! the record inline, then the directory to add to the import path.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sitepath_fs::{Error as FsError, io};

use crate::identifier::Identifier;
use crate::mode::Mode;
use crate::Result;

/// Suffix appended to a destination to name its marker
pub const MARKER_SUFFIX: &str = ".sitepath";

/// Suffix of develop pointer sidecars
pub const POINTER_SUFFIX: &str = ".sitepath.pth";

/// Token opening the record line of a pointer sidecar
pub const POINTER_TOKEN: &str = "# sitepath:";

const EXTENSION_PREFIX: &str = "#:";

/// The metadata recorded for one placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// When the placement was created or last refreshed
    pub when: DateTime<Utc>,
    /// Absolute origin path
    pub from: PathBuf,
    /// Placement mode
    pub how: Mode,
    /// Destination entry name
    pub base: String,
}

/// A marker as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Marker(Marker),
    /// Content that does not parse as a marker, kept verbatim
    Unrecognized { contents: String },
}

impl Record {
    /// Parse sidecar text, keeping malformed content instead of failing.
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str(text.trim()) {
            Ok(marker) => Self::Marker(marker),
            Err(e) => {
                tracing::warn!(error = %e, "Malformed sitepath marker");
                Self::Unrecognized {
                    contents: text.to_string(),
                }
            }
        }
    }

    pub fn marker(&self) -> Option<&Marker> {
        match self {
            Self::Marker(m) => Some(m),
            Self::Unrecognized { .. } => None,
        }
    }

    pub fn origin(&self) -> Option<&Path> {
        self.marker().map(|m| m.from.as_path())
    }
}

/// Path of the marker sidecar for `destination`.
pub fn sidecar_path(destination: &Path) -> PathBuf {
    let mut name: OsString = destination.as_os_str().to_os_string();
    name.push(MARKER_SUFFIX);
    PathBuf::from(name)
}

/// Whether a marker exists for `destination`.
pub fn exists(destination: &Path) -> bool {
    sidecar_path(destination).is_file()
}

/// Write (or overwrite) the marker for `destination`.
pub fn write(destination: &Path, marker: &Marker) -> Result<()> {
    let content = serde_json::to_string(marker)?;
    io::write_atomic(&sidecar_path(destination), content.as_bytes())?;
    Ok(())
}

/// Read the marker for `destination`. `None` when there is no sidecar.
pub fn read(destination: &Path) -> Result<Option<Record>> {
    let path = sidecar_path(destination);
    match fs::read_to_string(&path) {
        Ok(text) => Ok(Some(Record::parse(&text))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FsError::io(path, e).into()),
    }
}

/// Delete the marker for `destination`. A missing marker is an error.
pub fn delete(destination: &Path) -> Result<()> {
    let path = sidecar_path(destination);
    fs::remove_file(&path).map_err(|e| FsError::io(path, e))?;
    Ok(())
}

/// Path of the develop pointer for `ident` inside `candidate`.
pub fn pointer_path(candidate: &Path, ident: &Identifier) -> PathBuf {
    candidate.join(format!("{ident}{POINTER_SUFFIX}"))
}

/// Whether `path` names a develop pointer.
pub fn is_pointer_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(POINTER_SUFFIX) && n.len() > POINTER_SUFFIX.len())
}

/// A parsed develop pointer sidecar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer {
    pub record: Marker,
    /// Search path lines, in file order
    pub pth: Vec<String>,
    /// `#:key=value` lines
    pub extensions: BTreeMap<String, String>,
}

impl Pointer {
    /// More or fewer than one path line means the file was edited by hand.
    pub fn is_tampered(&self) -> bool {
        self.pth.len() != 1
    }

    /// The registered directory of an untampered pointer.
    pub fn directory(&self) -> Option<&str> {
        match self.pth.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Parse pointer text. `None` when the record line is missing or
    /// malformed.
    pub fn parse(text: &str) -> Option<Self> {
        let mut record = None;
        let mut malformed = false;
        let mut pth = Vec::new();
        let mut extensions = BTreeMap::new();

        for line in text.lines() {
            if let Some(ext) = line.strip_prefix(EXTENSION_PREFIX) {
                if let Some((key, value)) = ext.split_once('=') {
                    extensions.insert(key.to_string(), value.to_string());
                }
                continue;
            }
            if let Some(json) = line.strip_prefix(POINTER_TOKEN) {
                match serde_json::from_str::<Marker>(json.trim()) {
                    Ok(m) => record = Some(m),
                    Err(_) => malformed = true,
                }
                continue;
            }
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            pth.push(line.trim().to_string());
        }

        match record {
            Some(record) if !malformed => Some(Self {
                record,
                pth,
                extensions,
            }),
            _ => None,
        }
    }
}

/// Write a develop pointer registering `directory`, overwriting any prior
/// content.
pub fn write_pointer(path: &Path, marker: &Marker, directory: &Path) -> Result<()> {
    let json = serde_json::to_string(marker)?;
    let content = format!("{POINTER_TOKEN} {json}\n{}\n", directory.display());
    io::write_atomic(path, content.as_bytes())?;
    Ok(())
}

/// Read a develop pointer. `None` when absent or malformed.
pub fn read_pointer(path: &Path) -> Result<Option<Pointer>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(FsError::io(path, e).into()),
    };
    let pointer = Pointer::parse(&text);
    if pointer.is_none() {
        tracing::warn!(path = %path.display(), "Malformed sitepath pointer");
    }
    Ok(pointer)
}
