//! Status and drift detection
//!
//! Read-only view of every placement across the candidates, partitioned
//! into symlinked, copied, and developed sets, plus per-copy drift against
//! the recorded origin.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use sitepath_fs::{EntryKind, TreeDiff, compare_entries, file_name_str};
use tracing::warn;

use crate::config::Candidate;
use crate::marker::{self, MARKER_SUFFIX, POINTER_SUFFIX, Pointer, Record};
use crate::{Attempt, Error, Result};

/// A marked symlink or copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedEntry {
    pub path: PathBuf,
    pub record: Record,
}

impl PlacedEntry {
    pub fn origin(&self) -> Option<&Path> {
        self.record.origin()
    }
}

/// A develop pointer sidecar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEntry {
    pub path: PathBuf,
    pub name: String,
    /// `None` when the sidecar is malformed
    pub pointer: Option<Pointer>,
}

impl PointerEntry {
    /// Malformed, or carrying other than one path line.
    pub fn is_tampered(&self) -> bool {
        self.pointer.as_ref().is_none_or(Pointer::is_tampered)
    }
}

/// Everything sitepath placed in a set of candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    /// Candidate directories that exist and were scanned
    pub scanned: Vec<PathBuf>,
    /// Every `.pth` file, sitepath's or not
    pub pth_files: Vec<PathBuf>,
    pub symlinked: Vec<PlacedEntry>,
    pub copied: Vec<PlacedEntry>,
    pub developed: Vec<PointerEntry>,
    /// Marker sidecars whose artifact is gone
    pub orphaned: Vec<PathBuf>,
    /// Identifiers of all placements
    pub names: BTreeSet<String>,
}

impl Status {
    /// Scan `candidates`. Missing or unreadable directories are skipped.
    pub fn scan(candidates: &[Candidate]) -> Result<Self> {
        let mut status = Self::default();
        for candidate in candidates {
            let dir = &candidate.path;
            if !dir.is_dir() {
                continue;
            }
            let mut entries: Vec<PathBuf> = match fs::read_dir(dir) {
                Ok(rd) => rd.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Cannot scan candidate");
                    continue;
                }
            };
            entries.sort();
            status.scanned.push(dir.clone());
            for path in entries {
                status.classify(path)?;
            }
        }
        Ok(status)
    }

    fn classify(&mut self, path: PathBuf) -> Result<()> {
        let Some(name) = file_name_str(&path).map(str::to_string) else {
            return Ok(());
        };

        if let Some(ident) = name.strip_suffix(POINTER_SUFFIX)
            && marker::is_pointer_path(&path)
        {
            self.names.insert(ident.to_string());
            self.pth_files.push(path.clone());
            self.developed.push(PointerEntry {
                name: ident.to_string(),
                pointer: marker::read_pointer(&path)?,
                path,
            });
            return Ok(());
        }
        if name.ends_with(".pth") {
            self.pth_files.push(path);
            return Ok(());
        }
        if let Some(artifact_name) = name.strip_suffix(MARKER_SUFFIX) {
            let artifact = path.with_file_name(artifact_name);
            if !EntryKind::of(&artifact)?.is_present() {
                self.orphaned.push(path);
            }
            return Ok(());
        }

        let Some(record) = marker::read(&path)? else {
            return Ok(());
        };
        self.names
            .insert(name.strip_suffix(".py").unwrap_or(&name).to_string());
        let entry = PlacedEntry { path, record };
        if EntryKind::of(&entry.path)? == EntryKind::Symlink {
            self.symlinked.push(entry);
        } else {
            self.copied.push(entry);
        }
        Ok(())
    }

    /// Drift of every copied entry, in scan order.
    pub fn drift(&self) -> Result<Vec<(&PlacedEntry, Drift)>> {
        self.copied
            .iter()
            .map(|entry| diff(entry).map(|d| (entry, d)))
            .collect()
    }
}

/// How a copy compares with its recorded origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drift {
    Unchanged,
    Changed(TreeDiff),
    /// The recorded origin no longer exists
    Missing { origin: PathBuf },
}

impl Drift {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// Compare a copied entry with its origin.
pub fn diff(entry: &PlacedEntry) -> Result<Drift> {
    diff_path(&entry.path)
}

/// Compare the copy at `copy` with the origin its marker records.
pub fn diff_path(copy: &Path) -> Result<Drift> {
    let sidecar = marker::sidecar_path(copy);
    let record = marker::read(copy)?.ok_or_else(|| Error::NotFound {
        name: copy.display().to_string(),
        attempts: vec![Attempt::new(&sidecar, "no marker")],
    })?;
    let Some(found) = record.marker() else {
        return Err(Error::UnrecognizedMarker { path: sidecar });
    };

    if !found.from.exists() {
        return Ok(Drift::Missing {
            origin: found.from.clone(),
        });
    }
    if !EntryKind::of(copy)?.is_present() {
        return Err(Error::ArtifactMissing {
            path: copy.to_path_buf(),
        });
    }

    let tree = compare_entries(copy, &found.from)?;
    Ok(if tree.is_empty() {
        Drift::Unchanged
    } else {
        Drift::Changed(tree)
    })
}
