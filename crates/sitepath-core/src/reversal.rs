//! Reversal engine
//!
//! Finds the first candidate holding a marker for the target's identifier
//! and undoes that placement: artifact first, marker second. Before any
//! deletion the recorded origin is checked against a path target, and the
//! artifact's kind against the requested mode. Either mismatch stops the
//! call with nothing removed.

use std::path::{Path, PathBuf};

use sitepath_fs::EntryKind;
use tracing::{debug, info, warn};

use crate::context::SiteContext;
use crate::identifier::Target;
use crate::marker::{self, POINTER_SUFFIX, Record};
use crate::mode::Mode;
use crate::{Attempt, Error, Result};

/// A completed reversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub mode: Mode,
    /// The deleted symlink, copy, or pointer sidecar
    pub artifact: PathBuf,
    /// The record that proved ownership, if it could be read
    pub record: Option<Record>,
}

/// Undo the `mode` placement of `target`.
pub fn remove(ctx: &SiteContext, mode: Mode, target: &Target) -> Result<Removed> {
    match mode {
        Mode::Develop => remove_pointer(ctx, target),
        Mode::Symlink | Mode::Copy => remove_artifact(ctx, mode, target),
    }
}

/// Parse `raw` as a [`Target`] and undo its `mode` placement.
pub fn remove_raw(ctx: &SiteContext, mode: Mode, raw: &str, name_only: bool) -> Result<Removed> {
    let target = Target::parse(raw, ctx.cwd(), name_only)?;
    remove(ctx, mode, &target)
}

fn check_origin(mode: Mode, target: &Target, recorded: &Path) -> Result<()> {
    match target.expected_origin() {
        Some(expected) if expected != recorded => Err(Error::OriginMismatch {
            mode,
            expected: expected.to_path_buf(),
            recorded: recorded.to_path_buf(),
        }),
        _ => Ok(()),
    }
}

fn remove_artifact(ctx: &SiteContext, mode: Mode, target: &Target) -> Result<Removed> {
    let ident = target.ident();
    let mut attempts = Vec::new();

    for candidate in ctx.candidates() {
        // Directory placements are named after the identifier; file
        // placements keep their `.py`.
        let as_dir = candidate.path.join(ident.as_str());
        let as_file = candidate.path.join(ident.module_file());
        let artifact = if marker::exists(&as_dir) {
            as_dir
        } else if marker::exists(&as_file) {
            as_file
        } else {
            attempts.push(Attempt::new(marker::sidecar_path(&as_dir), "no marker"));
            attempts.push(Attempt::new(marker::sidecar_path(&as_file), "no marker"));
            continue;
        };

        let record = marker::read(&artifact)?.ok_or_else(|| Error::ArtifactMissing {
            path: marker::sidecar_path(&artifact),
        })?;
        let Record::Marker(found) = &record else {
            return Err(Error::UnrecognizedMarker {
                path: marker::sidecar_path(&artifact),
            });
        };
        check_origin(mode, target, &found.from)?;

        let kind = EntryKind::of(&artifact)?;
        if kind == EntryKind::Absent {
            warn!(artifact = %artifact.display(), "Placement already gone, removing stale marker");
        } else if !mode.matches(kind) {
            return Err(Error::KindMismatch {
                mode,
                path: artifact,
                actual: kind,
            });
        } else {
            mode.revert(&artifact)?;
        }
        marker::delete(&artifact)?;

        info!(mode = %mode.undo_verb(), artifact = %artifact.display(), "Removed");
        return Ok(Removed {
            mode,
            artifact,
            record: Some(record),
        });
    }

    Err(Error::NotFound {
        name: ident.to_string(),
        attempts,
    })
}

fn remove_pointer(ctx: &SiteContext, target: &Target) -> Result<Removed> {
    let ident = target.ident();
    let mut attempts = Vec::new();

    for candidate in ctx.candidates() {
        let pointer = marker::pointer_path(&candidate.path, ident);
        let kind = EntryKind::of(&pointer)?;
        if !kind.is_present() {
            debug!(pointer = %pointer.display(), "No pointer");
            attempts.push(Attempt::new(&pointer, "not found"));
            continue;
        }
        if !Mode::Develop.matches(kind) {
            return Err(Error::KindMismatch {
                mode: Mode::Develop,
                path: pointer,
                actual: kind,
            });
        }

        let parsed = marker::read_pointer(&pointer)?;
        match (&parsed, target.expected_origin()) {
            (Some(p), _) => check_origin(Mode::Develop, target, &p.record.from)?,
            (None, Some(_)) => {
                return Err(Error::UnrecognizedMarker { path: pointer });
            }
            (None, None) => {}
        }

        Mode::Develop.revert(&pointer)?;
        info!(pointer = %pointer.display(), "Undeveloped");
        return Ok(Removed {
            mode: Mode::Develop,
            artifact: pointer,
            record: parsed.map(|p| Record::Marker(p.record)),
        });
    }

    Err(Error::NotFound {
        name: format!("{ident}{POINTER_SUFFIX}"),
        attempts,
    })
}
