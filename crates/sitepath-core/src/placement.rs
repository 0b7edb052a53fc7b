//! Placement engine
//!
//! Places an origin at the first workable candidate. For symlinks and
//! copies every candidate is classified before anything is touched:
//!
//! | state at destination         | decision                       |
//! |------------------------------|--------------------------------|
//! | entry without marker         | abort: foreign conflict        |
//! | marker of another mode       | abort: mode conflict           |
//! | marker that cannot be read   | abort: unrecognized marker     |
//! | marker of the same mode      | refresh: remove, then recreate |
//! | nothing                      | create                         |
//!
//! Conflicts abort the whole call. Filesystem errors while acting are
//! recorded and the next candidate is tried.

use std::path::{Path, PathBuf};

use sitepath_fs::{EntryKind, file_name_str, io};
use tracing::{debug, info, warn};

use crate::context::SiteContext;
use crate::identifier::Identifier;
use crate::marker::{self, Marker, Record};
use crate::mode::Mode;
use crate::{Attempt, Error, Result};

/// A validated placement origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Absolute path
    pub path: PathBuf,
    /// Final component, the destination entry name
    pub name: String,
    pub ident: Identifier,
}

impl Origin {
    /// Absolutise `raw` and check that it is placeable.
    pub fn resolve(ctx: &SiteContext, raw: impl AsRef<Path>) -> Result<Self> {
        let path = ctx.absolutize(raw);
        let ident = Identifier::from_path(&path)?;
        let name = file_name_str(&path)
            .ok_or_else(|| Error::InvalidIdentifier {
                name: path.display().to_string(),
            })?
            .to_string();
        if !path.exists() {
            return Err(Error::SourceNotFound { path });
        }
        Ok(Self { path, name, ident })
    }
}

/// A completed placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placed {
    pub mode: Mode,
    pub origin: PathBuf,
    /// The symlink, copy, or pointer sidecar
    pub destination: PathBuf,
    /// Whether an earlier placement of the same mode was replaced
    pub refreshed: bool,
}

/// Outcome of classifying one candidate destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Vacant,
    Refresh,
    ForeignConflict,
    ModeConflict(Mode),
    UnrecognizedMarker,
}

/// Decide what to do at a destination holding `kind` and `record`.
pub fn decide(kind: EntryKind, record: Option<&Record>, mode: Mode) -> Decision {
    match record {
        None if kind.is_present() => Decision::ForeignConflict,
        None => Decision::Vacant,
        Some(Record::Unrecognized { .. }) => Decision::UnrecognizedMarker,
        Some(Record::Marker(m)) if m.how == mode => Decision::Refresh,
        Some(Record::Marker(m)) => Decision::ModeConflict(m.how),
    }
}

/// Classify `destination` for a placement in `mode`. Reads only.
pub fn classify(destination: &Path, mode: Mode) -> Result<Decision> {
    let kind = EntryKind::of(destination)?;
    let record = marker::read(destination)?;
    Ok(decide(kind, record.as_ref(), mode))
}

/// Place `raw` in the first candidate that accepts it.
pub fn place(ctx: &SiteContext, mode: Mode, raw: impl AsRef<Path>) -> Result<Placed> {
    let origin = Origin::resolve(ctx, raw)?;
    let record = Marker {
        when: ctx.now(),
        from: origin.path.clone(),
        how: mode,
        base: match mode {
            Mode::Develop => origin.ident.to_string(),
            Mode::Symlink | Mode::Copy => origin.name.clone(),
        },
    };

    match mode {
        Mode::Develop => place_pointer(ctx, &origin, &record),
        Mode::Symlink | Mode::Copy => place_artifact(ctx, mode, &origin, &record),
    }
}

fn place_pointer(ctx: &SiteContext, origin: &Origin, record: &Marker) -> Result<Placed> {
    let mut attempts = Vec::new();
    for candidate in ctx.candidates() {
        let pointer = Mode::Develop.destination(&candidate.path, &origin.ident, &origin.name);
        match Mode::Develop.apply(record, &pointer) {
            Ok(()) => {
                info!(pointer = %pointer.display(), origin = %origin.path.display(), "Developed");
                return Ok(Placed {
                    mode: Mode::Develop,
                    origin: origin.path.clone(),
                    destination: pointer,
                    refreshed: false,
                });
            }
            Err(e) => {
                debug!(pointer = %pointer.display(), error = %e, "Candidate rejected pointer");
                attempts.push(Attempt::new(pointer, e));
            }
        }
    }
    Err(Error::Exhausted {
        mode: Mode::Develop,
        attempts,
    })
}

fn place_artifact(
    ctx: &SiteContext,
    mode: Mode,
    origin: &Origin,
    record: &Marker,
) -> Result<Placed> {
    let mut attempts = Vec::new();
    for candidate in ctx.candidates() {
        let destination = mode.destination(&candidate.path, &origin.ident, &origin.name);

        let decision = match classify(&destination, mode) {
            Ok(decision) => decision,
            Err(e) => {
                debug!(
                    destination = %destination.display(),
                    error = %e,
                    "Cannot inspect candidate"
                );
                attempts.push(Attempt::new(&destination, e));
                continue;
            }
        };
        debug!(destination = %destination.display(), ?decision, "Classified candidate");

        let refresh = match decision {
            Decision::ForeignConflict => {
                return Err(Error::ForeignConflict { path: destination });
            }
            Decision::ModeConflict(recorded) => {
                return Err(Error::ModeConflict {
                    path: destination,
                    recorded,
                    requested: mode,
                });
            }
            Decision::UnrecognizedMarker => {
                return Err(Error::UnrecognizedMarker {
                    path: marker::sidecar_path(&destination),
                });
            }
            Decision::Refresh => true,
            Decision::Vacant => false,
        };

        match materialize(mode, record, &destination, refresh) {
            Ok(()) => {
                info!(
                    mode = %mode,
                    destination = %destination.display(),
                    origin = %origin.path.display(),
                    refresh,
                    "Placed"
                );
                return Ok(Placed {
                    mode,
                    origin: origin.path.clone(),
                    destination,
                    refreshed: refresh,
                });
            }
            Err(e) => {
                debug!(
                    destination = %destination.display(),
                    error = %e,
                    "Candidate rejected placement"
                );
                attempts.push(Attempt::new(&destination, e));
            }
        }
    }
    Err(Error::Exhausted { mode, attempts })
}

// Create the artifact, then its marker. On failure nothing unmarked is
// left behind: a half-made artifact is removed, and a refreshed
// placement whose artifact is already gone loses its marker too.
fn materialize(mode: Mode, record: &Marker, destination: &Path, refresh: bool) -> Result<()> {
    if refresh {
        io::remove_entry(destination)?;
    }

    let created = mode
        .apply(record, destination)
        .and_then(|()| marker::write(destination, record));

    if let Err(e) = created {
        if let Err(cleanup) = io::remove_entry(destination) {
            warn!(
                destination = %destination.display(),
                error = %cleanup,
                "Failed to clean up partial placement"
            );
        }
        if refresh
            && marker::exists(destination)
            && let Err(cleanup) = marker::delete(destination)
        {
            warn!(
                destination = %destination.display(),
                error = %cleanup,
                "Failed to remove stale marker"
            );
        }
        return Err(e);
    }
    Ok(())
}
