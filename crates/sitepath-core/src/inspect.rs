//! Inspection of a single placement by name or path

use std::path::{Path, PathBuf};

use crate::context::SiteContext;
use crate::identifier::{Identifier, Target};
use crate::marker::{self, Pointer, Record};
use crate::mode::Mode;
use crate::{Attempt, Error, Result};

/// Something worth flagging about a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// The origin of a copy or pointer no longer exists
    Missing,
    /// The target of a symlink no longer exists
    Broken,
    /// The caller's path differs from the recorded origin
    Mismatched { expected: PathBuf },
    /// The pointer does not carry exactly one path line
    Tampered,
}

impl std::fmt::Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "(missing)"),
            Self::Broken => write!(f, "(broken)"),
            Self::Mismatched { expected } => write!(f, "(mismatched to {})", expected.display()),
            Self::Tampered => write!(f, "(tampered)"),
        }
    }
}

/// One sidecar found for the inspected name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub sidecar: PathBuf,
    pub record: Record,
    /// Path lines, for pointer sidecars
    pub pth: Option<Vec<String>>,
    pub annotations: Vec<Annotation>,
}

/// All sidecars for one name in the first candidate that has any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub name: Identifier,
    pub candidate: PathBuf,
    pub findings: Vec<Finding>,
}

/// Look up the marker and pointer sidecars for `target`.
///
/// A name can be both developed and copied or symlinked; every record in
/// the first matching candidate is returned.
pub fn inspect(ctx: &SiteContext, target: &Target) -> Result<Inspection> {
    let ident = target.ident();
    let expected = target.expected_origin();
    let mut attempts = Vec::new();

    for candidate in ctx.candidates() {
        let mut findings = Vec::new();

        let as_dir = candidate.path.join(ident.as_str());
        let as_file = candidate.path.join(ident.module_file());
        for artifact in [&as_dir, &as_file] {
            let sidecar = marker::sidecar_path(artifact);
            match marker::read(artifact)? {
                Some(record) => {
                    let recorded = record.marker().map(|m| (m.how, m.from.as_path()));
                    let annotations = annotate(recorded, expected);
                    findings.push(Finding {
                        sidecar,
                        record,
                        pth: None,
                        annotations,
                    });
                    break;
                }
                None => attempts.push(Attempt::new(sidecar, "no marker")),
            }
        }

        let pointer_path = marker::pointer_path(&candidate.path, ident);
        if pointer_path.is_file() {
            findings.push(pointer_finding(&pointer_path, expected)?);
        } else {
            attempts.push(Attempt::new(&pointer_path, "no pointer"));
        }

        if !findings.is_empty() {
            return Ok(Inspection {
                name: ident.clone(),
                candidate: candidate.path.clone(),
                findings,
            });
        }
    }

    Err(Error::NotFound {
        name: ident.to_string(),
        attempts,
    })
}

fn pointer_finding(path: &Path, expected: Option<&Path>) -> Result<Finding> {
    match marker::read_pointer(path)? {
        Some(Pointer { record, pth, .. }) => {
            let mut annotations = annotate(Some((record.how, record.from.as_path())), expected);
            if pth.len() != 1 {
                annotations.push(Annotation::Tampered);
            }
            Ok(Finding {
                sidecar: path.to_path_buf(),
                record: Record::Marker(record),
                pth: Some(pth),
                annotations,
            })
        }
        None => Ok(Finding {
            sidecar: path.to_path_buf(),
            record: Record::Unrecognized {
                contents: sitepath_fs::io::read_text(path)?,
            },
            pth: None,
            annotations: vec![Annotation::Tampered],
        }),
    }
}

fn annotate(recorded: Option<(Mode, &Path)>, expected: Option<&Path>) -> Vec<Annotation> {
    let Some((how, from)) = recorded else {
        return Vec::new();
    };
    let mut annotations = Vec::new();
    if !from.exists() {
        annotations.push(if how == Mode::Symlink {
            Annotation::Broken
        } else {
            Annotation::Missing
        });
    }
    if let Some(expected) = expected
        && expected != from
    {
        annotations.push(Annotation::Mismatched {
            expected: expected.to_path_buf(),
        });
    }
    annotations
}
