//! Importable names and reversal targets

use std::fmt;
use std::path::{Path, PathBuf};

use sitepath_fs::{absolutize, file_name_str};

use crate::{Error, Result};

const PY_SUFFIX: &str = ".py";

/// A name the host's import system can load.
///
/// Letters, digits and underscores, not starting with a digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(name: &str) -> Result<Self> {
        if Self::is_valid(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(Error::InvalidIdentifier {
                name: name.to_string(),
            })
        }
    }

    /// Derive the identifier from a path's final component, dropping one
    /// trailing `.py`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = file_name_str(path).ok_or_else(|| Error::InvalidIdentifier {
            name: path.display().to_string(),
        })?;
        Self::parse(name.strip_suffix(PY_SUFFIX).unwrap_or(name))
    }

    pub fn is_valid(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first == '_' || first.is_alphabetic() => {
                chars.all(|c| c == '_' || c.is_alphanumeric())
            }
            _ => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The file-module form of this name, `<name>.py`.
    pub fn module_file(&self) -> String {
        format!("{}{}", self.0, PY_SUFFIX)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// What a reversal or inspection is aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A bare identifier; any origin matches
    Name(Identifier),
    /// A path; the marker must record exactly this origin
    Path { ident: Identifier, origin: PathBuf },
}

impl Target {
    /// Interpret raw user input.
    ///
    /// Input that is already an identifier is a bare name. Anything else is
    /// a path resolved against `cwd`. With `name_only` the path still
    /// yields the identifier but its origin is not checked.
    pub fn parse(raw: &str, cwd: &Path, name_only: bool) -> Result<Self> {
        if Identifier::is_valid(raw) {
            return Ok(Self::Name(Identifier(raw.to_string())));
        }
        let origin = absolutize(cwd, raw);
        let ident = Identifier::from_path(&origin)?;
        if name_only {
            Ok(Self::Name(ident))
        } else {
            Ok(Self::Path { ident, origin })
        }
    }

    pub fn ident(&self) -> &Identifier {
        match self {
            Self::Name(ident) | Self::Path { ident, .. } => ident,
        }
    }

    /// The origin a marker must record, if the caller gave a path.
    pub fn expected_origin(&self) -> Option<&Path> {
        match self {
            Self::Name(_) => None,
            Self::Path { origin, .. } => Some(origin),
        }
    }
}
