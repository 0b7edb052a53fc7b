//! Error types for sitepath-core
//!
//! Every error is either recoverable ([`Severity::Error`]: bad input or a
//! conflicting state, raised before anything is mutated) or terminal
//! ([`Severity::Failure`]: every candidate was tried, or the target could
//! not be located).

use std::fmt;
use std::path::PathBuf;

use sitepath_fs::EntryKind;

use crate::batch::BatchReport;
use crate::mode::Mode;

/// Result type for sitepath-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// How bad an error is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Retryable after fixing the input
    Error,
    /// Nothing left to try
    Failure,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// One candidate location that was tried, and why it did not work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub path: PathBuf,
    pub reason: String,
}

impl Attempt {
    pub fn new(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Errors that can occur in sitepath-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The origin of a placement does not exist
    #[error("path not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// The derived name cannot be imported
    #[error("not a valid identifier: {name:?}")]
    InvalidIdentifier { name: String },

    /// Something not created by sitepath already sits at the destination
    #[error("Existing entry not created by sitepath: {}", .path.display())]
    ForeignConflict { path: PathBuf },

    /// The destination was placed with a different mode
    #[error(
        "Target was {}, not {}: {}. Run `{}` first",
        .recorded.past(), .requested.past(), .path.display(), .recorded.undo_verb()
    )]
    ModeConflict {
        path: PathBuf,
        recorded: Mode,
        requested: Mode,
    },

    /// A marker sidecar exists but cannot be interpreted
    #[error("Unrecognized sitepath marker: {}", .path.display())]
    UnrecognizedMarker { path: PathBuf },

    /// Bad command input
    #[error("{message}")]
    InvalidInput { message: String },

    /// Configuration file could not be used
    #[error("Invalid configuration at {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// No candidate accepted the placement
    #[error("Unable to {} anywhere.{}", .mode, tried(.attempts))]
    Exhausted { mode: Mode, attempts: Vec<Attempt> },

    /// No candidate holds a placement with this name
    #[error("Package not found: {name:?}. Tried:{}", tried(.attempts))]
    NotFound { name: String, attempts: Vec<Attempt> },

    /// The marker records a different origin than the caller asked for
    #[error(
        "{} path mismatch. need {}, found {}",
        .mode.undo_verb(), .expected.display(), .recorded.display()
    )]
    OriginMismatch {
        mode: Mode,
        expected: PathBuf,
        recorded: PathBuf,
    },

    /// The artifact is not what the requested reversal removes
    #[error("Path is not a {} placement: {} ({actual})", .mode, .path.display())]
    KindMismatch {
        mode: Mode,
        path: PathBuf,
        actual: EntryKind,
    },

    /// A marker exists but its artifact is gone
    #[error("placement for marker missing: {}", .path.display())]
    ArtifactMissing { path: PathBuf },

    /// At least one batch item failed terminally
    #[error("{0}")]
    BatchFailure(BatchReport),

    /// At least one batch item errored, none failed
    #[error("{0}")]
    BatchError(BatchReport),

    // Transparent wrappers for underlying errors
    /// Filesystem error from sitepath-fs
    #[error(transparent)]
    Fs(#[from] sitepath_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Classify this error as recoverable or terminal.
    pub fn severity(&self) -> Severity {
        match self {
            Self::SourceNotFound { .. }
            | Self::InvalidIdentifier { .. }
            | Self::ForeignConflict { .. }
            | Self::ModeConflict { .. }
            | Self::UnrecognizedMarker { .. }
            | Self::InvalidInput { .. }
            | Self::Config { .. }
            | Self::BatchError(_) => Severity::Error,
            Self::Exhausted { .. }
            | Self::NotFound { .. }
            | Self::OriginMismatch { .. }
            | Self::KindMismatch { .. }
            | Self::ArtifactMissing { .. }
            | Self::BatchFailure(_)
            | Self::Fs(_)
            | Self::Io(_)
            | Self::Json(_) => Severity::Failure,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.severity() == Severity::Error
    }
}

fn tried(attempts: &[Attempt]) -> String {
    attempts
        .iter()
        .map(|a| format!("\n    {a}"))
        .collect()
}
