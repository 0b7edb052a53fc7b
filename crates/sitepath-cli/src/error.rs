//! Error types for sitepath-cli

use sitepath_core::Severity;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] sitepath_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Core(e) => e.severity(),
            Self::User { .. } => Severity::Error,
            Self::Io(_) => Severity::Failure,
        }
    }

    /// Process exit code: 1 for errors, 2 for failures.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            Severity::Error => 1,
            Severity::Failure => 2,
        }
    }
}
