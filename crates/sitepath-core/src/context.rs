//! Runtime inputs shared by the engines

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::{Candidate, SiteConfig, resolve_candidates};

/// Everything an engine call needs from its environment.
///
/// Built once per invocation and passed by reference; nothing is read from
/// process-wide state after construction.
#[derive(Debug, Clone)]
pub struct SiteContext {
    candidates: Vec<Candidate>,
    cwd: PathBuf,
    now: DateTime<Utc>,
}

impl SiteContext {
    /// Resolve the candidates of `config`, stamping markers with the
    /// current time.
    pub fn new(config: &SiteConfig, cwd: impl Into<PathBuf>) -> Self {
        Self::from_candidates(resolve_candidates(config), cwd)
    }

    pub fn from_candidates(candidates: Vec<Candidate>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            candidates,
            cwd: cwd.into(),
            now: Utc::now(),
        }
    }

    /// Fix the timestamp written into markers.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Resolve user input against the working directory.
    pub fn absolutize(&self, raw: impl AsRef<Path>) -> PathBuf {
        sitepath_fs::absolutize(&self.cwd, raw)
    }
}
