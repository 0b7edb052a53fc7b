//! Placement engines for sitepath
//!
//! Puts a directory or module file into the first workable candidate
//! directory of an interpreter's search path, and takes it out again.
//!
//! - **Modes**: [`Mode::Symlink`], [`Mode::Copy`] and [`Mode::Develop`]
//!   (a `<name>.sitepath.pth` pointer that registers the origin's parent)
//! - **Markers**: a JSON `.sitepath` sidecar recording when, from where and
//!   how each placement was made
//! - **Reversal** guarded by the recorded origin and the artifact's kind
//! - **Status and diff** for finding copies that drifted from their origin
//! - **Batches** that attempt every item and report the worst severity
//!
//! # Architecture
//!
//! ```text
//!                 sitepath-cli
//!                      |
//!                sitepath-core
//!   config -> context -> placement / reversal / status / inspect
//!                      |            \
//!                    batch         marker
//!                      |
//!                 sitepath-fs
//! ```

pub mod batch;
pub mod config;
pub mod context;
pub mod error;
pub mod identifier;
pub mod inspect;
pub mod marker;
pub mod mode;
pub mod placement;
pub mod reversal;
pub mod status;

pub use batch::{BatchReport, ItemDiagnostic, place_all, read_target_file, remove_all, run_batch};
pub use config::{Candidate, ConfigLoader, SiteConfig, SiteManifest, resolve_candidates};
pub use context::SiteContext;
pub use error::{Attempt, Error, Result, Severity};
pub use identifier::{Identifier, Target};
pub use inspect::{Annotation, Finding, Inspection, inspect};
pub use marker::{Marker, Pointer, Record};
pub use mode::Mode;
pub use placement::{Origin, Placed, place};
pub use reversal::{Removed, remove, remove_raw};
pub use status::{Drift, PlacedEntry, PointerEntry, Status, diff, diff_path};
