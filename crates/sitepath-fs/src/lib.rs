//! Filesystem primitives for sitepath
//!
//! Provides path absolutisation, entry classification, atomic sidecar
//! writes, recursive copy/remove, symlink creation and tree comparison.

pub mod compare;
pub mod entry;
pub mod error;
pub mod io;
pub mod path;

pub use compare::{TreeDiff, compare_entries, files_identical};
pub use entry::EntryKind;
pub use error::{Error, Result};
pub use path::{absolutize, file_name_str, normalize_lexically};
