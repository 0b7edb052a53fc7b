//! Path absolutisation for placement origins
//!
//! Origins are recorded in markers and compared verbatim during reversal,
//! so every path taken from user input goes through [`absolutize`] first.
//! Normalisation is purely lexical: symlinks are never resolved, otherwise
//! a symlinked placement would record the link target instead of the path
//! the user typed.

use std::path::{Component, Path, PathBuf};

/// Make `raw` absolute relative to `cwd`.
///
/// A leading `~` component expands to the home directory when one is
/// known. `.` and `..` components are folded lexically.
pub fn absolutize(cwd: &Path, raw: impl AsRef<Path>) -> PathBuf {
    let expanded = expand_home(raw.as_ref());
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };
    normalize_lexically(&joined)
}

/// Fold `.` and `..` components without touching the filesystem.
///
/// `..` never climbs above the root or a path prefix.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

/// The final component of `path` as UTF-8, if it has one.
pub fn file_name_str(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

fn expand_home(raw: &Path) -> PathBuf {
    if let Ok(rest) = raw.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    raw.to_path_buf()
}
