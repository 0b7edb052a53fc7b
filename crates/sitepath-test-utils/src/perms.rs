//! Permission helpers.
//!
//! Root ignores directory permissions, so tests built on a read-only
//! candidate should return early when [`is_root`] is true.

use std::path::Path;

/// Whether the current user is root.
pub fn is_root() -> bool {
    match std::process::Command::new("id").arg("-u").output() {
        Ok(output) => String::from_utf8_lossy(&output.stdout).trim() == "0",
        Err(_) => false,
    }
}

/// Drop write permission on `path`.
#[cfg(unix)]
pub fn make_readonly(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o555))
        .unwrap_or_else(|e| panic!("make_readonly {}: {e}", path.display()));
}

/// Restore write permission on `path`. Call before the sandbox drops.
#[cfg(unix)]
pub fn make_writable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .unwrap_or_else(|e| panic!("make_writable {}: {e}", path.display()));
}

#[cfg(not(unix))]
pub fn make_readonly(path: &Path) {
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_readonly(true);
    std::fs::set_permissions(path, perms).unwrap();
}

#[cfg(not(unix))]
pub fn make_writable(path: &Path) {
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(false);
    std::fs::set_permissions(path, perms).unwrap();
}
