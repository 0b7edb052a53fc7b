//! [`Sandbox`] fixture for placement scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary tree with two candidate directories and two origins:
///
/// ```text
/// <root>/
///   site-packages/
///   user-site-packages/
///   my_project/__init__.py   "project=True"
///   my_file.py               "file=True"
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use sitepath_test_utils::Sandbox;
///
/// let sandbox = Sandbox::new();
/// sandbox.write("my_project/extra.py", "x = 1");
/// sandbox.assert_exists("my_project/extra.py");
/// ```
pub struct Sandbox {
    temp_dir: TempDir,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Sandbox {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let sandbox = Self { temp_dir };
        fs::create_dir(sandbox.site()).unwrap();
        fs::create_dir(sandbox.user_site()).unwrap();
        sandbox.write("my_project/__init__.py", "project=True");
        sandbox.write("my_file.py", "file=True");
        sandbox
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The primary candidate.
    pub fn site(&self) -> PathBuf {
        self.root().join("site-packages")
    }

    /// The fallback candidate.
    pub fn user_site(&self) -> PathBuf {
        self.root().join("user-site-packages")
    }

    /// The sample package origin.
    pub fn project(&self) -> PathBuf {
        self.root().join("my_project")
    }

    /// The sample module file origin.
    pub fn module_file(&self) -> PathBuf {
        self.root().join("my_file.py")
    }

    /// Write `content` at `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> String {
        let path = self.root().join(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// # Panics
    /// Panics if `rel` (relative to the root) does not exist, following no
    /// symlinks.
    pub fn assert_exists(&self, rel: &str) {
        let path = self.root().join(rel);
        assert!(
            fs::symlink_metadata(&path).is_ok(),
            "Expected entry to exist: {}",
            path.display()
        );
    }

    /// # Panics
    /// Panics if anything, even a dangling symlink, exists at `rel`.
    pub fn assert_absent(&self, rel: &str) {
        let path = self.root().join(rel);
        assert!(
            fs::symlink_metadata(&path).is_err(),
            "Expected entry NOT to exist: {}",
            path.display()
        );
    }
}
