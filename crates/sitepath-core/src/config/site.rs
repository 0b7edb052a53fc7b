//! Site configuration values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// One configuration layer as written in TOML.
///
/// ```toml
/// site_packages = ["/usr/lib/python3/site-packages"]
/// user_site = "/home/me/.local/lib/python3/site-packages"
/// enable_user_site = true
/// env_root = "/home/me/venvs/dev"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteManifest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub site_packages: Vec<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_site: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_user_site: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_root: Option<PathBuf>,
}

impl SiteManifest {
    /// Parse a TOML layer. `path` is only used in the error.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a TOML layer from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    /// Overlay `other` on top of `self`.
    ///
    /// Set fields in `other` win; a non-empty `site_packages` list replaces
    /// the current one.
    pub fn merge(&mut self, other: &SiteManifest) {
        if !other.site_packages.is_empty() {
            self.site_packages = other.site_packages.clone();
        }
        if other.user_site.is_some() {
            self.user_site = other.user_site.clone();
        }
        if other.enable_user_site.is_some() {
            self.enable_user_site = other.enable_user_site;
        }
        if other.env_root.is_some() {
            self.env_root = other.env_root.clone();
        }
    }
}

/// Resolved inputs of the destination resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Primary candidate directories, in priority order
    pub site_packages: Vec<PathBuf>,
    /// The optional per-user directory
    pub user_site: Option<PathBuf>,
    /// Whether the per-user directory may be used
    pub enable_user_site: bool,
    /// Root of the active environment, tried last
    pub env_root: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_packages: Vec::new(),
            user_site: None,
            enable_user_site: true,
            env_root: None,
        }
    }
}

impl From<SiteManifest> for SiteConfig {
    fn from(manifest: SiteManifest) -> Self {
        Self {
            site_packages: manifest.site_packages,
            user_site: manifest.user_site,
            enable_user_site: manifest.enable_user_site.unwrap_or(true),
            env_root: manifest.env_root,
        }
    }
}
