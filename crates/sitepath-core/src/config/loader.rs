//! Layered loading of site configuration
//!
//! Layers, later ones overriding earlier ones:
//! 1. Global defaults (`<config_dir>/sitepath/config.toml`)
//! 2. An explicit file (e.g. `--config`)

use std::path::PathBuf;

use super::site::{SiteConfig, SiteManifest};
use crate::{Error, Result};

const CONFIG_FILE: &str = "config.toml";

/// Loads and merges configuration layers into a [`SiteConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Explicit configuration file; must exist when set
    explicit: Option<PathBuf>,

    /// Override for the global config directory (used for testing).
    /// When `None`, the platform directory from `dirs::config_dir()` is used.
    global_config_dir_override: Option<PathBuf>,

    /// Skip the global layer entirely
    skip_global: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    pub fn with_global_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.global_config_dir_override = Some(dir.into());
        self
    }

    pub fn without_global(mut self) -> Self {
        self.skip_global = true;
        self
    }

    fn global_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref override_dir) = self.global_config_dir_override {
            return Some(override_dir.clone());
        }
        dirs::config_dir().map(|d| d.join("sitepath"))
    }

    /// Merge the layers as a manifest, for callers that overlay more values.
    pub fn load_manifest(&self) -> Result<SiteManifest> {
        let mut manifest = SiteManifest::default();

        if !self.skip_global
            && let Some(global_dir) = self.global_config_dir()
        {
            let global_path = global_dir.join(CONFIG_FILE);
            if global_path.is_file() {
                tracing::debug!(?global_path, "Loading global config");
                manifest.merge(&SiteManifest::load(&global_path)?);
            } else {
                tracing::debug!(?global_path, "No global config found, skipping");
            }
        }

        if let Some(path) = &self.explicit {
            if !path.is_file() {
                return Err(Error::Config {
                    path: path.clone(),
                    message: "file not found".to_string(),
                });
            }
            tracing::debug!(?path, "Loading config file");
            manifest.merge(&SiteManifest::load(path)?);
        }

        Ok(manifest)
    }

    pub fn load(&self) -> Result<SiteConfig> {
        self.load_manifest().map(SiteConfig::from)
    }
}
