//! Site context construction
//!
//! Turns the global flags into the [`SiteContext`] every command runs
//! against. Flags overlay the loaded configuration layers.

use std::path::Path;

use sitepath_core::{ConfigLoader, SiteConfig, SiteContext, SiteManifest};
use sitepath_fs::absolutize;

use crate::cli::SiteArgs;
use crate::error::Result;

/// The flag layer, merged over the configuration files.
fn flag_manifest(args: &SiteArgs) -> SiteManifest {
    SiteManifest {
        site_packages: args.sites.clone(),
        user_site: args.user_site.clone(),
        enable_user_site: args.no_user_site.then_some(false),
        env_root: args.env_root.clone(),
    }
}

pub fn resolve_config(args: &SiteArgs, loader: ConfigLoader) -> Result<SiteConfig> {
    let loader = match &args.config {
        Some(path) => loader.with_file(path),
        None => loader,
    };
    let mut manifest = loader.load_manifest()?;
    manifest.merge(&flag_manifest(args));
    Ok(SiteConfig::from(manifest))
}

/// Build the context for one invocation. Relative directories resolve
/// against `cwd`.
pub fn build(args: &SiteArgs, cwd: &Path) -> Result<SiteContext> {
    let mut config = resolve_config(args, ConfigLoader::new())?;
    for dir in &mut config.site_packages {
        *dir = absolutize(cwd, dir.as_path());
    }
    config.user_site = config.user_site.map(|d| absolutize(cwd, d));
    config.env_root = config.env_root.map(|d| absolutize(cwd, d));
    tracing::debug!(?config, "Resolved site configuration");
    Ok(SiteContext::new(&config, cwd))
}
