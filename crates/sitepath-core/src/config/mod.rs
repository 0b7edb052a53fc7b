//! Configuration of candidate directories
//!
//! - [`SiteManifest`]: one TOML layer, every field optional
//! - [`ConfigLoader`]: merges the global layer under an explicit file
//! - [`SiteConfig`]: the resolved values
//! - [`resolve_candidates`]: the ordered candidate list

mod loader;
mod resolver;
mod site;

pub use loader::ConfigLoader;
pub use resolver::{Candidate, resolve_candidates};
pub use site::{SiteConfig, SiteManifest};
