//! Command implementations for sitepath-cli

pub mod diff;
pub mod info;
pub mod list;
pub mod place;
pub mod status;

pub use diff::run_diff;
pub use info::run_info;
pub use list::run_list;
pub use place::{run_place, run_remove};
pub use status::run_status;

use sitepath_core::read_target_file;

use crate::cli::TargetArgs;
use crate::error::Result;

/// Targets from `-r FILE` when given, otherwise from the command line.
pub(crate) fn collect_targets(
    ctx: &sitepath_core::SiteContext,
    targets: &[String],
    read: Option<&std::path::Path>,
) -> Result<Vec<String>> {
    match read {
        Some(file) => Ok(read_target_file(&ctx.absolutize(file))?),
        None => Ok(targets.to_vec()),
    }
}

impl TargetArgs {
    pub(crate) fn collect(&self, ctx: &sitepath_core::SiteContext) -> Result<Vec<String>> {
        collect_targets(ctx, &self.targets, self.read.as_deref())
    }
}
