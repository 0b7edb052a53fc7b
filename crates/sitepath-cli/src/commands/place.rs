//! Placing and reversing commands

use colored::Colorize;
use sitepath_core::{Mode, SiteContext, place, remove_raw, run_batch};

use super::collect_targets;
use crate::cli::{PlaceArgs, TargetArgs};
use crate::error::Result;

/// Run `symlink`, `copy`, or `develop` over every target.
pub fn run_place(ctx: &SiteContext, mode: Mode, args: &PlaceArgs) -> Result<()> {
    if args.name_only {
        eprintln!("note: using -n or -nr has an effect with un-commands only.");
    }
    let items = collect_targets(ctx, &args.targets, args.read.as_deref())?;
    run_batch(mode.as_str(), &items, |item| {
        let placed = place(ctx, mode, item)?;
        let verb = if placed.refreshed { "refreshed" } else { mode.past() };
        println!(
            "{} {} {} {}",
            verb.green(),
            placed.origin.display(),
            "->".dimmed(),
            placed.destination.display()
        );
        Ok(())
    })?;
    Ok(())
}

/// Run `unsymlink`, `uncopy`, or `undevelop` over every target.
pub fn run_remove(ctx: &SiteContext, mode: Mode, args: &TargetArgs) -> Result<()> {
    let items = args.collect(ctx)?;
    if items.is_empty() {
        return Err(sitepath_core::Error::invalid_input(
            "Need a package name, directory, or file path.",
        )
        .into());
    }
    run_batch(mode.undo_verb(), &items, |item| {
        let removed = remove_raw(ctx, mode, item, args.name_only)?;
        println!("{} {}", "removed".yellow(), removed.artifact.display());
        Ok(())
    })?;
    Ok(())
}
