//! Diff command implementation

use colored::Colorize;
use sitepath_core::{Drift, PlacedEntry, SiteContext, Status, Target, diff, run_batch};
use sitepath_fs::{TreeDiff, file_name_str};

use crate::cli::TargetArgs;
use crate::error::Result;

/// Compare copies with their origins. Without targets every copy is
/// compared.
pub fn run_diff(ctx: &SiteContext, args: &TargetArgs) -> Result<()> {
    let status = Status::scan(ctx.candidates())?;
    let mut items = args.collect(ctx)?;
    if items.is_empty() && args.read.is_none() {
        items = status
            .copied
            .iter()
            .map(|entry| entry.path.display().to_string())
            .collect();
        if items.is_empty() {
            println!("{}", "No sitepath copies found".dimmed());
            return Ok(());
        }
    }

    run_batch("diff", &items, |item| {
        let entry = find_copy(ctx, &status, item, args.name_only)?;
        for line in describe(&entry.path.display().to_string(), &diff(entry)?) {
            println!("{line}");
        }
        Ok(())
    })?;
    Ok(())
}

/// A copy given by its placed path, package name, or origin path.
fn find_copy<'a>(
    ctx: &SiteContext,
    status: &'a Status,
    item: &str,
    name_only: bool,
) -> sitepath_core::Result<&'a PlacedEntry> {
    if let Some(entry) = status.copied.iter().find(|e| e.path.to_str() == Some(item)) {
        return Ok(entry);
    }
    let target = Target::parse(item, ctx.cwd(), name_only)?;
    let ident = target.ident();
    let names = [ident.to_string(), ident.module_file()];
    status
        .copied
        .iter()
        .find(|e| {
            file_name_str(&e.path).is_some_and(|n| names.iter().any(|name| name == n))
                && target.expected_origin().is_none_or(|o| e.origin() == Some(o))
        })
        .ok_or_else(|| sitepath_core::Error::NotFound {
            name: ident.to_string(),
            attempts: Vec::new(),
        })
}

/// Summary lines for one compared copy.
pub fn describe(copy: &str, drift: &Drift) -> Vec<String> {
    match drift {
        Drift::Unchanged => vec![format!("{} {copy}", "unchanged".green())],
        Drift::Missing { origin } => vec![format!(
            "{} {copy}: origin not found {}",
            "MISSING".red(),
            origin.display()
        )],
        Drift::Changed(tree) => {
            let mut lines = vec![format!("{} {copy}", "changed".yellow())];
            lines.extend(tree_lines(tree));
            lines
        }
    }
}

fn tree_lines(tree: &TreeDiff) -> Vec<String> {
    let mut lines = Vec::new();
    for path in &tree.added {
        lines.push(format!("    + {}", path.display()));
    }
    for path in &tree.removed {
        lines.push(format!("    - {}", path.display()));
    }
    for path in &tree.differing {
        lines.push(format!("    ~ {}", path.display()));
    }
    lines
}
