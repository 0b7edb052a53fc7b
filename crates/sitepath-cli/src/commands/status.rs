//! Status command implementation

use std::fs;

use colored::Colorize;
use sitepath_core::{SiteContext, Status};

use crate::error::Result;

/// Print the candidate list and every placement found in it.
pub fn run_status(ctx: &SiteContext) -> Result<()> {
    let status = Status::scan(ctx.candidates())?;

    println!("{}:", "Active site-packages".bold());
    if ctx.candidates().is_empty() {
        println!(
            "  {} (use {} or a config file)",
            "None".dimmed(),
            "--site".cyan()
        );
    }
    for candidate in ctx.candidates() {
        let note = if candidate.user { " (user)" } else { "" };
        println!("    {}{}", candidate.path.display(), note.dimmed());
    }
    println!();

    println!("{}:", "Active .pth files".bold());
    for pth in &status.pth_files {
        println!("    {}", pth.display());
    }
    println!();

    println!(
        "{} {} found",
        "sitepath-symlinked packages:".bold(),
        status.symlinked.len()
    );
    for entry in &status.symlinked {
        let target = fs::read_link(&entry.path)?;
        if entry.path.exists() {
            println!("    {} --> {}", entry.path.display(), target.display());
        } else {
            println!(
                "{} {} --> {} {}",
                "!!!".red(),
                entry.path.display(),
                target.display(),
                "(broken)".red()
            );
        }
    }

    println!(
        "{} {} found",
        "sitepath-copied packages:   ".bold(),
        status.copied.len()
    );
    for entry in &status.copied {
        match entry.origin() {
            Some(origin) if origin.exists() => {
                println!("    {} <-- {}", entry.path.display(), origin.display());
            }
            Some(origin) => println!(
                "{}   {} <-- {} {}",
                "?".yellow(),
                entry.path.display(),
                origin.display(),
                "(missing)".yellow()
            ),
            None => println!(
                "{}   {} {}",
                "?".yellow(),
                entry.path.display(),
                "(unrecognized marker)".yellow()
            ),
        }
    }

    println!(
        "{} {} found",
        "sitepath-developed packages:".bold(),
        status.developed.len()
    );
    for entry in &status.developed {
        match entry.pointer.as_ref().and_then(|p| p.directory()) {
            Some(dir) => {
                println!("    {}  >>>  {}", entry.path.display(), dir);
            }
            _ => {
                let lines = entry.pointer.as_ref().map(|p| p.pth.clone()).unwrap_or_default();
                println!(
                    "{}   {}  >>>  {:?} {}",
                    "?".yellow(),
                    entry.path.display(),
                    lines,
                    "(tampered)".yellow()
                );
            }
        }
    }

    if !status.orphaned.is_empty() {
        println!();
        println!("{}:", "Markers without a placement".bold());
        for marker in &status.orphaned {
            println!("    {}", marker.display().to_string().yellow());
        }
    }

    Ok(())
}
