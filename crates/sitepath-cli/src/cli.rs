//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// sitepath - Place packages into site-packages by symlink, copy, or .pth pointer
#[derive(Parser, Debug)]
#[command(name = "sitepath")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub site: SiteArgs,

    /// The command to run (defaults to `status`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where placements may land
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteArgs {
    /// Configuration file layered over the global one
    #[arg(long, global = true, env = "SITEPATH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Candidate directories in priority order, replacing the configured list
    #[arg(
        long = "site",
        global = true,
        env = "SITEPATH_SITES",
        value_delimiter = ','
    )]
    pub sites: Vec<PathBuf>,

    /// Per-user candidate directory, tried after the primary ones
    #[arg(long, global = true)]
    pub user_site: Option<PathBuf>,

    /// Never use the per-user directory
    #[arg(long, global = true)]
    pub no_user_site: bool,

    /// Root of the active environment; tried last when it is a candidate
    #[arg(long, global = true, env = "VIRTUAL_ENV")]
    pub env_root: Option<PathBuf>,
}

/// Targets of a placing command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceArgs {
    /// Directories or module files
    pub targets: Vec<String>,

    /// Read targets from FILE, one per line
    #[arg(short = 'r', value_name = "FILE")]
    pub read: Option<PathBuf>,

    /// Only meaningful for un-commands
    #[arg(short = 'n', hide = true)]
    pub name_only: bool,
}

/// Targets of a reversing or inspecting command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetArgs {
    /// Package names, directories, or module files
    pub targets: Vec<String>,

    /// Read targets from FILE, one per line
    #[arg(short = 'r', value_name = "FILE")]
    pub read: Option<PathBuf>,

    /// Treat paths as package names, skipping the origin check
    #[arg(short = 'n')]
    pub name_only: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show candidate directories and every placement (default)
    Status,

    /// Symlink a directory or file into site-packages
    #[command(visible_alias = "link")]
    Symlink(PlaceArgs),

    /// Remove a symlink by package name or path
    #[command(visible_alias = "unlink")]
    Unsymlink(TargetArgs),

    /// Copy a directory or file into site-packages
    Copy(PlaceArgs),

    /// Delete a copy by package name or path
    Uncopy(TargetArgs),

    /// Add the parent of a directory or file to <name>.sitepath.pth
    Develop(PlaceArgs),

    /// Remove <name>.sitepath.pth
    Undevelop(TargetArgs),

    /// Show the records kept for packages (all placed names by default)
    Info(TargetArgs),

    /// Print placement origins, one per line, for use with -r
    ///
    /// Examples:
    ///   sitepath list copies > copies.txt
    ///   sitepath uncopy -r copies.txt
    ///   sitepath copy -r copies.txt
    List {
        /// symlinks, copies, develops, changed, or all
        #[arg(required = true)]
        kinds: Vec<String>,
    },

    /// Compare copies with their origins (all copies by default)
    Diff(TargetArgs),
}
