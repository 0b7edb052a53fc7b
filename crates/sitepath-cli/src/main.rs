//! sitepath CLI
//!
//! Places directories and module files into site-packages and takes them
//! out again.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use sitepath_core::{Mode, Severity};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        let label = match e.severity() {
            Severity::Error => "error".red().bold(),
            Severity::Failure => "failure".red().bold(),
        };
        eprintln!("{label}: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            eprintln!("warning: tracing subscriber already installed");
        }
        tracing::debug!("Verbose mode enabled");
    }

    let cwd = std::env::current_dir()?;
    let ctx = context::build(&cli.site, &cwd)?;

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => commands::run_status(&ctx),
        Commands::Symlink(args) => commands::run_place(&ctx, Mode::Symlink, &args),
        Commands::Copy(args) => commands::run_place(&ctx, Mode::Copy, &args),
        Commands::Develop(args) => commands::run_place(&ctx, Mode::Develop, &args),
        Commands::Unsymlink(args) => commands::run_remove(&ctx, Mode::Symlink, &args),
        Commands::Uncopy(args) => commands::run_remove(&ctx, Mode::Copy, &args),
        Commands::Undevelop(args) => commands::run_remove(&ctx, Mode::Develop, &args),
        Commands::Info(args) => commands::run_info(&ctx, &args),
        Commands::List { kinds } => commands::run_list(&ctx, &kinds),
        Commands::Diff(args) => commands::run_diff(&ctx, &args),
    }
}
