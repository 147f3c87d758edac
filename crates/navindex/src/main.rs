//! navindex CLI - Index page generator for MkDocs documentation trees.
//!
//! Provides commands for:
//! - `generate`: Write the navigation-driven index of a docs directory
//! - `landing`: Scaffold front-matter-only landing pages
//! - `copy-md`: Publish raw Markdown sources next to the built site

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CopyMdArgs, GenerateArgs, LandingArgs};
use output::Output;

/// navindex - Index page generator for MkDocs documentation trees.
#[derive(Parser)]
#[command(name = "navindex", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the index page of a docs directory from its navigation.
    Generate(GenerateArgs),
    /// Add headings and an "In This Section" placeholder to landing pages.
    Landing(LandingArgs),
    /// Copy raw Markdown sources into a target directory.
    CopyMd(CopyMdArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Generate(args) => args.verbose,
            Self::Landing(args) => args.verbose,
            Self::CopyMd(args) => args.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => args.execute(),
        Commands::Landing(args) => args.execute(),
        Commands::CopyMd(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
