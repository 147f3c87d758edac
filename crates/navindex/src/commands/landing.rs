//! `navindex landing` command implementation.

use std::path::PathBuf;

use clap::Args;
use navindex_site::LandingPages;

use super::{load_content_dir, path_within};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the landing command.
#[derive(Args)]
pub(crate) struct LandingArgs {
    /// Directory to scan, relative to the docs directory (default: the whole docs directory).
    dir: Option<String>,

    /// Path to configuration file (default: auto-discover navindex.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation directory relative to the workspace (overrides mkdocs.yml).
    #[arg(long)]
    docs_dir: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl LandingArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let (config, content_dir) = load_content_dir(self.config.as_deref(), self.docs_dir)?;
        let base = match &self.dir {
            Some(dir) => path_within(&content_dir, dir)?,
            None => content_dir,
        };

        let paths = config.path_display();
        let report = LandingPages::from_config(&config).run(&base)?;

        for path in &report.rewritten {
            output.info(&format!("Updated {}", paths.shorten(path)));
        }
        output.success(&format!(
            "Scanned {} directories, updated {} landing pages",
            report.visited,
            report.rewritten.len()
        ));
        Ok(())
    }
}
