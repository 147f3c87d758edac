//! `navindex generate` command implementation.

use std::path::PathBuf;

use clap::Args;
use navindex_nav::{ensure_within, sanitize_input};
use navindex_site::IndexGenerator;

use super::{load_content_dir, path_within};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Directory to index, relative to the docs directory (e.g. smart-contracts/cookbook).
    target: String,

    /// Output filename inside the target directory (default: from config, index.md).
    output: Option<String>,

    /// Exit with an error if the output is out of date instead of writing it.
    #[arg(long)]
    check: bool,

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

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if inputs are invalid, paths escape the docs
    /// directory, generation fails, or `--check` finds a stale output.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let (config, content_dir) = load_content_dir(self.config.as_deref(), self.docs_dir)?;
        let output_filename = match self.output {
            Some(name) => sanitize_input(&name, false)?,
            None => config.index.output_filename.clone(),
        };

        let target_dir = path_within(&content_dir, &self.target)?;
        if !target_dir.is_dir() {
            return Err(CliError::Validation(format!(
                "Target directory does not exist: {} (looked in docs directory '{}')",
                self.target, config.docs_resolved.docs_dir
            )));
        }
        ensure_within(&target_dir.join(&output_filename), &content_dir)?;

        let paths = config.path_display();
        tracing::info!(
            dir = %paths.shorten(&target_dir),
            content = %paths.shorten(&content_dir),
            output = %output_filename,
            "Generating index"
        );

        let generator = IndexGenerator::from_config(&config);

        if self.check {
            let report = generator.check(&target_dir, &output_filename)?;
            if report.changed {
                output.warning(&format!(
                    "Stale: {}",
                    paths.shorten(&report.output_path)
                ));
                return Err(CliError::Stale(report.output_path));
            }
            output.success(&format!(
                "Up to date: {}",
                paths.shorten(&report.output_path)
            ));
            return Ok(());
        }

        let report = generator.generate(&target_dir, &output_filename)?;
        let shown = paths.shorten(&report.output_path);
        if report.changed {
            output.success(&format!(
                "Generated {shown} ({} sections, {} documents)",
                report.sections, report.rows
            ));
        } else {
            output.info(&format!("{shown} is already up to date"));
        }
        Ok(())
    }
}
