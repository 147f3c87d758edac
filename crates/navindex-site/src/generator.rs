//! Index file generation.

use std::fs;
use std::path::{Path, PathBuf};

use navindex_config::{Config, PathDisplay};
use navindex_nav::{PathResolver, ResolvedPath};

use crate::GenerateError;
use crate::preserve::extract_manual_prefix;
use crate::sections::SectionBuilder;
use crate::stitch::GeneratedDocument;
use crate::table::{TABLE_HEADER, TABLE_SEPARATOR};

/// Summary of a generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationReport {
    /// Output file that was (or would be) written.
    pub output_path: PathBuf,
    /// Number of section headings in the generated block.
    pub sections: usize,
    /// Number of document rows in the generated block.
    pub rows: usize,
    /// Whether the output differs from what was on disk.
    pub changed: bool,
}

/// Generates index files for target directories.
pub struct IndexGenerator {
    sections: SectionBuilder,
    resolver: PathResolver,
    display: PathDisplay,
}

/// A rendered document not yet written.
struct Rendered {
    output: ResolvedPath,
    text: String,
    sections: usize,
    rows: usize,
}

impl IndexGenerator {
    /// Create a generator from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            sections: SectionBuilder::from_config(config),
            resolver: PathResolver::new(config.docs_resolved.workspace_root.clone()),
            display: config.path_display(),
        }
    }

    /// Render the output document for `target_dir` without writing it.
    ///
    /// # Errors
    ///
    /// Returns error if the target or output path escapes the workspace, the
    /// target directory doesn't exist, or an existing output can't be read.
    pub fn render(&self, target_dir: &Path, output_filename: &str) -> Result<String, GenerateError> {
        Ok(self.prepare(target_dir, output_filename)?.text)
    }

    /// Generate and write the output document for `target_dir`.
    ///
    /// The file is replaced through a temporary sibling and a rename, and
    /// left untouched when its content wouldn't change.
    ///
    /// # Errors
    ///
    /// Returns error if rendering fails or the output can't be written.
    pub fn generate(
        &self,
        target_dir: &Path,
        output_filename: &str,
    ) -> Result<GenerationReport, GenerateError> {
        let rendered = self.prepare(target_dir, output_filename)?;
        let path = rendered.output.as_path();
        let changed = differs_from_disk(path, &rendered.text);

        if changed {
            write_replacing(path, &rendered.text)?;
            tracing::info!(path = %self.display.shorten(path), "Wrote index");
        } else {
            tracing::info!(path = %self.display.shorten(path), "Index unchanged");
        }

        Ok(report(&rendered, changed))
    }

    /// Compare the output document on disk with what would be generated.
    ///
    /// Never writes. `changed` in the report is true when the file is stale.
    ///
    /// # Errors
    ///
    /// Returns error if rendering fails.
    pub fn check(
        &self,
        target_dir: &Path,
        output_filename: &str,
    ) -> Result<GenerationReport, GenerateError> {
        let rendered = self.prepare(target_dir, output_filename)?;
        let changed = differs_from_disk(rendered.output.as_path(), &rendered.text);
        Ok(report(&rendered, changed))
    }

    fn prepare(&self, target_dir: &Path, output_filename: &str) -> Result<Rendered, GenerateError> {
        let target = self.resolver.contain(target_dir)?;
        if !target.as_path().is_dir() {
            return Err(GenerateError::TargetNotFound(target.into_path_buf()));
        }
        let output = self
            .resolver
            .contain(&target.as_path().join(output_filename))?;

        tracing::info!(path = %self.display.shorten(target.as_path()), "Generating index");
        let generated_body = self.sections.build_directory(target.as_path());
        let manual_prefix = extract_manual_prefix(&output)?;

        let sections = generated_body.iter().filter(|l| l.starts_with("## ")).count();
        let rows = generated_body
            .iter()
            .filter(|l| l.starts_with('|') && *l != TABLE_HEADER && *l != TABLE_SEPARATOR)
            .count();

        let document = GeneratedDocument {
            manual_prefix,
            generated_body,
        };
        Ok(Rendered {
            output,
            text: document.stitch(),
            sections,
            rows,
        })
    }
}

fn report(rendered: &Rendered, changed: bool) -> GenerationReport {
    GenerationReport {
        output_path: rendered.output.as_path().to_path_buf(),
        sections: rendered.sections,
        rows: rendered.rows,
        changed,
    }
}

fn differs_from_disk(path: &Path, text: &str) -> bool {
    fs::read(path).map_or(true, |existing| existing != text.as_bytes())
}

/// Replace `path` with `text` via a temporary file in the same directory.
pub(crate) fn write_replacing(path: &Path, text: &str) -> Result<(), GenerateError> {
    let write_err = |source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&tmp_path, text).map_err(write_err)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(e));
    }
    Ok(())
}
