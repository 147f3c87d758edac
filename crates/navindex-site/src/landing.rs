//! Landing page scaffolding.
//!
//! A landing page is a directory's index file that carries front matter
//! and nothing else. Such pages are given a title heading, their
//! description and an "In This Section" heading followed by a placeholder
//! that a site build hook later expands into the list of child pages.

use std::fs;
use std::path::{Path, PathBuf};

use navindex_config::{Config, PathDisplay};
use navindex_meta::{MetadataExtractor, parse_document, split_front_matter};
use navindex_nav::{PathResolver, title_from_slug};

use crate::GenerateError;
use crate::generator::write_replacing;

/// Placeholder line expanded by the site build into a child page list.
pub const IN_THIS_SECTION_PLACEHOLDER: &str = ":::INSERT_IN_THIS_SECTION:::";

/// Summary of a landing page run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LandingReport {
    /// Number of directories visited.
    pub visited: usize,
    /// Landing pages that were rewritten.
    pub rewritten: Vec<PathBuf>,
}

/// Rewrites front-matter-only landing pages.
pub struct LandingPages {
    resolver: PathResolver,
    extractor: MetadataExtractor,
    ignore_dirs: Vec<String>,
    index_filename: String,
    extension: String,
    display: PathDisplay,
}

impl LandingPages {
    /// Create a rewriter from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let display = config.path_display();
        Self {
            resolver: PathResolver::new(config.docs_resolved.workspace_root.clone()),
            extractor: MetadataExtractor::new(display.clone()),
            ignore_dirs: config.landing.ignore_dirs.clone(),
            index_filename: config.index.index_filename.clone(),
            extension: config.index.extension.clone(),
            display,
        }
    }

    /// Rewrite every eligible landing page under `base`.
    ///
    /// # Errors
    ///
    /// Returns error if `base` escapes the workspace or doesn't exist, or a
    /// landing page can't be written. Pages that can't be read, or that
    /// resolve outside the workspace, are logged and skipped.
    pub fn run(&self, base: &Path) -> Result<LandingReport, GenerateError> {
        let base = self.resolver.contain(base)?;
        if !base.as_path().is_dir() {
            return Err(GenerateError::TargetNotFound(base.into_path_buf()));
        }

        let mut report = LandingReport::default();
        for dir in walk_directories(base.as_path(), |name| self.is_ignored(name)) {
            report.visited += 1;
            match self.process(&dir) {
                Ok(Some(index)) => {
                    tracing::info!(path = %self.display.shorten(&index), "Updated landing page");
                    report.rewritten.push(index);
                }
                Ok(None) => {}
                Err(e @ GenerateError::Write { .. }) => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        path = %self.display.shorten(&dir),
                        error = %e,
                        "Skipping landing page"
                    );
                }
            }
        }
        Ok(report)
    }

    /// Rewrite the landing page of `dir` if eligible, returning its path.
    ///
    /// # Errors
    ///
    /// Returns error if the page resolves outside the workspace, can't be
    /// read as UTF-8, or can't be written.
    fn process(&self, dir: &Path) -> Result<Option<PathBuf>, GenerateError> {
        let index = dir.join(&self.index_filename);
        if !index.is_file() {
            return Ok(None);
        }
        let index = self.resolver.contain(&index)?.into_path_buf();

        let content = fs::read_to_string(&index).map_err(|source| GenerateError::Read {
            path: index.clone(),
            source,
        })?;
        let Some(front_matter) = split_front_matter(&content) else {
            return Ok(None);
        };
        if !front_matter.body.trim().is_empty() || !self.has_described_children(dir) {
            return Ok(None);
        }

        let meta = parse_document(content.as_bytes()).unwrap_or_else(|e| {
            tracing::warn!(path = %self.display.shorten(&index), error = %e, "Error reading front matter");
            navindex_meta::DocumentMetadata::default()
        });
        let title = if meta.title.is_empty() {
            dir.file_name()
                .map(|n| title_from_slug(&n.to_string_lossy()))
                .unwrap_or_default()
        } else {
            meta.title
        };

        let header = &content[..content.len() - front_matter.body.len()];
        let text = landing_text(header, &title, &meta.summary);
        write_replacing(&index, &text)?;
        Ok(Some(index))
    }

    /// Check for a child page with a title or description.
    ///
    /// Children are subdirectory index pages and sibling documents.
    fn has_described_children(&self, dir: &Path) -> bool {
        let Ok(entries) = fs::read_dir(dir) else {
            return false;
        };

        entries.filter_map(Result::ok).any(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            let Ok(file_type) = entry.file_type() else {
                return false;
            };
            let path = entry.path();

            let child = if file_type.is_dir() {
                if self.is_ignored(&name) {
                    return false;
                }
                path.join(&self.index_filename)
            } else if file_type.is_file()
                && path.extension().is_some_and(|e| e == self.extension.as_str())
                && !name.eq_ignore_ascii_case(&self.index_filename)
            {
                path
            } else {
                return false;
            };

            if !child.is_file() {
                return false;
            }
            let child = match self.resolver.contain(&child) {
                Ok(resolved) => resolved,
                Err(e) => {
                    tracing::warn!(error = %e, "Security warning - skipping unsafe path");
                    return false;
                }
            };
            let meta = self.extractor.extract(child.as_path());
            !meta.title.is_empty() || !meta.summary.is_empty()
        })
    }

    fn is_ignored(&self, name: &str) -> bool {
        name.starts_with('.') || self.ignore_dirs.iter().any(|d| d == name)
    }
}

/// Assemble a landing page from its front matter block.
fn landing_text(header: &str, title: &str, description: &str) -> String {
    let mut text = String::with_capacity(header.len() + title.len() + description.len() + 64);
    text.push_str(header);
    if !header.ends_with('\n') {
        text.push('\n');
    }
    text.push('\n');
    text.push_str("# ");
    text.push_str(title);
    text.push_str("\n\n");
    if !description.is_empty() {
        text.push_str(description);
        text.push_str("\n\n");
    }
    text.push_str("## In This Section\n\n");
    text.push_str(IN_THIS_SECTION_PLACEHOLDER);
    text.push('\n');
    text
}

/// List `base` and its descendant directories in sorted pre-order.
///
/// Directories whose name matches `exclude` are pruned with their
/// subtrees. Symlinked directories are not followed.
pub fn walk_directories(base: &Path, exclude: impl Fn(&str) -> bool) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![base.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let mut children: Vec<PathBuf> = fs::read_dir(&dir)
            .into_iter()
            .flatten()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
            .filter(|e| !exclude(&e.file_name().to_string_lossy()))
            .map(|e| e.path())
            .collect();
        children.sort();
        // Reverse so the smallest name is visited next.
        stack.extend(children.into_iter().rev());
        out.push(dir);
    }
    out
}
