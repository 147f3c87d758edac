//! Section building from navigation descriptors.
//!
//! Walks a navigation tree and produces Markdown lines: a level-2 heading
//! per titled entry followed by a `Title | Tags | Summary` table of its
//! documents. Sections without any listable document are dropped entirely.

use std::path::{Path, PathBuf};

use navindex_config::{Config, PathDisplay};
use navindex_meta::MetadataExtractor;
use navindex_nav::{
    NavEntry, NavLoader, PathResolver, ResolvedPath, scan_documents, scan_nav_dirs,
    title_from_slug,
};

use crate::table::{TABLE_HEADER, TABLE_SEPARATOR, TagFormatter, escape_cell, site_path};

/// Builds generated Markdown for a navigation tree.
pub struct SectionBuilder {
    resolver: PathResolver,
    loader: NavLoader,
    extractor: MetadataExtractor,
    tags: TagFormatter,
    /// Directory that site links are relative to.
    site_root: PathBuf,
    extension: String,
    index_filename: String,
    display: PathDisplay,
}

impl SectionBuilder {
    /// Create a builder from configuration.
    ///
    /// Targets are contained in the workspace root; links are relative to
    /// the docs directory.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let docs = &config.docs_resolved;
        let index = &config.index;
        let display = config.path_display();
        let site_root =
            std::fs::canonicalize(&docs.source_dir).unwrap_or_else(|_| docs.source_dir.clone());

        Self {
            resolver: PathResolver::new(docs.workspace_root.clone())
                .with_content_roots(index.content_roots.clone())
                .with_index_filename(index.index_filename.clone()),
            loader: NavLoader::new(index.nav_filename.clone(), display.clone()),
            extractor: MetadataExtractor::new(display.clone()),
            tags: TagFormatter::new(index.acronyms.clone()),
            site_root,
            extension: index.extension.clone(),
            index_filename: index.index_filename.clone(),
            display,
        }
    }

    /// Build the generated body for a target directory.
    ///
    /// Uses the directory's descriptor when present. Otherwise every
    /// subdirectory with a descriptor becomes a section titled after the
    /// first entry of that descriptor.
    pub fn build_directory(&self, dir: &Path) -> Vec<String> {
        let mut ancestors =
            vec![std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf())];

        if let Some(entries) = self.descriptor_entries(dir) {
            return self.build_entries(&entries, dir, &mut ancestors);
        }

        tracing::info!(
            path = %self.display.shorten(dir),
            "No {} found, scanning subdirectories",
            self.loader.filename()
        );
        let mut out = Vec::new();
        for sub in scan_nav_dirs(dir, self.loader.filename()) {
            let resolved = match self.resolver.contain(&sub) {
                Ok(resolved) => resolved,
                Err(e) => {
                    tracing::warn!(error = %e, "Security warning - skipping unsafe path");
                    continue;
                }
            };
            let Some(entries) = self.descriptor_entries(resolved.as_path()) else {
                continue;
            };
            let Some(first) = entries.first() else {
                continue;
            };
            let title = if first.title.is_empty() {
                sub.file_name()
                    .map(|name| title_from_slug(&name.to_string_lossy()))
                    .unwrap_or_default()
            } else {
                first.title.clone()
            };

            ancestors.push(resolved.as_path().to_path_buf());
            let body = self.build_entries(&entries, resolved.as_path(), &mut ancestors);
            ancestors.pop();
            push_section(&mut out, &title, body);
        }
        out
    }

    /// Entries of the descriptor in `dir`, or `None` if it has none.
    ///
    /// A descriptor that resolves outside the root is never read and yields
    /// no entries.
    fn descriptor_entries(&self, dir: &Path) -> Option<Vec<NavEntry>> {
        let nav_path = self.loader.descriptor_in(dir)?;
        match self.resolver.contain(&nav_path) {
            Ok(resolved) => {
                tracing::info!(
                    path = %self.display.shorten(resolved.as_path()),
                    "Processing navigation file"
                );
                Some(self.loader.load(resolved.as_path()))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Security warning - skipping unsafe navigation file");
                Some(Vec::new())
            }
        }
    }

    /// Build lines for a list of entries relative to `base`.
    fn build_entries(
        &self,
        entries: &[NavEntry],
        base: &Path,
        ancestors: &mut Vec<PathBuf>,
    ) -> Vec<String> {
        let mut out = Vec::new();
        for entry in entries {
            self.build_entry(entry, base, ancestors, &mut out);
        }
        out
    }

    /// Build the section for one entry, appending to `out`.
    ///
    /// Failures are logged and the entry is skipped.
    fn build_entry(
        &self,
        entry: &NavEntry,
        base: &Path,
        ancestors: &mut Vec<PathBuf>,
        out: &mut Vec<String>,
    ) {
        if self.resolver.is_index_target(&entry.target) {
            return;
        }

        let resolved = match self.resolver.resolve(base, &entry.target) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(title = %entry.title, error = %e, "Security warning - skipping unsafe path");
                return;
            }
        };

        let path = resolved.as_path();
        if path.is_dir() {
            let body = self.directory_body(&resolved, ancestors);
            push_section(out, &entry.title, body);
        } else if path.is_file() && self.is_document(path) {
            let body = self.document_table(std::slice::from_ref(&resolved));
            push_section(out, &entry.title, body);
        } else {
            self.build_fallback(entry, base, &resolved, out);
        }
    }

    /// Retry a missing target with the document extension appended.
    fn build_fallback(
        &self,
        entry: &NavEntry,
        base: &Path,
        missing: &ResolvedPath,
        out: &mut Vec<String>,
    ) {
        let raw = format!("{}.{}", entry.target.trim_end_matches('/'), self.extension);
        match self.resolver.resolve(base, &raw) {
            Ok(fallback) if fallback.as_path().is_file() => {
                let body = self.document_table(std::slice::from_ref(&fallback));
                push_section(out, &entry.title, body);
            }
            Ok(fallback) => {
                tracing::warn!(
                    "Referenced path not found: {} (also tried {})",
                    self.display.shorten(missing.as_path()),
                    self.display.shorten(fallback.as_path())
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Referenced path not found: {}",
                    self.display.shorten(missing.as_path())
                );
            }
        }
    }

    /// Body of a directory section: its descriptor's sections, or a table
    /// of its documents when it has no descriptor.
    fn directory_body(&self, dir: &ResolvedPath, ancestors: &mut Vec<PathBuf>) -> Vec<String> {
        let dir_path = dir.as_path();
        if ancestors.iter().any(|a| a == dir_path) {
            tracing::warn!(
                path = %self.display.shorten(dir_path),
                "Skipping navigation cycle"
            );
            return Vec::new();
        }

        if let Some(entries) = self.descriptor_entries(dir_path) {
            ancestors.push(dir_path.to_path_buf());
            let body = self.build_entries(&entries, dir_path, ancestors);
            ancestors.pop();
            return body;
        }

        let docs: Vec<ResolvedPath> =
            scan_documents(dir_path, &self.extension, &self.index_filename)
                .into_iter()
                .filter_map(|doc| {
                    self.resolver
                        .contain(&doc)
                        .inspect_err(|e| {
                            tracing::warn!(error = %e, "Security warning - skipping unsafe path");
                        })
                        .ok()
                })
                .collect();
        self.document_table(&docs)
    }

    /// Table of listable documents; empty when none qualify.
    fn document_table(&self, docs: &[ResolvedPath]) -> Vec<String> {
        let rows: Vec<String> = docs
            .iter()
            .filter_map(|doc| self.table_row(doc.as_path()))
            .collect();
        if rows.is_empty() {
            return rows;
        }

        let mut table = Vec::with_capacity(rows.len() + 2);
        table.push(TABLE_HEADER.to_owned());
        table.push(TABLE_SEPARATOR.to_owned());
        table.extend(rows);
        table
    }

    /// Table row for a document, or `None` if it lacks title or summary.
    fn table_row(&self, doc: &Path) -> Option<String> {
        let meta = self.extractor.extract(doc);
        if !meta.is_listable() {
            tracing::warn!(
                path = %self.display.shorten(doc),
                "Skipping document - missing title or description"
            );
            return None;
        }

        let title = match site_path(doc, &self.site_root) {
            Some(link) => format!("[{}]({link})", meta.title),
            None => meta.title.clone(),
        };

        Some(format!(
            "| {} | {} | {} |",
            escape_cell(&title),
            escape_cell(&self.tags.format(&meta.tags)),
            escape_cell(&meta.summary)
        ))
    }

    fn is_document(&self, path: &Path) -> bool {
        path.extension().is_some_and(|e| e == self.extension.as_str())
    }
}

/// Append a titled section, unless its body is empty.
fn push_section(out: &mut Vec<String>, title: &str, body: Vec<String>) {
    if body.is_empty() {
        return;
    }
    let ends_blank = body.last().is_some_and(String::is_empty);
    out.push(format!("## {title}"));
    out.push(String::new());
    out.extend(body);
    if !ends_blank {
        out.push(String::new());
    }
}
