//! Navigation descriptor loading.
//!
//! A descriptor (`.nav.yml` by default) is an ordered list of single-key
//! mappings, either bare or wrapped under a top-level `nav` key:
//!
//! ```yaml
//! nav:
//!   - Getting Started: getting-started/
//!   - Reference: /reference/api.md
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use navindex_config::PathDisplay;
use serde_yaml::Value;

use crate::NavEntry;
use crate::error::NavError;

/// Key wrapping the entry list in the mapping form.
const NAV_KEY: &str = "nav";

/// Loads navigation descriptors, degrading failures to empty lists.
pub struct NavLoader {
    filename: String,
    display: PathDisplay,
}

impl NavLoader {
    /// Create a loader for descriptors named `filename`.
    #[must_use]
    pub fn new(filename: impl Into<String>, display: PathDisplay) -> Self {
        Self {
            filename: filename.into(),
            display,
        }
    }

    /// Descriptor filename.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Descriptor path for `dir`, if one exists.
    #[must_use]
    pub fn descriptor_in(&self, dir: &Path) -> Option<PathBuf> {
        let path = dir.join(&self.filename);
        path.is_file().then_some(path)
    }

    /// Load entries from a descriptor file.
    ///
    /// Returns an empty list (and logs a warning) if the file is absent,
    /// unreadable, malformed, or has an unexpected shape.
    pub fn load(&self, path: &Path) -> Vec<NavEntry> {
        try_load(path, &self.display)
            .inspect_err(|e| {
                tracing::warn!(
                    path = %self.display.shorten(path),
                    error = %e,
                    "Failed to load nav file"
                );
            })
            .unwrap_or_default()
    }
}

/// Load entries from a descriptor file.
///
/// # Errors
///
/// Returns an error if the file can't be read, isn't valid YAML, or has an
/// unexpected top-level shape.
pub fn try_load(path: &Path, paths: &PathDisplay) -> Result<Vec<NavEntry>, NavError> {
    let content = fs::read_to_string(path)?;
    let entries = parse_nav(&content)?;
    tracing::debug!(
        path = %paths.shorten(path),
        entries = entries.len(),
        "Loaded nav file"
    );
    Ok(entries)
}

/// Parse descriptor content into entries.
///
/// Shapes are tried in order: a mapping with a `nav` list, then a bare
/// list. List items that are not mappings, and targets that are not
/// strings, are skipped.
///
/// # Errors
///
/// Returns an error for invalid YAML or an unrecognized top-level shape.
pub fn parse_nav(content: &str) -> Result<Vec<NavEntry>, NavError> {
    let value: Value = serde_yaml::from_str(content)?;
    let items = match value {
        Value::Mapping(mut mapping) => match mapping.remove(NAV_KEY) {
            Some(Value::Sequence(items)) => items,
            _ => return Err(NavError::UnexpectedShape("mapping without nav list")),
        },
        Value::Sequence(items) => items,
        other => return Err(NavError::UnexpectedShape(shape_name(&other))),
    };

    Ok(items.into_iter().flat_map(entries_from_item).collect())
}

/// Expand one list item into its `title: target` pairs, in order.
fn entries_from_item(item: Value) -> Vec<NavEntry> {
    let mapping = match item {
        Value::Mapping(mapping) => mapping,
        other => {
            tracing::debug!(item = ?other, "Skipping nav item that is not a mapping");
            return Vec::new();
        }
    };

    mapping
        .into_iter()
        .filter_map(|(key, value)| {
            let title = key_string(&key)?;
            match value {
                Value::String(target) => Some(NavEntry { title, target }),
                other => {
                    tracing::warn!(
                        title = %title,
                        found = shape_name(&other),
                        "Skipping nav entry without a path target"
                    );
                    None
                }
            }
        })
        .collect()
}

/// Render a mapping key as an entry title.
fn key_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Human-readable name of a YAML value's shape.
fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> Vec<NavEntry> {
        pairs.iter().map(|(t, p)| NavEntry::new(*t, *p)).collect()
    }

    #[test]
    fn test_parse_bare_list() {
        let nav = parse_nav("- Intro: intro.md\n- Guides: guides/\n").unwrap();
        assert_eq!(nav, entries(&[("Intro", "intro.md"), ("Guides", "guides/")]));
    }

    #[test]
    fn test_parse_wrapped_list() {
        let nav = parse_nav("nav:\n  - Intro: intro.md\n  - API: /api/\n").unwrap();
        assert_eq!(nav, entries(&[("Intro", "intro.md"), ("API", "/api/")]));
    }

    #[test]
    fn test_parse_wrapped_ignores_other_keys() {
        let nav = parse_nav("title: Section\nnav:\n  - A: a.md\n").unwrap();
        assert_eq!(nav, entries(&[("A", "a.md")]));
    }

    #[test]
    fn test_parse_keeps_order_and_duplicates() {
        let nav = parse_nav("- B: b.md\n- A: a.md\n- B: b.md\n").unwrap();
        assert_eq!(nav, entries(&[("B", "b.md"), ("A", "a.md"), ("B", "b.md")]));
    }

    #[test]
    fn test_parse_multi_key_item_in_document_order() {
        let nav = parse_nav("- Z: z.md\n  A: a.md\n").unwrap();
        assert_eq!(nav, entries(&[("Z", "z.md"), ("A", "a.md")]));
    }

    #[test]
    fn test_parse_skips_non_mapping_items_and_non_string_targets() {
        let content = "- plain.md\n- Nested:\n    - X: x.md\n- Ok: ok.md\n";
        let nav = parse_nav(content).unwrap();
        assert_eq!(nav, entries(&[("Ok", "ok.md")]));
    }

    #[test]
    fn test_parse_unexpected_shapes() {
        assert!(matches!(
            parse_nav("just a string"),
            Err(NavError::UnexpectedShape("string"))
        ));
        assert!(matches!(parse_nav(""), Err(NavError::UnexpectedShape("null"))));
        assert!(matches!(
            parse_nav("nav: not-a-list"),
            Err(NavError::UnexpectedShape(_))
        ));
        assert!(matches!(
            parse_nav("other: [a]"),
            Err(NavError::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(matches!(parse_nav("- [unclosed"), Err(NavError::Yaml(_))));
    }

    #[test]
    fn test_load_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loader = NavLoader::new(".nav.yml", PathDisplay::default());

        assert!(loader.load(&dir.path().join(".nav.yml")).is_empty());

        let bad = dir.path().join(".nav.yml");
        fs::write(&bad, "{ broken").unwrap();
        assert!(loader.load(&bad).is_empty());
    }

    #[test]
    fn test_descriptor_in() {
        let dir = tempfile::tempdir().unwrap();
        let loader = NavLoader::new(".nav.yml", PathDisplay::default());
        assert!(loader.descriptor_in(dir.path()).is_none());

        fs::write(dir.path().join(".nav.yml"), "- A: a.md\n").unwrap();
        let path = loader.descriptor_in(dir.path()).unwrap();
        assert_eq!(loader.load(&path), entries(&[("A", "a.md")]));
    }

    #[test]
    fn test_try_load_reads_entries_with_workspace_display() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        let path = docs.join(".nav.yml");
        fs::write(&path, "nav:\n  - Intro: intro.md\n").unwrap();
        let paths = PathDisplay::new(dir.path().to_path_buf(), "docs".to_owned());

        let loaded = try_load(&path, &paths).unwrap();

        assert_eq!(loaded, entries(&[("Intro", "intro.md")]));
        assert!(matches!(
            try_load(&docs.join("missing.yml"), &paths),
            Err(NavError::Io(_))
        ));
    }
}
