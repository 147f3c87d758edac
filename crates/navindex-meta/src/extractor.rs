//! Metadata extraction from document files.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use navindex_config::PathDisplay;
use serde_yaml::{Mapping, Value};

use crate::front_matter::split_front_matter;
use crate::{DocumentMetadata, MetaError};

/// UTF-8 byte order mark.
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads document files and extracts their front matter metadata.
///
/// Extraction is never fatal: [`extract`](Self::extract) degrades any read or
/// parse failure to empty metadata and logs a warning.
pub struct MetadataExtractor {
    display: PathDisplay,
}

impl MetadataExtractor {
    /// Create an extractor that logs paths through `display`.
    #[must_use]
    pub fn new(display: PathDisplay) -> Self {
        Self { display }
    }

    /// Extract metadata, returning an empty record on any failure.
    pub fn extract(&self, path: &Path) -> DocumentMetadata {
        self.try_extract(path).unwrap_or_else(|e| {
            tracing::warn!(
                path = %self.display.shorten(path),
                error = %e,
                "Error reading front matter"
            );
            DocumentMetadata::default()
        })
    }

    /// Extract metadata from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or its front matter is
    /// malformed.
    pub fn try_extract(&self, path: &Path) -> Result<DocumentMetadata, MetaError> {
        let bytes = fs::read(path)?;
        parse_document(&bytes)
    }
}

/// Parse metadata from raw document bytes.
///
/// A document without a complete front matter block yields empty metadata.
///
/// # Errors
///
/// Returns an error if the front matter is not valid YAML or not a mapping.
pub fn parse_document(bytes: &[u8]) -> Result<DocumentMetadata, MetaError> {
    let text = decode(bytes);
    let Some(front_matter) = split_front_matter(&text) else {
        return Ok(DocumentMetadata::default());
    };
    if front_matter.yaml.trim().is_empty() {
        return Ok(DocumentMetadata::default());
    }

    match serde_yaml::from_str::<Value>(front_matter.yaml)? {
        Value::Null => Ok(DocumentMetadata::default()),
        Value::Mapping(mapping) => Ok(from_mapping(&mapping)),
        _ => Err(MetaError::NotAMapping),
    }
}

/// Decode bytes as UTF-8, dropping a leading BOM and replacing invalid sequences.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes.strip_prefix(BOM).unwrap_or(bytes))
}

/// Build metadata from a parsed front matter mapping.
fn from_mapping(mapping: &Mapping) -> DocumentMetadata {
    let field = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| mapping.get(*key).filter(|v| !v.is_null()))
    };

    DocumentMetadata {
        title: field(&["title"]).map(scalar_string).unwrap_or_default(),
        tags: field(&["tags", "tools"]).map(tags_string).unwrap_or_default(),
        summary: field(&["description", "summary"])
            .map(scalar_string)
            .unwrap_or_default(),
    }
}

/// Stringify a scalar value; non-scalars yield an empty string.
fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => String::new(),
    }
}

/// Flatten a tag list into a comma-joined string.
fn tags_string(value: &Value) -> String {
    match value {
        Value::Sequence(items) => items
            .iter()
            .map(scalar_string)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar_string(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> DocumentMetadata {
        parse_document(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_all_fields() {
        let meta = parse("---\ntitle: First Guide\ndescription: A short guide\ntags: api, rust\n---\n# Body");
        assert_eq!(meta.title, "First Guide");
        assert_eq!(meta.summary, "A short guide");
        assert_eq!(meta.tags, "api, rust");
    }

    #[test]
    fn test_parse_tag_list_is_flattened() {
        let meta = parse("---\ntitle: T\ntags:\n  - api\n  - SDK\n  - 3\n---\n");
        assert_eq!(meta.tags, "api, SDK, 3");
    }

    #[test]
    fn test_parse_aliases() {
        let meta = parse("---\ntitle: T\nsummary: S\ntools: hardhat\n---\n");
        assert_eq!(meta.summary, "S");
        assert_eq!(meta.tags, "hardhat");
    }

    #[test]
    fn test_parse_description_preferred_over_summary() {
        let meta = parse("---\ndescription: D\nsummary: S\n---\n");
        assert_eq!(meta.summary, "D");
    }

    #[test]
    fn test_parse_scalars_are_stringified_and_trimmed() {
        let meta = parse("---\ntitle: 42\ndescription: \"  padded  \"\n---\n");
        assert_eq!(meta.title, "42");
        assert_eq!(meta.summary, "padded");
    }

    #[test]
    fn test_parse_block_scalar_keeps_newlines() {
        let meta = parse("---\ntitle: T\ndescription: |\n  line one\n  line two\n---\n");
        assert_eq!(meta.summary, "line one\nline two");
    }

    #[test]
    fn test_parse_strips_bom() {
        let mut bytes = BOM.to_vec();
        bytes.extend_from_slice(b"---\ntitle: BOM\n---\n");
        let meta = parse_document(&bytes).unwrap();
        assert_eq!(meta.title, "BOM");
    }

    #[test]
    fn test_parse_invalid_utf8_is_replaced() {
        let bytes = b"---\ntitle: Caf\xE9\ndescription: ok\n---\n";
        let meta = parse_document(bytes).unwrap();
        assert_eq!(meta.title, "Caf\u{FFFD}");
        assert_eq!(meta.summary, "ok");
    }

    #[test]
    fn test_parse_without_front_matter() {
        assert!(parse("# Just a heading\n").is_empty());
    }

    #[test]
    fn test_parse_unclosed_front_matter() {
        assert!(parse("---\ntitle: Dangling\n").is_empty());
    }

    #[test]
    fn test_parse_empty_front_matter() {
        assert!(parse("---\n---\ncontent").is_empty());
    }

    #[test]
    fn test_parse_null_values_are_empty() {
        let meta = parse("---\ntitle:\ndescription: ~\n---\n");
        assert!(meta.is_empty());
    }

    #[test]
    fn test_parse_invalid_yaml_is_error() {
        let result = parse_document(b"---\ntitle: [unterminated\n---\n");
        assert!(matches!(result, Err(MetaError::Yaml(_))));
    }

    #[test]
    fn test_parse_non_mapping_is_error() {
        let result = parse_document(b"---\n- a\n- b\n---\n");
        assert!(matches!(result, Err(MetaError::NotAMapping)));
    }

    #[test]
    fn test_extract_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.md");
        fs::write(&bad, "---\ntitle: [oops\n---\n").unwrap();

        let extractor = MetadataExtractor::new(PathDisplay::default());

        assert!(extractor.extract(&bad).is_empty());
        assert!(extractor.extract(&dir.path().join("missing.md")).is_empty());
    }

    #[test]
    fn test_extract_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guide.md");
        fs::write(&path, "---\ntitle: Guide\ndescription: How to\n---\n").unwrap();

        let extractor = MetadataExtractor::new(PathDisplay::default());
        let meta = extractor.extract(&path);

        assert!(meta.is_listable());
        assert_eq!(meta.title, "Guide");
    }
}
