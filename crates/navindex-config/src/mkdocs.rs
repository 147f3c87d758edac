//! Workspace discovery via `mkdocs.yml`.
//!
//! MkDocs configs routinely carry custom YAML tags (`!!python/name:...`)
//! that a strict YAML parser rejects, so `docs_dir` is read by scanning
//! lines instead of deserializing the whole file.

use std::fs;
use std::path::{Path, PathBuf};

/// Marker file identifying the workspace root.
pub const MKDOCS_FILENAME: &str = "mkdocs.yml";

/// Find the nearest directory at or above `start` containing `mkdocs.yml`.
pub fn discover_workspace(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(MKDOCS_FILENAME).exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Read `docs_dir` from the workspace's `mkdocs.yml`.
///
/// Returns `None` if the file is unreadable or has no top-level `docs_dir`.
pub fn read_docs_dir(workspace_root: &Path) -> Option<String> {
    let path = workspace_root.join(MKDOCS_FILENAME);
    let content = fs::read_to_string(&path)
        .inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read mkdocs config");
        })
        .ok()?;

    let docs_dir = parse_docs_dir(&content);
    match &docs_dir {
        Some(dir) => tracing::info!(docs_dir = %dir, "Found docs_dir in mkdocs.yml"),
        None => tracing::info!("No docs_dir in mkdocs.yml, defaulting to 'docs'"),
    }
    docs_dir
}

/// Extract the `docs_dir` value from mkdocs.yml text.
fn parse_docs_dir(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let value = line.strip_prefix("docs_dir:")?;
        let value = value.split_once(" #").map_or(value, |(v, _)| v);
        let value = value.trim().trim_matches(['\'', '"']);
        (!value.is_empty()).then(|| value.to_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_docs_dir_plain() {
        assert_eq!(
            parse_docs_dir("site_name: X\ndocs_dir: content\n"),
            Some("content".to_owned())
        );
    }

    #[test]
    fn test_parse_docs_dir_quoted() {
        assert_eq!(
            parse_docs_dir("docs_dir: \"polkadot-docs\""),
            Some("polkadot-docs".to_owned())
        );
        assert_eq!(parse_docs_dir("docs_dir: 'src'"), Some("src".to_owned()));
    }

    #[test]
    fn test_parse_docs_dir_ignores_comments_and_nested_keys() {
        let content = "# docs_dir: wrong\nplugins:\n  docs_dir: nested\n";
        assert_eq!(parse_docs_dir(content), None);
    }

    #[test]
    fn test_parse_docs_dir_strips_inline_comment() {
        assert_eq!(
            parse_docs_dir("docs_dir: docs-src # where pages live"),
            Some("docs-src".to_owned())
        );
    }

    #[test]
    fn test_parse_docs_dir_tolerates_custom_tags() {
        let content = "markdown_extensions:\n  - pymdownx.emoji:\n      emoji_index: !!python/name:material.extensions.emoji.twemoji\ndocs_dir: docs\n";
        assert_eq!(parse_docs_dir(content), Some("docs".to_owned()));
    }

    #[test]
    fn test_discover_workspace_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MKDOCS_FILENAME), "").unwrap();
        let nested = dir.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(discover_workspace(&nested), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_read_docs_dir_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_docs_dir(dir.path()), None);
    }
}
