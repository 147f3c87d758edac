//! Short path rendering for diagnostics.

use std::path::{Component, Path, PathBuf};

/// Renders filesystem paths relative to the docs directory for log output.
///
/// Passed explicitly to every component that logs paths. A default instance
/// has no context and renders paths unchanged.
#[derive(Clone, Debug, Default)]
pub struct PathDisplay {
    context: Option<(PathBuf, String)>,
}

impl PathDisplay {
    /// Create a display context for a workspace and its docs directory name.
    #[must_use]
    pub fn new(workspace_root: PathBuf, docs_dir: String) -> Self {
        Self {
            context: Some((workspace_root, docs_dir)),
        }
    }

    /// Shorten `path` for display.
    ///
    /// Paths under the docs directory render as `docs/sub/file.md`, other
    /// workspace paths as workspace-relative, anything else as its filename.
    #[must_use]
    pub fn shorten(&self, path: &Path) -> String {
        let Some((workspace_root, docs_dir)) = &self.context else {
            return path.display().to_string();
        };

        if let Ok(rel) = path.strip_prefix(workspace_root.join(docs_dir)) {
            return if rel.as_os_str().is_empty() {
                docs_dir.clone()
            } else {
                format!("{docs_dir}/{}", slash_joined(rel))
            };
        }

        if let Ok(rel) = path.strip_prefix(workspace_root) {
            return slash_joined(rel);
        }

        path.file_name().map_or_else(
            || path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }
}

/// Join normal components with `/` regardless of platform.
fn slash_joined(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
