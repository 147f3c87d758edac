//! Contained path resolution for navigation targets.
//!
//! Every path the engine reads or writes goes through [`PathResolver`]. A
//! target is joined, lexically normalized, and checked against the root
//! before the filesystem is consulted; existing paths are then
//! canonicalized and checked again so symlinks cannot lead outside.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{PathError, PathErrorKind};

/// A filesystem path verified to lie inside the resolver's root.
///
/// Only [`PathResolver`] constructs values of this type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPath(PathBuf);

impl ResolvedPath {
    /// Borrow the underlying path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Consume into the underlying path.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Resolves navigation targets against a containment root.
///
/// Targets starting with `/` resolve against the content root: the nearest
/// ancestor of the base directory whose name is one of the configured
/// content-root names, falling back to the containment root. Other targets
/// resolve relative to the base directory.
#[derive(Clone, Debug)]
pub struct PathResolver {
    /// Lexically normalized containment root.
    root: PathBuf,
    /// Canonical containment root (symlinks resolved).
    canonical_root: PathBuf,
    /// Directory names that mark a content root.
    content_roots: Vec<String>,
    /// Filename of the page representing its directory.
    index_filename: String,
}

impl PathResolver {
    /// Create a resolver contained in `root`.
    ///
    /// Uses the default content-root names and `index.md`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        let root = normalize(&root);
        let canonical_root = fs::canonicalize(&root).unwrap_or_else(|_| root.clone());
        Self {
            root,
            canonical_root,
            content_roots: ["docs", "polkadot-docs", "content", "src"]
                .map(str::to_owned)
                .to_vec(),
            index_filename: "index.md".to_owned(),
        }
    }

    /// Replace the content-root directory names.
    #[must_use]
    pub fn with_content_roots(mut self, names: Vec<String>) -> Self {
        self.content_roots = names;
        self
    }

    /// Replace the index filename.
    #[must_use]
    pub fn with_index_filename(mut self, name: impl Into<String>) -> Self {
        self.index_filename = name.into();
        self
    }

    /// Containment root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a raw navigation target relative to `base`.
    ///
    /// # Errors
    ///
    /// Returns [`PathErrorKind::Traversal`] if the target resolves outside the
    /// root, and [`PathErrorKind::InvalidInput`] for empty or NUL-bearing
    /// targets.
    pub fn resolve(&self, base: &Path, raw: &str) -> Result<ResolvedPath, PathError> {
        if raw.trim().is_empty() || raw.contains('\0') {
            return Err(PathError::new(PathErrorKind::InvalidInput, raw));
        }

        let joined = match raw.strip_prefix('/') {
            Some(rooted) => self
                .content_root_for(base)
                .join(rooted.trim_start_matches('/')),
            None => base.join(raw),
        };

        self.contain(&joined).map_err(|mut e| {
            e.raw = raw.to_owned();
            e
        })
    }

    /// Verify that an already-built path lies inside the root.
    ///
    /// # Errors
    ///
    /// Returns [`PathErrorKind::Traversal`] if the path, or the target of any
    /// symlink along it, lies outside the root.
    pub fn contain(&self, path: &Path) -> Result<ResolvedPath, PathError> {
        let raw = || path.display().to_string();
        let normalized = normalize(path);
        if !normalized.starts_with(&self.root) {
            return Err(PathError::traversal(raw()).with_resolved(normalized));
        }

        if fs::symlink_metadata(&normalized).is_err() {
            return Ok(ResolvedPath(normalized));
        }

        let canonical = fs::canonicalize(&normalized)
            .map_err(|e| PathError::traversal(raw()).with_source(e))?;
        if !canonical.starts_with(&self.canonical_root) {
            return Err(PathError::traversal(raw()).with_resolved(canonical));
        }

        // Keep the lexical form when the root itself is reached through a symlink.
        if canonical.starts_with(&self.root) {
            Ok(ResolvedPath(canonical))
        } else {
            Ok(ResolvedPath(normalized))
        }
    }

    /// Find the content root governing `base`.
    ///
    /// Walks upward from `base` to the root looking for a directory named
    /// like a content root; falls back to the containment root.
    #[must_use]
    pub fn content_root_for(&self, base: &Path) -> PathBuf {
        let mut current = normalize(base);
        while current.starts_with(&self.root) && current != self.root {
            let is_content_root = current.file_name().is_some_and(|name| {
                self.content_roots
                    .iter()
                    .any(|root| name.to_string_lossy() == root.as_str())
            });
            if is_content_root {
                return current;
            }
            if !current.pop() {
                break;
            }
        }
        self.root.clone()
    }

    /// Check if a target names the index page (any case).
    ///
    /// Index entries stand for the containing page and are never listed.
    #[must_use]
    pub fn is_index_target(&self, raw: &str) -> bool {
        Path::new(raw.trim_end_matches('/'))
            .file_name()
            .is_some_and(|name| name.to_string_lossy().eq_ignore_ascii_case(&self.index_filename))
    }
}

/// Check that `path` lies inside `root`.
///
/// One-off form of [`PathResolver::contain`] for paths supplied outside a
/// navigation tree, such as CLI arguments.
///
/// # Errors
///
/// Returns [`PathErrorKind::Traversal`] if `path` escapes `root`.
pub fn ensure_within(path: &Path, root: &Path) -> Result<ResolvedPath, PathError> {
    PathResolver::new(root.to_path_buf()).contain(path)
}

/// Lexically normalize a path, collapsing `.` and `..` components.
///
/// `..` never climbs above the filesystem root; for relative paths,
/// leading `..` components are preserved.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

/// Sanitize a user-supplied relative path or filename.
///
/// Removes NUL bytes and surrounding whitespace, then rejects traversal
/// sequences, absolute or UNC paths, and (when `allow_separators` is false)
/// any directory separator.
///
/// # Errors
///
/// Returns a [`PathError`] describing the rejected input.
pub fn sanitize_input(input: &str, allow_separators: bool) -> Result<String, PathError> {
    let sanitized = input.replace('\0', "");
    let sanitized = sanitized.trim();
    if sanitized.is_empty() {
        return Err(PathError::new(PathErrorKind::InvalidInput, input));
    }

    let normalized = normalize(Path::new(sanitized));
    let escapes = normalized.as_os_str().is_empty()
        || normalized
            .components()
            .any(|c| matches!(c, Component::ParentDir));
    if escapes {
        return Err(PathError::traversal(sanitized).with_resolved(normalized));
    }

    if sanitized.starts_with(['/', '\\']) || Path::new(sanitized).is_absolute() {
        return Err(PathError::new(PathErrorKind::Absolute, sanitized));
    }

    if !allow_separators && sanitized.contains(['/', '\\']) {
        return Err(PathError::new(PathErrorKind::InvalidInput, sanitized));
    }

    Ok(sanitized.to_owned())
}
