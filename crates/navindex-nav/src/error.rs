//! Error types for navigation loading and path resolution.

use std::path::PathBuf;

/// Semantic categories of path resolution failures.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum PathErrorKind {
    /// Path would escape the containment root.
    Traversal,
    /// Absolute path where a relative one is required.
    Absolute,
    /// Empty input, NUL bytes, or separators in a bare filename.
    InvalidInput,
}

/// Path resolution error with the offending input and resolved location.
#[derive(Debug)]
pub struct PathError {
    /// Semantic error category.
    pub kind: PathErrorKind,
    /// Raw input as written by the user or descriptor.
    pub raw: String,
    /// Resolved location, when resolution got that far.
    pub resolved: Option<PathBuf>,
    source: Option<std::io::Error>,
}

impl PathError {
    /// Create a new path error for `raw` input.
    #[must_use]
    pub fn new(kind: PathErrorKind, raw: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
            resolved: None,
            source: None,
        }
    }

    /// Create a traversal error.
    #[must_use]
    pub fn traversal(raw: impl Into<String>) -> Self {
        Self::new(PathErrorKind::Traversal, raw)
    }

    /// Attach the resolved location.
    #[must_use]
    pub fn with_resolved(mut self, path: impl Into<PathBuf>) -> Self {
        self.resolved = Some(path.into());
        self
    }

    /// Attach the underlying I/O error.
    #[must_use]
    pub fn with_source(mut self, source: std::io::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Check if this is a containment violation.
    #[must_use]
    pub fn is_traversal(&self) -> bool {
        self.kind == PathErrorKind::Traversal
    }
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "Path traversal detected: ../x resolves outside root (path: /a/x)"
        match self.kind {
            PathErrorKind::Traversal => {
                write!(f, "Path traversal detected: {} resolves outside root", self.raw)?;
            }
            PathErrorKind::Absolute => write!(f, "Absolute paths not allowed: {}", self.raw)?,
            PathErrorKind::InvalidInput => write!(f, "Invalid path input: {:?}", self.raw)?,
        }

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.resolved {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

/// Navigation descriptor loading error.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Descriptor could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Descriptor is not valid YAML.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Descriptor is neither a list nor a mapping with a `nav` list.
    #[error("Unexpected nav structure (got {0})")]
    UnexpectedShape(&'static str),
}
