//! Navigation loading and path resolution for navindex.
//!
//! This crate provides:
//!
//! - [`PathResolver`]: turns navigation targets into [`ResolvedPath`]s that
//!   are guaranteed to stay inside a containment root
//! - [`NavLoader`]: reads per-directory `.nav.yml` descriptors into ordered
//!   [`NavEntry`] lists
//! - [`scan_documents`] / [`scan_nav_dirs`]: directory scans used when a
//!   directory has no descriptor
//!
//! # Example
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//! use navindex_config::PathDisplay;
//! use navindex_nav::{NavLoader, PathResolver};
//!
//! let resolver = PathResolver::new(PathBuf::from("/site"));
//! let loader = NavLoader::new(".nav.yml", PathDisplay::default());
//! let base = Path::new("/site/docs/guides");
//! for entry in loader.load(&base.join(".nav.yml")) {
//!     match resolver.resolve(base, &entry.target) {
//!         Ok(path) => println!("{} -> {}", entry.title, path.as_path().display()),
//!         Err(e) => eprintln!("skipping {}: {e}", entry.title),
//!     }
//! }
//! ```

mod error;
mod loader;
mod resolver;
mod scan;

pub use error::{NavError, PathError, PathErrorKind};
pub use loader::{NavLoader, parse_nav, try_load};
pub use resolver::{PathResolver, ResolvedPath, ensure_within, normalize, sanitize_input};
pub use scan::{scan_documents, scan_nav_dirs};

/// One titled reference from a navigation descriptor.
///
/// `target` is an opaque path string interpreted by [`PathResolver`].
/// Order is significant and duplicates are permitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavEntry {
    /// Display title (the mapping key).
    pub title: String,
    /// Raw target path (the mapping value).
    pub target: String,
}

impl NavEntry {
    /// Create a navigation entry.
    #[must_use]
    pub fn new(title: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            target: target.into(),
        }
    }
}

/// Convert a slug (kebab-case or `snake_case`) to title case.
///
/// Replaces `-` and `_` with spaces, then capitalizes the first letter of each word.
///
/// # Examples
///
/// ```
/// use navindex_nav::title_from_slug;
///
/// assert_eq!(title_from_slug("setup-guide"), "Setup Guide");
/// assert_eq!(title_from_slug("my_page"), "My Page");
/// ```
#[must_use]
pub fn title_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        capitalize_first_into(word, &mut result);
    }
    result
}

/// Capitalize the first character of a word, appending to `buf`.
fn capitalize_first_into(word: &str, buf: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        buf.extend(first.to_uppercase());
        buf.push_str(chars.as_str());
    }
}
