//! Front matter metadata extraction for navindex.
//!
//! Reads the fenced YAML header at the top of a Markdown document and
//! reduces it to a [`DocumentMetadata`] record (title, tags, summary).
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use navindex_config::PathDisplay;
//! use navindex_meta::MetadataExtractor;
//!
//! let extractor = MetadataExtractor::new(PathDisplay::default());
//! let meta = extractor.extract(Path::new("docs/guides/intro.md"));
//! if meta.is_listable() {
//!     println!("{}: {}", meta.title, meta.summary);
//! }
//! ```

mod extractor;
mod front_matter;

pub use extractor::{MetadataExtractor, parse_document};
pub use front_matter::{FENCE, FrontMatter, split_front_matter};

/// Metadata derived from a document's front matter.
///
/// Fields are trimmed strings; a missing key is an empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    /// Document title (`title`).
    pub title: String,
    /// Comma-joined tag list (`tags`, or `tools`).
    pub tags: String,
    /// One-line summary (`description`, or `summary`).
    pub summary: String,
}

impl DocumentMetadata {
    /// Check if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.tags.is_empty() && self.summary.is_empty()
    }

    /// Check if the document may appear in a generated table.
    ///
    /// Requires both a title and a summary; tags are optional.
    #[must_use]
    pub fn is_listable(&self) -> bool {
        !self.title.is_empty() && !self.summary.is_empty()
    }
}

/// Error type for metadata extraction.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    /// File could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Front matter is not valid YAML.
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Front matter parsed, but is not a key/value mapping.
    #[error("Front matter is not a mapping")]
    NotAMapping,
}
