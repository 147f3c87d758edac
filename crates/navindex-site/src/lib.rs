//! Index page synthesis for navindex.
//!
//! This crate provides:
//! - [`SectionBuilder`]: walks navigation descriptors into Markdown sections
//! - [`IndexGenerator`]: merges generated sections with preserved manual
//!   content and writes the output file
//! - [`LandingPages`]: rewrites front-matter-only landing pages
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use navindex_config::Config;
//! use navindex_site::IndexGenerator;
//!
//! let config = Config::load(None, None)?;
//! let generator = IndexGenerator::from_config(&config);
//!
//! let report = generator.generate(Path::new("docs/cookbook"), "index.md")?;
//! println!("{} sections, {} rows", report.sections, report.rows);
//! # Ok(())
//! # }
//! ```

mod generator;
mod landing;
mod preserve;
mod sections;
mod stitch;
mod table;

use std::path::PathBuf;

use navindex_nav::PathError;

pub use generator::{GenerationReport, IndexGenerator};
pub use landing::{IN_THIS_SECTION_PLACEHOLDER, LandingPages, LandingReport, walk_directories};
pub use preserve::{extract_manual_prefix, manual_prefix_of};
pub use sections::SectionBuilder;
pub use stitch::{END_MARKER, GeneratedDocument, START_MARKER, stitch};
pub use table::{NOT_APPLICABLE, TABLE_HEADER, TABLE_SEPARATOR, TagFormatter, escape_cell, site_path};

/// Error returned when generating or writing a page fails.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A path escaped its containment root.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The target directory doesn't exist.
    #[error("Target directory not found: {}", .0.display())]
    TargetNotFound(PathBuf),

    /// An existing file couldn't be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output file couldn't be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
