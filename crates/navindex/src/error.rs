//! CLI error types.

use std::path::PathBuf;

use navindex_config::ConfigError;
use navindex_nav::PathError;
use navindex_site::GenerateError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    Path(#[from] PathError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{} is out of date; run `navindex generate` to update it", .0.display())]
    Stale(PathBuf),

    #[error("{0}")]
    Validation(String),
}
