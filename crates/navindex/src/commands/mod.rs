//! CLI command implementations.

pub(crate) mod copy_md;
pub(crate) mod generate;
pub(crate) mod landing;

use std::path::{Path, PathBuf};

use navindex_config::{CliSettings, Config};
use navindex_nav::{ensure_within, sanitize_input};

pub(crate) use copy_md::CopyMdArgs;
pub(crate) use generate::GenerateArgs;
pub(crate) use landing::LandingArgs;

use crate::error::CliError;

/// Load configuration and locate the content (docs) directory.
///
/// The content directory must exist and lie inside the workspace.
pub(crate) fn load_content_dir(
    config_path: Option<&Path>,
    docs_dir: Option<String>,
) -> Result<(Config, PathBuf), CliError> {
    let docs_dir = docs_dir
        .map(|d| sanitize_input(&d, true))
        .transpose()?;
    let cli_settings = CliSettings { docs_dir };
    let config = Config::load(config_path, Some(&cli_settings))?;

    let workspace = &config.docs_resolved.workspace_root;
    let content_dir = ensure_within(&config.docs_resolved.source_dir, workspace)?.into_path_buf();
    if !content_dir.is_dir() {
        return Err(CliError::Validation(format!(
            "Content directory not found: {}",
            content_dir.display()
        )));
    }

    Ok((config, content_dir))
}

/// Resolve a sanitized path argument inside `root`.
pub(crate) fn path_within(root: &Path, raw: &str) -> Result<PathBuf, CliError> {
    let relative = sanitize_input(raw, true)?;
    Ok(ensure_within(&root.join(relative), root)?.into_path_buf())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_path_within_accepts_nested_target() {
        let dir = tempfile::tempdir().unwrap();
        let root = std::fs::canonicalize(dir.path()).unwrap();

        let path = path_within(&root, "smart-contracts/cookbook").unwrap();

        assert_eq!(path, root.join("smart-contracts/cookbook"));
    }

    #[test]
    fn test_path_within_rejects_escapes() {
        let dir = tempfile::tempdir().unwrap();
        let root = std::fs::canonicalize(dir.path()).unwrap();

        for raw in ["../outside", "a/../../b", "/etc", "", "\0"] {
            assert!(
                matches!(path_within(&root, raw), Err(CliError::Path(_))),
                "accepted {raw:?}"
            );
        }
    }
}
