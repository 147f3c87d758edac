//! `navindex copy-md` command implementation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Args;
use navindex_config::Config;

use super::path_within;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the copy-md command.
#[derive(Args)]
pub(crate) struct CopyMdArgs {
    /// Source directory of raw Markdown, relative to the workspace.
    source: String,

    /// Target directory, relative to the workspace (replaced if present).
    target: String,

    /// Path to configuration file (default: auto-discover navindex.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CopyMdArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), None)?;
        let workspace = &config.docs_resolved.workspace_root;
        let source = path_within(workspace, &self.source)?;
        let target = path_within(workspace, &self.target)?;

        if !source.is_dir() {
            output.warning(&format!(
                "Source directory '{}' not found; skipping",
                self.source
            ));
            return Ok(());
        }
        if target.starts_with(&source) || source.starts_with(&target) {
            return Err(CliError::Validation(
                "Source and target directories must not contain each other".to_owned(),
            ));
        }

        let copied = copy_tree(&source, &target)?;
        output.success(&format!(
            "Copied {copied} files from '{}' to '{}'",
            self.source, self.target
        ));
        Ok(())
    }
}

/// Replace `target` with a copy of `source`, returning the number of files copied.
///
/// Symlinks are skipped.
fn copy_tree(source: &Path, target: &Path) -> io::Result<usize> {
    if let Ok(meta) = fs::symlink_metadata(target) {
        if meta.is_dir() {
            fs::remove_dir_all(target)?;
        } else {
            fs::remove_file(target)?;
        }
    }

    let mut copied = 0;
    let mut pending = vec![(source.to_path_buf(), target.to_path_buf())];
    while let Some((from, to)) = pending.pop() {
        fs::create_dir_all(&to)?;
        for entry in fs::read_dir(&from)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let dest = to.join(entry.file_name());
            if file_type.is_dir() {
                pending.push((entry.path(), dest));
            } else if file_type.is_file() {
                fs::copy(entry.path(), &dest)?;
                copied += 1;
            } else {
                tracing::debug!(path = %entry.path().display(), "Skipping symlink");
            }
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_copy_tree_copies_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("raw");
        write(&source.join("index.md"), "# Index");
        write(&source.join("guides/one.md"), "# One");
        write(&source.join("guides/deep/two.md"), "# Two");

        let target = dir.path().join("site/raw");
        let copied = copy_tree(&source, &target).unwrap();

        assert_eq!(copied, 3);
        assert_eq!(
            fs::read_to_string(target.join("guides/deep/two.md")).unwrap(),
            "# Two"
        );
    }

    #[test]
    fn test_copy_tree_replaces_stale_target() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("raw");
        write(&source.join("fresh.md"), "fresh");
        let target = dir.path().join("out");
        write(&target.join("stale.md"), "stale");

        copy_tree(&source, &target).unwrap();

        assert!(target.join("fresh.md").exists());
        assert!(!target.join("stale.md").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_tree_skips_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        write(&outside.path().join("secret.md"), "secret");
        let source = dir.path().join("raw");
        write(&source.join("page.md"), "page");
        std::os::unix::fs::symlink(outside.path(), source.join("escape")).unwrap();

        let target = dir.path().join("out");
        let copied = copy_tree(&source, &target).unwrap();

        assert_eq!(copied, 1);
        assert!(!target.join("escape").exists());
    }
}
