//! Directory scanning for directories without a descriptor.

use std::fs;
use std::path::{Path, PathBuf};

/// List documents in `dir` with the given extension, sorted by filename.
///
/// The index file (any case) and hidden files are excluded. Returns an
/// empty Vec if the directory can't be read.
pub fn scan_documents(dir: &Path, extension: &str, index_filename: &str) -> Vec<PathBuf> {
    let mut files: Vec<(String, PathBuf)> = read_entries(dir)
        .into_iter()
        .filter(|(name, path, is_dir)| {
            !is_dir
                && path.extension().is_some_and(|e| e == extension)
                && !name.eq_ignore_ascii_case(index_filename)
        })
        .map(|(name, path, _)| (name, path))
        .collect();

    files.sort_by(|a, b| a.0.cmp(&b.0));
    files.into_iter().map(|(_, path)| path).collect()
}

/// List subdirectories of `dir` that contain a `nav_filename` descriptor,
/// sorted by directory name.
pub fn scan_nav_dirs(dir: &Path, nav_filename: &str) -> Vec<PathBuf> {
    let mut dirs: Vec<(String, PathBuf)> = read_entries(dir)
        .into_iter()
        .filter(|(_, path, is_dir)| *is_dir && path.join(nav_filename).is_file())
        .map(|(name, path, _)| (name, path))
        .collect();

    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    dirs.into_iter().map(|(_, path)| path).collect()
}

/// Read visible entries of `dir` as `(name, path, is_dir)`.
fn read_entries(dir: &Path) -> Vec<(String, PathBuf, bool)> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    entries
        .filter_map(Result::ok)
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                return None;
            }
            let path = e.path();
            let is_dir = path.is_dir();
            Some((name, path, is_dir))
        })
        .collect()
}
