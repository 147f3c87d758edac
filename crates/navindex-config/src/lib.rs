//! Configuration management for navindex.
//!
//! Discovers the workspace (the nearest directory holding `mkdocs.yml`),
//! reads the docs directory from it, and layers an optional `navindex.toml`
//! on top. CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [docs]
//! source_dir = "docs"
//!
//! [index]
//! nav_filename = ".nav.yml"
//! output_filename = "index.md"
//! acronyms = ["API", "SDK"]
//!
//! [landing]
//! ignore_dirs = ["node_modules", "js", "images"]
//! ```

mod display;
mod mkdocs;

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use display::PathDisplay;
pub use mkdocs::{MKDOCS_FILENAME, discover_workspace, read_docs_dir};

/// Configuration filename looked up in the workspace root.
pub const CONFIG_FILENAME: &str = "navindex.toml";

/// Docs directory used when neither `mkdocs.yml` nor the config names one.
const DEFAULT_DOCS_DIR: &str = "docs";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs directory (relative to the workspace root).
    pub docs_dir: Option<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration as parsed from TOML.
    #[serde(default)]
    docs: DocsConfigRaw,
    /// Index generation settings.
    pub index: IndexConfig,
    /// Landing page settings.
    pub landing: LandingConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Workspace root (directory containing `mkdocs.yml`).
    pub workspace_root: PathBuf,
    /// Docs directory name, relative to the workspace root.
    pub docs_dir: String,
    /// Absolute docs directory.
    pub source_dir: PathBuf,
}

/// Index generation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Per-directory navigation descriptor filename.
    pub nav_filename: String,
    /// Filename of the page that represents a directory.
    pub index_filename: String,
    /// Default output filename for generated indexes.
    pub output_filename: String,
    /// Document extension, without the dot.
    pub extension: String,
    /// Directory names recognized as content roots for `/`-prefixed targets.
    pub content_roots: Vec<String>,
    /// Tag tokens rendered in their canonical spelling.
    pub acronyms: Vec<String>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            nav_filename: ".nav.yml".to_owned(),
            index_filename: "index.md".to_owned(),
            output_filename: "index.md".to_owned(),
            extension: "md".to_owned(),
            content_roots: ["docs", "polkadot-docs", "content", "src"]
                .map(str::to_owned)
                .to_vec(),
            acronyms: [
                "API", "SDK", "CLI", "AI", "ML", "CPU", "GPU", "EVM", "PVM", "NFT", "DApp",
            ]
            .map(str::to_owned)
            .to_vec(),
        }
    }
}

/// Landing page settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    /// Directory names never descended into.
    pub ignore_dirs: Vec<String>,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: ["node_modules", "js", "images"]
                .map(str::to_owned)
                .to_vec(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// No `mkdocs.yml` in the start directory or any parent.
    #[error("Could not find workspace root (no mkdocs.yml found above {})", .0.display())]
    WorkspaceNotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a filename field to be a bare name.
fn require_filename(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(ConfigError::Validation(format!(
            "{field} must be a plain filename, got {value:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration starting discovery from the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if the workspace cannot be discovered, an explicit
    /// `config_path` doesn't exist, or parsing/validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir()?;
        Self::load_from(&cwd, config_path, cli_settings)
    }

    /// Load configuration discovering the workspace upward from `start`.
    ///
    /// If `config_path` is provided, its parent directory is the workspace
    /// root. Otherwise the nearest ancestor of `start` containing
    /// `mkdocs.yml` is, and `navindex.toml` is read from it when present.
    ///
    /// CLI settings are applied after path resolution, so CLI arguments take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if the workspace cannot be discovered, an explicit
    /// `config_path` doesn't exist, or parsing/validation fails.
    pub fn load_from(
        start: &Path,
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let (workspace_root, file) = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            };
            (parent, Some(path.to_path_buf()))
        } else {
            let root = discover_workspace(start)
                .ok_or_else(|| ConfigError::WorkspaceNotFound(start.to_path_buf()))?;
            let candidate = root.join(CONFIG_FILENAME);
            let file = candidate.exists().then_some(candidate);
            (root, file)
        };

        let workspace_root = std::fs::canonicalize(&workspace_root)?;

        let mut config = match &file {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.config_path = file;
        config.resolve_paths(&workspace_root);

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Path display context for diagnostics.
    #[must_use]
    pub fn path_display(&self) -> PathDisplay {
        PathDisplay::new(
            self.docs_resolved.workspace_root.clone(),
            self.docs_resolved.docs_dir.clone(),
        )
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(docs_dir) = &settings.docs_dir {
            self.docs_resolved.docs_dir.clone_from(docs_dir);
            self.docs_resolved.source_dir = self.docs_resolved.workspace_root.join(docs_dir);
        }
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            index: IndexConfig::default(),
            landing: LandingConfig::default(),
            docs_resolved: DocsConfig {
                workspace_root: base.to_path_buf(),
                docs_dir: DEFAULT_DOCS_DIR.to_owned(),
                source_dir: base.join(DEFAULT_DOCS_DIR),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Resolve the docs directory against the workspace root.
    ///
    /// Precedence: `[docs] source_dir`, then `docs_dir` from `mkdocs.yml`,
    /// then `docs`.
    fn resolve_paths(&mut self, workspace_root: &Path) {
        let docs_dir = self
            .docs
            .source_dir
            .clone()
            .or_else(|| read_docs_dir(workspace_root))
            .unwrap_or_else(|| DEFAULT_DOCS_DIR.to_owned());

        self.docs_resolved = DocsConfig {
            workspace_root: workspace_root.to_path_buf(),
            source_dir: workspace_root.join(&docs_dir),
            docs_dir,
        };
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.docs_resolved.docs_dir, "docs.source_dir")?;
        self.validate_index()?;
        if self.landing.ignore_dirs.iter().any(|d| d.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "landing.ignore_dirs cannot contain empty names".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate index configuration.
    fn validate_index(&self) -> Result<(), ConfigError> {
        let index = &self.index;
        require_filename(&index.nav_filename, "index.nav_filename")?;
        require_filename(&index.index_filename, "index.index_filename")?;
        require_filename(&index.output_filename, "index.output_filename")?;
        require_filename(&index.extension, "index.extension")?;
        if index.extension.contains('.') {
            return Err(ConfigError::Validation(
                "index.extension must not contain a dot".to_owned(),
            ));
        }
        if index.content_roots.iter().any(|r| r.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "index.content_roots cannot contain empty names".to_owned(),
            ));
        }
        if index.acronyms.iter().any(|a| a.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "index.acronyms cannot contain empty entries".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn workspace() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MKDOCS_FILENAME), "site_name: Test\n").unwrap();
        dir
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.index.nav_filename, ".nav.yml");
        assert_eq!(config.index.output_filename, "index.md");
        assert_eq!(config.index.extension, "md");
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.landing.ignore_dirs, vec!["node_modules", "js", "images"]);
        assert!(config.index.acronyms.contains(&"DApp".to_owned()));
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.index.nav_filename, ".nav.yml");
        assert!(config.docs.source_dir.is_none());
    }

    #[test]
    fn test_parse_index_config() {
        let toml = r#"
[index]
nav_filename = "nav.yaml"
acronyms = ["HTTP", "WASM"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.index.nav_filename, "nav.yaml");
        assert_eq!(config.index.acronyms, vec!["HTTP", "WASM"]);
        // Unset fields keep defaults
        assert_eq!(config.index.output_filename, "index.md");
    }

    #[test]
    fn test_load_discovers_workspace_from_subdirectory() {
        let ws = workspace();
        let nested = ws.path().join("docs/guides");
        fs::create_dir_all(&nested).unwrap();

        let config = Config::load_from(&nested, None, None).unwrap();

        let root = fs::canonicalize(ws.path()).unwrap();
        assert_eq!(config.docs_resolved.workspace_root, root);
        assert_eq!(config.docs_resolved.source_dir, root.join("docs"));
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_load_without_workspace_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(dir.path(), None, None);
        assert!(matches!(result, Err(ConfigError::WorkspaceNotFound(_))));
    }

    #[test]
    fn test_load_reads_docs_dir_from_mkdocs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MKDOCS_FILENAME),
            "site_name: Test\ndocs_dir: 'polkadot-docs'\n",
        )
        .unwrap();

        let config = Config::load_from(dir.path(), None, None).unwrap();

        assert_eq!(config.docs_resolved.docs_dir, "polkadot-docs");
    }

    #[test]
    fn test_config_file_overrides_mkdocs_docs_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MKDOCS_FILENAME), "docs_dir: site-docs\n").unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[docs]\nsource_dir = \"content\"\n",
        )
        .unwrap();

        let config = Config::load_from(dir.path(), None, None).unwrap();

        assert_eq!(config.docs_resolved.docs_dir, "content");
        assert!(config.config_path.is_some());
    }

    #[test]
    fn test_explicit_config_path_sets_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("custom.toml");
        fs::write(&config_path, "[index]\noutput_filename = \"summary.md\"\n").unwrap();

        let elsewhere = tempfile::tempdir().unwrap();
        let config = Config::load_from(elsewhere.path(), Some(&config_path), None).unwrap();

        assert_eq!(
            config.docs_resolved.workspace_root,
            fs::canonicalize(dir.path()).unwrap()
        );
        assert_eq!(config.index.output_filename, "summary.md");
    }

    #[test]
    fn test_explicit_config_path_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let result = Config::load_from(dir.path(), Some(&missing), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_apply_cli_settings_docs_dir() {
        let ws = workspace();
        let settings = CliSettings {
            docs_dir: Some("content".to_owned()),
        };

        let config = Config::load_from(ws.path(), None, Some(&settings)).unwrap();

        let root = fs::canonicalize(ws.path()).unwrap();
        assert_eq!(config.docs_resolved.docs_dir, "content");
        assert_eq!(config.docs_resolved.source_dir, root.join("content"));
    }

    #[test]
    fn test_validate_rejects_nav_filename_with_separator() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.index.nav_filename = "nav/.nav.yml".to_owned();

        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("index.nav_filename"));
    }

    #[test]
    fn test_validate_rejects_dotted_extension() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.index.extension = ".md".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_acronym() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.index.acronyms.push("  ".to_owned());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_path_display_from_config() {
        let config = Config::default_with_base(Path::new("/ws"));
        let display = config.path_display();
        assert_eq!(display.shorten(Path::new("/ws/docs/a/b.md")), "docs/a/b.md");
    }
}
