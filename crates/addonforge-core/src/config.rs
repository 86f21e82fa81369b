//! Build configuration
//!
//! A `BuildConfig` is assembled once at startup (defaults, then an optional
//! `addonforge.yaml`, then command line overrides) and handed to the
//! [`RepositoryBuilder`](crate::builder::RepositoryBuilder).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result};

/// Name of the optional configuration file looked up in the publish directory
pub const CONFIG_FILE: &str = "addonforge.yaml";

/// Directory name prefixes recognized as add-on packages
pub const DEFAULT_PREFIXES: &[&str] = &["plugin.video.", "repository.", "script.module."];

/// File name suffixes never packed into an archive
pub const DEFAULT_EXCLUDED_SUFFIXES: &[&str] = &[".pyo", ".pyc", "Thumbs.db", ".DS_Store"];

/// Settings for one repository build
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildConfig {
    /// Where archives, `addons.xml` and `addons.xml.md5` are written
    #[serde(skip)]
    pub publish_dir: PathBuf,

    /// Directory scanned for packages (defaults to the parent of `publish_dir`)
    pub sources_dir: Option<PathBuf>,

    /// Package directory name prefixes
    pub prefixes: Vec<String>,

    /// File name suffixes excluded from archives
    pub excluded_suffixes: Vec<String>,

    /// Treat every output as changed and rewrite it
    pub force_replace: bool,

    /// Sort package ids instead of keeping directory listing order
    pub sort_packages: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            publish_dir: PathBuf::from("."),
            sources_dir: None,
            prefixes: DEFAULT_PREFIXES.iter().map(|s| s.to_string()).collect(),
            excluded_suffixes: DEFAULT_EXCLUDED_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            force_replace: false,
            sort_packages: true,
        }
    }
}

impl BuildConfig {
    /// Default configuration publishing into `publish_dir`
    pub fn for_publish_dir(publish_dir: impl Into<PathBuf>) -> Self {
        Self {
            publish_dir: publish_dir.into(),
            ..Self::default()
        }
    }

    /// Load `addonforge.yaml` from the publish directory if it exists
    pub fn load(publish_dir: &Path) -> Result<Self> {
        let path = publish_dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.publish_dir = publish_dir.to_path_buf();
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Relative `sourcesDir` values are resolved against the file's directory.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yaml::from_str(&content)?;

        if let (Some(sources), Some(base)) = (&config.sources_dir, path.parent()) {
            if sources.is_relative() {
                config.sources_dir = Some(base.join(sources));
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make discovery or filtering meaningless
    pub fn validate(&self) -> Result<()> {
        if self.prefixes.is_empty() {
            return Err(BuildError::InvalidConfig {
                message: "at least one package prefix is required".to_string(),
            });
        }
        if self.prefixes.iter().any(|p| p.is_empty()) {
            return Err(BuildError::InvalidConfig {
                message: "package prefixes must not be empty".to_string(),
            });
        }
        if self.excluded_suffixes.iter().any(|s| s.is_empty()) {
            return Err(BuildError::InvalidConfig {
                message: "excluded suffixes must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Directory scanned for packages
    ///
    /// Falls back to the parent of the publish directory, resolved to an
    /// absolute path (symlinks followed when it exists).
    pub fn resolve_sources_dir(&self) -> Result<PathBuf> {
        if let Some(sources) = &self.sources_dir {
            return Ok(sources.clone());
        }

        let publish = std::fs::canonicalize(&self.publish_dir)
            .or_else(|_| std::path::absolute(&self.publish_dir))?;
        publish
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| BuildError::InvalidConfig {
                message: format!(
                    "publish directory {} has no parent to scan for packages",
                    publish.display()
                ),
            })
    }

    /// Whether a directory name carries one of the recognized prefixes
    pub fn is_package_name(&self, name: &str) -> bool {
        self.prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }

    /// Whether a file name must be left out of archives
    pub fn is_excluded_file(&self, name: &str) -> bool {
        self.excluded_suffixes
            .iter()
            .any(|s| name.ends_with(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert!(config.is_package_name("plugin.video.foo"));
        assert!(config.is_package_name("repository.example"));
        assert!(config.is_package_name("script.module.requests"));
        assert!(!config.is_package_name("unrelated.dir"));
        assert!(!config.is_package_name("plugin.audio.foo"));
        assert!(!config.force_replace);
        assert!(config.sort_packages);
    }

    #[test]
    fn test_excluded_files() {
        let config = BuildConfig::default();
        assert!(config.is_excluded_file("default.pyc"));
        assert!(config.is_excluded_file("default.pyo"));
        assert!(config.is_excluded_file("Thumbs.db"));
        assert!(config.is_excluded_file(".DS_Store"));
        assert!(!config.is_excluded_file("default.py"));
        assert!(!config.is_excluded_file("addon.xml"));
    }

    #[test]
    fn test_load_from_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "prefixes:\n  - plugin.audio.\nforceReplace: true\nsortPackages: false\nsourcesDir: ../addons\n",
        )
        .unwrap();

        let config = BuildConfig::load_from(&path).unwrap();
        assert_eq!(config.prefixes, vec!["plugin.audio.".to_string()]);
        assert!(config.force_replace);
        assert!(!config.sort_packages);
        assert_eq!(config.sources_dir, Some(temp.path().join("../addons")));
        // Unspecified keys keep their defaults
        assert_eq!(config.excluded_suffixes.len(), DEFAULT_EXCLUDED_SUFFIXES.len());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = BuildConfig::load(temp.path()).unwrap();
        assert_eq!(config.publish_dir, temp.path());
        assert_eq!(config.prefixes.len(), DEFAULT_PREFIXES.len());
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let config = BuildConfig {
            prefixes: vec![String::new()],
            ..BuildConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BuildError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_sources_dir_defaults_to_parent() {
        let temp = TempDir::new().unwrap();
        let publish = temp.path().join("repo");
        let config = BuildConfig::for_publish_dir(&publish);
        assert_eq!(config.resolve_sources_dir().unwrap(), temp.path());
    }
}
