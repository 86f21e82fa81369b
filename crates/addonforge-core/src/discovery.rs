//! Package discovery

use std::path::Path;

use crate::config::BuildConfig;
use crate::error::{BuildError, Result};

/// List package directories in `sources_dir`
///
/// Keeps immediate subdirectories whose name carries a recognized prefix.
/// The publish directory is never returned, even when its name matches.
/// Ids are sorted when `sort_packages` is set, otherwise they keep the
/// order the filesystem lists them in.
pub fn discover(sources_dir: &Path, config: &BuildConfig) -> Result<Vec<String>> {
    if !sources_dir.is_dir() {
        return Err(BuildError::SourcesNotFound {
            path: sources_dir.display().to_string(),
        });
    }

    let publish_dir = std::fs::canonicalize(&config.publish_dir).ok();
    let mut packages = Vec::new();

    for entry in std::fs::read_dir(sources_dir)? {
        let entry = entry?;
        let path = entry.path();

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::debug!("Skipping non UTF-8 entry {}", path.display());
            continue;
        };

        if !config.is_package_name(&name) || !path.is_dir() {
            continue;
        }

        if publish_dir.is_some() && std::fs::canonicalize(&path).ok() == publish_dir {
            tracing::debug!("Skipping publish directory {}", path.display());
            continue;
        }

        packages.push(name);
    }

    if config.sort_packages {
        packages.sort();
    }

    tracing::debug!(
        "Discovered {} package(s) in {}",
        packages.len(),
        sources_dir.display()
    );

    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_filters_by_prefix() {
        let temp = TempDir::new().unwrap();
        for dir in [
            "plugin.video.foo",
            "script.module.bar",
            "repository.example",
            "unrelated.dir",
            "plugin.audio.baz",
        ] {
            std::fs::create_dir_all(temp.path().join(dir)).unwrap();
        }
        // A file with a matching name is not a package
        std::fs::write(temp.path().join("plugin.video.notes"), "x").unwrap();

        let config = BuildConfig::for_publish_dir(temp.path().join("repo"));
        let packages = discover(temp.path(), &config).unwrap();

        assert_eq!(
            packages,
            vec!["plugin.video.foo", "repository.example", "script.module.bar"]
        );
    }

    #[test]
    fn test_discover_empty() {
        let temp = TempDir::new().unwrap();
        let config = BuildConfig::for_publish_dir(temp.path().join("repo"));
        assert!(discover(temp.path(), &config).unwrap().is_empty());
    }

    #[test]
    fn test_discover_skips_publish_dir() {
        let temp = TempDir::new().unwrap();
        let publish = temp.path().join("repository.mine");
        std::fs::create_dir_all(&publish).unwrap();
        std::fs::create_dir_all(temp.path().join("repository.other")).unwrap();

        let config = BuildConfig::for_publish_dir(&publish);
        assert_eq!(discover(temp.path(), &config).unwrap(), vec!["repository.other"]);
    }

    #[test]
    fn test_discover_unsorted_keeps_listing_order() {
        let temp = TempDir::new().unwrap();
        for dir in [
            "script.module.zzz",
            "plugin.video.mmm",
            "repository.aaa",
            "plugin.video.bbb",
            "unrelated.dir",
        ] {
            std::fs::create_dir_all(temp.path().join(dir)).unwrap();
        }

        let listed: Vec<String> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name != "unrelated.dir")
            .collect();

        let config = BuildConfig {
            sort_packages: false,
            ..BuildConfig::for_publish_dir(temp.path().join("repo"))
        };
        assert_eq!(discover(temp.path(), &config).unwrap(), listed);
    }

    #[test]
    fn test_discover_missing_sources() {
        let temp = TempDir::new().unwrap();
        let config = BuildConfig::default();
        let err = discover(&temp.path().join("nope"), &config).unwrap_err();
        assert!(matches!(err, BuildError::SourcesNotFound { .. }));
    }
}
