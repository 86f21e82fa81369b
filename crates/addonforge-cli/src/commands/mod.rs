//! CLI commands

pub mod build;
pub mod list;
pub mod verify;

use addonforge_core::BuildConfig;
use std::path::Path;

use crate::error::Result;

/// Assemble the build configuration for a publish directory
///
/// An explicit `--config` file wins; otherwise `addonforge.yaml` in the
/// publish directory is used when present.
pub fn load_config(publish_dir: &Path, config_path: Option<&Path>) -> Result<BuildConfig> {
    let mut config = match config_path {
        Some(path) => BuildConfig::load_from(path)?,
        None => BuildConfig::load(publish_dir)?,
    };
    config.publish_dir = publish_dir.to_path_buf();
    Ok(config)
}
