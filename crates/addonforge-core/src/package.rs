//! Add-on packages
//!
//! A package is a directory under the sources directory whose name carries a
//! recognized prefix. Its identity and version come from `addon.xml`.

use std::path::{Path, PathBuf};

use crate::descriptor::Element;
use crate::error::DescriptorError;

/// Descriptor file name inside every package
pub const DESCRIPTOR_FILE: &str = "addon.xml";

/// Optional files republished next to a package's archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Changelog,
    Icon,
    Fanart,
}

impl Asset {
    pub const ALL: [Asset; 3] = [Asset::Changelog, Asset::Icon, Asset::Fanart];

    /// File name inside the package directory
    pub fn source_name(self) -> &'static str {
        match self {
            Asset::Changelog => "changelog.txt",
            Asset::Icon => "icon.png",
            Asset::Fanart => "fanart.jpg",
        }
    }

    /// File name inside the publish directory
    pub fn published_name(self, version: &str) -> String {
        match self {
            Asset::Changelog => format!("changelog-{}.txt", version),
            other => other.source_name().to_string(),
        }
    }
}

/// A package with its parsed descriptor
#[derive(Debug, Clone)]
pub struct Package {
    /// Directory name, used as the package id everywhere in the repository
    pub id: String,
    /// Package directory
    pub root: PathBuf,
    /// Root element of `addon.xml`
    pub descriptor: Element,
    /// `version` attribute of the descriptor
    pub version: String,
}

impl Package {
    /// Load the package `id` from `sources_dir`
    pub fn load(sources_dir: &Path, id: &str) -> Result<Self, DescriptorError> {
        let root = sources_dir.join(id);
        let descriptor_path = root.join(DESCRIPTOR_FILE);

        if !descriptor_path.is_file() {
            return Err(DescriptorError::NotFound {
                package: id.to_string(),
                path: descriptor_path.display().to_string(),
            });
        }

        let content = std::fs::read(&descriptor_path).map_err(|source| DescriptorError::Read {
            package: id.to_string(),
            source,
        })?;

        let descriptor =
            Element::parse(&content).map_err(|message| DescriptorError::Malformed {
                package: id.to_string(),
                message,
            })?;

        let version = descriptor
            .attribute("version")
            .ok_or_else(|| DescriptorError::MissingAttribute {
                package: id.to_string(),
                attribute: "version",
            })?
            .to_string();

        Ok(Self {
            id: id.to_string(),
            root,
            descriptor,
            version,
        })
    }

    /// Archive file name, e.g. `plugin.video.foo-2.1.0.zip`
    #[must_use]
    pub fn archive_name(&self) -> String {
        format!("{}-{}.zip", self.id, self.version)
    }

    /// Path of an optional asset if the package ships it
    pub fn asset_path(&self, asset: Asset) -> Option<PathBuf> {
        let path = self.root.join(asset.source_name());
        path.is_file().then_some(path)
    }
}
