//! addonforge core - builds add-on repositories from package directories
//!
//! This crate provides the building blocks used by the `addonforge` CLI:
//! - `BuildConfig`: recognized prefixes, excluded files, force-replace
//! - `Package`: a package directory and its parsed `addon.xml`
//! - `archive`: reproducible zip archives of package directories
//! - `Manifest`: the aggregate `addons.xml` and its `addons.xml.md5`
//! - `RepositoryBuilder`: the full discover, package, publish pass

pub mod archive;
pub mod builder;
pub mod checksum;
pub mod config;
pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod manifest;
pub mod package;

pub use archive::{list_archive, stage_archive, write_archive};
pub use builder::{
    ArchiveOutcome, BuildObserver, BuildReport, NoopObserver, PackageReport, RepositoryBuilder,
};
pub use checksum::{ChangeDetector, hash_file, md5_hex};
pub use config::{BuildConfig, CONFIG_FILE};
pub use descriptor::{Element, Node};
pub use error::{ArchiveError, BuildError, DescriptorError, Result};
pub use manifest::{CHECKSUM_FILE, MANIFEST_FILE, Manifest, ManifestOutput, verify};
pub use package::{Asset, DESCRIPTOR_FILE, Package};
