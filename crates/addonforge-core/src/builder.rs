//! Repository builder
//!
//! One sequential pass over the discovered packages:
//! 1. load each package's `addon.xml` (fatal on failure)
//! 2. zip the package and publish the archive if it changed (a failure here
//!    only skips that package)
//! 3. copy changelog, icon and fan art if they changed
//! 4. write `addons.xml` and `addons.xml.md5` listing every package

use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::stage_archive;
use crate::checksum::ChangeDetector;
use crate::config::BuildConfig;
use crate::discovery::discover;
use crate::error::{ArchiveError, BuildError, Result};
use crate::manifest::{Manifest, ManifestOutput};
use crate::package::{Asset, Package};

/// What happened to a package's archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// A new archive was published at this path
    Created(PathBuf),
    /// The published archive already had identical content
    Unchanged(PathBuf),
    /// Archiving failed; previous outputs were left untouched
    Failed(String),
}

/// Result of publishing one package
#[derive(Debug, Clone)]
pub struct PackageReport {
    pub id: String,
    pub version: String,
    pub archive: ArchiveOutcome,
    /// Auxiliary files written during this run
    pub copied: Vec<PathBuf>,
}

impl PackageReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.archive, ArchiveOutcome::Failed(_))
    }
}

/// Result of a whole build
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub packages: Vec<PackageReport>,
    pub manifest: ManifestOutput,
}

impl BuildReport {
    pub fn created(&self) -> usize {
        self.count(|a| matches!(a, ArchiveOutcome::Created(_)))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|a| matches!(a, ArchiveOutcome::Unchanged(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|a| matches!(a, ArchiveOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&ArchiveOutcome) -> bool) -> usize {
        self.packages.iter().filter(|p| pred(&p.archive)).count()
    }
}

/// Receives progress while a build runs
pub trait BuildObserver {
    /// Called once with every package id about to be processed
    fn discovered(&mut self, _packages: &[String]) {}

    /// Called after the descriptor loaded, before archiving starts
    fn package_started(&mut self, _package: &Package) {}

    /// Called when a package has been fully processed
    fn package_finished(&mut self, _report: &PackageReport) {}
}

/// Observer that ignores every event
#[derive(Debug, Default)]
pub struct NoopObserver;

impl BuildObserver for NoopObserver {}

/// Builds a repository from the packages next to the publish directory
#[derive(Debug, Clone)]
pub struct RepositoryBuilder {
    config: BuildConfig,
    sources_dir: PathBuf,
    detector: ChangeDetector,
}

impl RepositoryBuilder {
    pub fn new(config: BuildConfig) -> Result<Self> {
        config.validate()?;
        let sources_dir = config.resolve_sources_dir()?;
        let detector = ChangeDetector::new(config.force_replace);

        Ok(Self {
            config,
            sources_dir,
            detector,
        })
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn sources_dir(&self) -> &Path {
        &self.sources_dir
    }

    /// Package ids that a build would process
    pub fn discover(&self) -> Result<Vec<String>> {
        discover(&self.sources_dir, &self.config)
    }

    /// Load every discovered package without writing anything
    pub fn load_packages(&self) -> Result<Vec<Package>> {
        self.discover()?
            .iter()
            .map(|id| Package::load(&self.sources_dir, id).map_err(BuildError::from))
            .collect()
    }

    pub fn build(&self) -> Result<BuildReport> {
        self.build_with(&mut NoopObserver)
    }

    /// Run a full build, reporting progress to `observer`
    pub fn build_with(&self, observer: &mut dyn BuildObserver) -> Result<BuildReport> {
        let ids = self.discover()?;
        observer.discovered(&ids);

        fs::create_dir_all(&self.config.publish_dir)?;

        let mut manifest = Manifest::new();
        let mut packages = Vec::with_capacity(ids.len());

        for id in &ids {
            let package = Package::load(&self.sources_dir, id)?;
            observer.package_started(&package);

            let report = self.publish_package(&package)?;
            observer.package_finished(&report);

            manifest.push(package.descriptor);
            packages.push(report);
        }

        let manifest = manifest.write(&self.config.publish_dir)?;

        Ok(BuildReport { packages, manifest })
    }

    /// Publish the archive and assets of one package
    fn publish_package(&self, package: &Package) -> Result<PackageReport> {
        let dest_dir = self.config.publish_dir.join(&package.id);
        fs::create_dir_all(&dest_dir)?;

        let archive_path = dest_dir.join(package.archive_name());
        let archive = match self.publish_archive(package, &dest_dir, &archive_path) {
            Ok(true) => {
                tracing::info!("Published {}", archive_path.display());
                ArchiveOutcome::Created(archive_path)
            }
            Ok(false) => {
                tracing::info!("{} is up to date", archive_path.display());
                ArchiveOutcome::Unchanged(archive_path)
            }
            Err(e) => {
                tracing::warn!("Failed to archive {}: {}", package.id, e);
                return Ok(PackageReport {
                    id: package.id.clone(),
                    version: package.version.clone(),
                    archive: ArchiveOutcome::Failed(e.to_string()),
                    copied: Vec::new(),
                });
            }
        };

        let copied = self.copy_assets(package, &dest_dir)?;

        Ok(PackageReport {
            id: package.id.clone(),
            version: package.version.clone(),
            archive,
            copied,
        })
    }

    /// Stage the archive and move it into place if it changed
    ///
    /// Returns whether the published archive was replaced. The staged file
    /// is removed on every path that does not persist it.
    fn publish_archive(
        &self,
        package: &Package,
        dest_dir: &Path,
        archive_path: &Path,
    ) -> std::result::Result<bool, ArchiveError> {
        let staged = stage_archive(&package.root, &self.config, dest_dir)?;

        if self.detector.differs(staged.path(), archive_path)? {
            staged.persist(archive_path)?;
            Ok(true)
        } else {
            staged.close()?;
            Ok(false)
        }
    }

    /// Copy changelog, icon and fan art when they differ from the published copies
    fn copy_assets(&self, package: &Package, dest_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut copied = Vec::new();

        for asset in Asset::ALL {
            let Some(src) = package.asset_path(asset) else {
                continue;
            };
            let dst = dest_dir.join(asset.published_name(&package.version));

            let copy_error = |source| BuildError::Copy {
                package: package.id.clone(),
                path: src.display().to_string(),
                source,
            };

            if self.detector.differs(&src, &dst).map_err(copy_error)? {
                fs::copy(&src, &dst).map_err(copy_error)?;
                tracing::debug!("Copied {} -> {}", src.display(), dst.display());
                copied.push(dst);
            }
        }

        Ok(copied)
    }
}
