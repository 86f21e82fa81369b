//! Zip archive creation for add-on packages
//!
//! Archives contain every file of the package except anything under a
//! `.git` directory and files with an excluded suffix. Entry names are
//! relative to the package's parent directory, so extracting an archive
//! recreates the package directory itself (`plugin.video.foo/addon.xml`).
//!
//! Symlinks to files are stored as regular entries holding the target's
//! content. A dangling or unreadable link fails the archive.
//!
//! Archives are reproducible: files are added in sorted order with a fixed
//! timestamp and mode, so an unchanged package always yields identical bytes.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::config::BuildConfig;
use crate::error::ArchiveError;

/// Version control directory never packed
const VCS_DIR: &str = ".git";

type Result<T> = std::result::Result<T, ArchiveError>;

/// Files of `package_dir` that belong in its archive, in archive order
pub fn collect_files(package_dir: &Path, config: &BuildConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(package_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != VCS_DIR);

    for entry in walker {
        let entry = entry.map_err(|e| match e.io_error().map(std::io::Error::kind) {
            Some(std::io::ErrorKind::PermissionDenied) => ArchiveError::PermissionDenied {
                path: e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            },
            _ => ArchiveError::Walk(e),
        })?;

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }

        if config.is_excluded_file(&entry.file_name().to_string_lossy()) {
            tracing::debug!("Excluding {}", entry.path().display());
            continue;
        }

        // Symlinked files are packed with their target's content; symlinked
        // directories are not descended into.
        if file_type.is_symlink() {
            let target = std::fs::metadata(entry.path())
                .map_err(|e| ArchiveError::at(entry.path(), e))?;
            if !target.is_file() {
                tracing::debug!("Not following symlinked directory {}", entry.path().display());
                continue;
            }
        } else if !file_type.is_file() {
            continue;
        }

        files.push(entry.into_path());
    }

    Ok(files)
}

/// Entry name of `file` inside the archive of `package_dir`
fn entry_name(package_dir: &Path, file: &Path) -> String {
    let base = package_dir.parent().unwrap_or(package_dir);
    file.strip_prefix(base)
        .unwrap_or(file)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Write the archive of `package_dir` into `out`
pub fn write_archive<W: Write + Seek>(
    package_dir: &Path,
    config: &BuildConfig,
    out: W,
) -> Result<W> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    let mut zip = ZipWriter::new(out);

    for file in collect_files(package_dir, config)? {
        let name = entry_name(package_dir, &file);
        let mut source = File::open(&file).map_err(|e| ArchiveError::at(&file, e))?;

        zip.start_file(name.as_str(), options)?;
        std::io::copy(&mut source, &mut zip).map_err(|e| ArchiveError::at(&file, e))?;
    }

    Ok(zip.finish()?)
}

/// Build the archive of `package_dir` in a temporary file inside `staging_dir`
///
/// The temporary file is deleted when dropped, so a failed or discarded
/// archive never lingers next to the published ones.
pub fn stage_archive(
    package_dir: &Path,
    config: &BuildConfig,
    staging_dir: &Path,
) -> Result<NamedTempFile> {
    let mut staged = tempfile::Builder::new()
        .prefix(".addonforge-")
        .suffix(".zip.tmp")
        .tempfile_in(staging_dir)
        .map_err(|e| ArchiveError::at(staging_dir, e))?;

    write_archive(package_dir, config, staged.as_file_mut())?;
    staged.as_file_mut().flush()?;

    Ok(staged)
}

/// Entry names of an existing archive
pub fn list_archive(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| ArchiveError::at(path, e))?;
    let archive = ZipArchive::new(file)?;
    Ok(archive.file_names().map(str::to_string).collect())
}
