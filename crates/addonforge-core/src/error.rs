//! Core error types

use thiserror::Error;

/// Errors raised while loading a package's `addon.xml`
///
/// All of these are fatal for a build: a package that cannot be described
/// cannot be listed in the repository manifest.
#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("addon.xml not found for {package}: {path}")]
    NotFound { package: String, path: String },

    #[error("Failed to read addon.xml for {package}: {source}")]
    Read {
        package: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed addon.xml for {package}: {message}")]
    Malformed { package: String, message: String },

    #[error("addon.xml for {package} is missing required attribute '{attribute}'")]
    MissingAttribute {
        package: String,
        attribute: &'static str,
    },
}

impl DescriptorError {
    /// Id of the package whose descriptor failed
    pub fn package(&self) -> &str {
        match self {
            DescriptorError::NotFound { package, .. }
            | DescriptorError::Read { package, .. }
            | DescriptorError::Malformed { package, .. }
            | DescriptorError::MissingAttribute { package, .. } => package,
        }
    }
}

/// Errors raised while zipping a package
///
/// These are recoverable: the package keeps its previously published
/// archive and the build moves on.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Failed to walk package directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to move archive into place: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArchiveError {
    /// Wrap an IO error raised while touching `path`
    pub(crate) fn at(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            ArchiveError::PermissionDenied {
                path: path.display().to_string(),
            }
        } else {
            ArchiveError::Io(err)
        }
    }
}

/// Top-level build errors
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("Sources directory not found: {path}")]
    SourcesNotFound { path: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Failed to copy {path} for {package}: {source}")]
    Copy {
        package: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize manifest: {message}")]
    ManifestSerialize { message: String },

    #[error("Checksum file not found: {path}")]
    ChecksumMissing { path: String },

    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for BuildError {
    fn from(e: quick_xml::Error) -> Self {
        BuildError::ManifestSerialize {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
