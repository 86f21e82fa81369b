//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use addonforge_core::BuildError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// A package descriptor could not be loaded
    #[error("Package error: {message}")]
    #[diagnostic(code(addonforge::cli::package))]
    Package {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Configuration or directory layout problem
    #[error("Configuration error: {message}")]
    #[diagnostic(code(addonforge::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// addons.xml.md5 missing or stale
    #[error("Checksum error: {message}")]
    #[diagnostic(
        code(addonforge::cli::checksum),
        help("Run 'addonforge build' to regenerate addons.xml and addons.xml.md5")
    )]
    Checksum { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(addonforge::cli::io))]
    Io { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(addonforge::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Package { .. } => exit_codes::PACKAGE_ERROR,
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Checksum { .. } => exit_codes::CHECKSUM_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create a configuration error with help text
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

impl From<BuildError> for CliError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::Descriptor(e) => CliError::Package {
                help: Some(format!(
                    "Fix {}/addon.xml or move the directory out of the sources directory",
                    e.package()
                )),
                message: e.to_string(),
            },
            BuildError::SourcesNotFound { path } => CliError::config_with_help(
                format!("Sources directory not found: {}", path),
                "Run addonforge from a directory nested inside the repository root, or pass --sources",
            ),
            e @ (BuildError::InvalidConfig { .. } | BuildError::ConfigParse(_)) => {
                CliError::Config {
                    message: e.to_string(),
                    help: None,
                }
            }
            e @ (BuildError::ChecksumMissing { .. } | BuildError::ChecksumMismatch { .. }) => {
                CliError::Checksum {
                    message: e.to_string(),
                }
            }
            e @ (BuildError::Copy { .. } | BuildError::Io(_)) => CliError::Io {
                message: e.to_string(),
            },
            e @ BuildError::ManifestSerialize { .. } => CliError::Internal {
                message: e.to_string(),
            },
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
