//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.
//! A successful run returns normally from `main` and exits 0.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Configuration error - unreadable or invalid addonforge.yaml, bad directories
pub const CONFIG_ERROR: i32 = 3;

/// Package error - missing or invalid addon.xml
pub const PACKAGE_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Checksum error - addons.xml.md5 missing or not matching addons.xml
pub const CHECKSUM_ERROR: i32 = 6;
