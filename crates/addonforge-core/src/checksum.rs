//! MD5 checksums and change detection

use md5::{Digest, Md5};
use std::io::{BufReader, Read};
use std::path::Path;

/// Hex-encoded MD5 of a byte slice
#[must_use]
pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}

/// Hex-encoded MD5 of a file's full content
pub fn hash_file(path: &Path) -> std::io::Result<String> {
    let file = std::fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Md5::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Decides whether a published file needs to be (re)written
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeDetector {
    force_replace: bool,
}

impl ChangeDetector {
    pub fn new(force_replace: bool) -> Self {
        Self { force_replace }
    }

    /// Whether `src` and `dst` have different content
    ///
    /// A missing destination always differs, as does everything when
    /// force-replace is on; neither case reads the source.
    pub fn differs(&self, src: &Path, dst: &Path) -> std::io::Result<bool> {
        if self.force_replace || !dst.exists() {
            return Ok(true);
        }
        Ok(hash_file(src)? != hash_file(dst)?)
    }
}
