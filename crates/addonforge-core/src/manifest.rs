//! Repository manifest (`addons.xml`) and its checksum (`addons.xml.md5`)
//!
//! The manifest wraps every package descriptor in an `<addons>` root,
//! pretty-printed with tab indentation. The checksum is computed from the
//! manifest bytes read back from disk, so it always describes exactly what
//! was written.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, Event};
use std::path::{Path, PathBuf};

use crate::checksum::{hash_file, md5_hex};
use crate::descriptor::Element;
use crate::error::{BuildError, Result};

/// Manifest file name inside the publish directory
pub const MANIFEST_FILE: &str = "addons.xml";

/// Checksum file name inside the publish directory
pub const CHECKSUM_FILE: &str = "addons.xml.md5";

/// Root element name of the manifest
const ROOT_ELEMENT: &str = "addons";

/// Aggregate of package descriptors, in insertion order
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    addons: Vec<Element>,
}

/// Paths and digest of a written manifest
#[derive(Debug, Clone)]
pub struct ManifestOutput {
    pub manifest_path: PathBuf,
    pub checksum_path: PathBuf,
    /// Hex MD5 of the manifest bytes on disk
    pub digest: String,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, descriptor: Element) {
        self.addons.push(descriptor);
    }

    pub fn len(&self) -> usize {
        self.addons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addons.is_empty()
    }

    pub fn addons(&self) -> &[Element] {
        &self.addons
    }

    /// Serialize to UTF-8 XML with a declaration and tab indentation
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = Element::new(ROOT_ELEMENT);
        for addon in &self.addons {
            root.push_element(addon.clone());
        }
        root.write_to(&mut writer)?;

        let mut xml = writer.into_inner();
        xml.push(b'\n');
        Ok(xml)
    }

    /// Write `addons.xml` and then `addons.xml.md5` into `publish_dir`
    pub fn write(&self, publish_dir: &Path) -> Result<ManifestOutput> {
        let xml = self.to_xml()?;

        let manifest_path = publish_dir.join(MANIFEST_FILE);
        std::fs::write(&manifest_path, &xml)?;

        // Hash what actually landed on disk
        let digest = hash_file(&manifest_path)?;
        let checksum_path = publish_dir.join(CHECKSUM_FILE);
        std::fs::write(&checksum_path, &digest)?;

        tracing::info!(
            "Wrote {} with {} package(s), md5 {}",
            manifest_path.display(),
            self.len(),
            digest
        );

        Ok(ManifestOutput {
            manifest_path,
            checksum_path,
            digest,
        })
    }
}

/// Check that `addons.xml.md5` matches `addons.xml` in `publish_dir`
///
/// Returns the verified digest.
pub fn verify(publish_dir: &Path) -> Result<String> {
    let manifest_path = publish_dir.join(MANIFEST_FILE);
    let checksum_path = publish_dir.join(CHECKSUM_FILE);

    if !manifest_path.is_file() {
        return Err(BuildError::ChecksumMissing {
            path: manifest_path.display().to_string(),
        });
    }
    if !checksum_path.is_file() {
        return Err(BuildError::ChecksumMissing {
            path: checksum_path.display().to_string(),
        });
    }

    let expected = std::fs::read_to_string(&checksum_path)?.trim().to_lowercase();
    let actual = md5_hex(&std::fs::read(&manifest_path)?);

    if expected != actual {
        return Err(BuildError::ChecksumMismatch {
            path: manifest_path.display().to_string(),
            expected,
            actual,
        });
    }

    Ok(actual)
}
