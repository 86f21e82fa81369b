//! Verify command - check addons.xml against addons.xml.md5

use console::style;
use std::path::Path;

use crate::error::Result;

pub fn run(publish_dir: &Path) -> Result<()> {
    let digest = addonforge_core::verify(publish_dir)?;

    println!(
        "{} {} matches {} ({})",
        style("✓").green().bold(),
        addonforge_core::MANIFEST_FILE,
        addonforge_core::CHECKSUM_FILE,
        style(digest).dim()
    );

    Ok(())
}
