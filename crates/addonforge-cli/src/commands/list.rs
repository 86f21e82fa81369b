//! List command - show the packages a build would process

use addonforge_core::RepositoryBuilder;
use console::style;
use std::path::Path;

use crate::error::Result;

pub fn run(publish_dir: &Path, config_path: Option<&Path>, sources: Option<&Path>) -> Result<()> {
    let mut config = super::load_config(publish_dir, config_path)?;
    if let Some(sources) = sources {
        config.sources_dir = Some(sources.to_path_buf());
    }

    let builder = RepositoryBuilder::new(config)?;
    let packages = builder.load_packages()?;

    if packages.is_empty() {
        println!(
            "No packages found in {}",
            style(builder.sources_dir().display()).dim()
        );
        return Ok(());
    }

    let width = packages.iter().map(|p| p.id.len()).max().unwrap_or(0);

    println!(
        "{:<width$}  {}",
        style("PACKAGE").bold(),
        style("VERSION").bold(),
        width = width
    );
    for package in &packages {
        println!("{:<width$}  {}", package.id, package.version, width = width);
    }

    Ok(())
}
