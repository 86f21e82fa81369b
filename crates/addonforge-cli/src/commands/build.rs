//! Build command - package every add-on and write the repository manifest

use addonforge_core::RepositoryBuilder;
use clap::Args;
use console::style;
use std::path::{Path, PathBuf};

use crate::display::{ConsoleProgress, print_summary};
use crate::error::Result;

/// Flags overriding the build configuration
#[derive(Args, Debug, Default, Clone)]
pub struct BuildArgs {
    /// Directory to scan for packages (default: parent of the publish directory)
    #[arg(long)]
    pub sources: Option<PathBuf>,

    /// Rewrite every archive and asset even when unchanged
    #[arg(long)]
    pub force: bool,

    /// Keep directory listing order instead of sorting package ids
    #[arg(long)]
    pub no_sort: bool,
}

pub fn run(publish_dir: &Path, config_path: Option<&Path>, args: &BuildArgs) -> Result<()> {
    let mut config = super::load_config(publish_dir, config_path)?;
    if let Some(sources) = &args.sources {
        config.sources_dir = Some(sources.clone());
    }
    if args.force {
        config.force_replace = true;
    }
    if args.no_sort {
        config.sort_packages = false;
    }

    let builder = RepositoryBuilder::new(config)?;

    println!(
        "{} {} -> {}",
        style("Building").cyan().bold(),
        builder.sources_dir().display(),
        builder.config().publish_dir.display()
    );
    if builder.config().force_replace {
        println!("  {}", style("force-replace enabled").yellow());
    }

    let mut progress = ConsoleProgress::new();
    let report = builder.build_with(&mut progress)?;

    print_summary(&report);

    Ok(())
}
