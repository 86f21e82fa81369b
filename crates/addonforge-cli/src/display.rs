//! Display formatting for CLI output
//!
//! Progress lines are aligned on the longest package id:
//!
//! ```text
//! Creating zip for plugin.video.foo ........ done (12.40 KB)
//! Creating zip for script.module.bar ....... skipped
//! ```

use addonforge_core::{ArchiveOutcome, BuildObserver, BuildReport, Package, PackageReport};
use console::style;
use std::io::{self, Write};

use crate::util::format_size;

/// Dots appended after the longest label
const LABEL_PAD: usize = 6;

const LABEL_PREFIX: &str = "Creating zip for ";

/// Prints one progress line per package to stdout
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    width: usize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Label padded with dots to `width` characters
fn padded_label(id: &str, width: usize) -> String {
    format!("{:.<width$}", format!("{}{} ", LABEL_PREFIX, id), width = width)
}

impl BuildObserver for ConsoleProgress {
    fn discovered(&mut self, packages: &[String]) {
        let longest = packages.iter().map(String::len).max().unwrap_or(0);
        self.width = LABEL_PREFIX.len() + longest + LABEL_PAD;

        if packages.is_empty() {
            println!("  {}", style("No packages found").yellow());
        }
    }

    fn package_started(&mut self, package: &Package) {
        print!("{} ", padded_label(&package.id, self.width));
        let _ = io::stdout().flush();
    }

    fn package_finished(&mut self, report: &PackageReport) {
        match &report.archive {
            ArchiveOutcome::Created(path) => {
                let size = std::fs::metadata(path)
                    .map(|m| format!(" ({})", format_size(m.len())))
                    .unwrap_or_default();
                println!("{}{}", style("done").green(), style(size).dim());
            }
            ArchiveOutcome::Unchanged(_) => println!("{}", style("skipped").dim()),
            ArchiveOutcome::Failed(reason) => {
                println!("{}", style("failed").red().bold());
                println!("    {} {}", style("reason:").red(), reason);
            }
        }
    }
}

/// Print counts and the manifest digest after a build
pub fn print_summary(report: &BuildReport) {
    println!();
    println!(
        "{} {} package(s): {} created, {} unchanged, {} failed",
        style("Summary").bold(),
        report.packages.len(),
        style(report.created()).green(),
        style(report.unchanged()).dim(),
        if report.failed() > 0 {
            style(report.failed()).red().bold()
        } else {
            style(report.failed()).dim()
        }
    );
    println!(
        "  {} {}",
        style("Wrote").green().bold(),
        report.manifest.manifest_path.display()
    );
    println!("  {} md5:{}", style("Digest").dim(), report.manifest.digest);
}
