//! addonforge CLI - build add-on repositories from sibling package directories

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod error;
mod exit_codes;
mod util;

use commands::build::BuildArgs;

#[derive(Parser)]
#[command(name = "addonforge")]
#[command(author = "addonforge Contributors")]
#[command(version)]
#[command(about = "Build an add-on repository: zip packages, publish assets, write addons.xml", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Publish directory (archives, addons.xml and addons.xml.md5 go here)
    #[arg(short = 'C', long, global = true, default_value = ".")]
    publish_dir: PathBuf,

    /// Configuration file (default: addonforge.yaml in the publish directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Package every add-on and write addons.xml (the default)
    Build(BuildArgs),

    /// List the packages a build would process, without writing anything
    List {
        /// Directory to scan for packages (default: parent of the publish directory)
        #[arg(long)]
        sources: Option<PathBuf>,
    },

    /// Check that addons.xml.md5 matches addons.xml
    Verify,
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let publish_dir = cli.publish_dir.as_path();
    let config = cli.config.as_deref();

    let result = match cli.command {
        None => commands::build::run(publish_dir, config, &BuildArgs::default()),
        Some(Commands::Build(args)) => commands::build::run(publish_dir, config, &args),
        Some(Commands::List { sources }) => {
            commands::list::run(publish_dir, config, sources.as_deref())
        }
        Some(Commands::Verify) => commands::verify::run(publish_dir),
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Logs go to stderr; `--debug` wins over `RUST_LOG`
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
