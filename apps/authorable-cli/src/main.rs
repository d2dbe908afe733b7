//! Installer for `modkit-authorable`.
//!
//! Publishes the attribution config template into a project and prints the
//! effective settings after file and environment overrides are applied.
//!
//! # Usage
//!
//! ```bash
//! # Publish config/authorable.yaml
//! authorable-cli install
//!
//! # Overwrite an existing file
//! authorable-cli install --path conf/authorable.yaml --force
//!
//! # Print the effective settings
//! authorable-cli --config conf/authorable.yaml show-config
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Created-by / updated-by attribution installer
#[derive(Parser, Debug)]
#[command(name = "authorable-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file read by `show-config`
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Publish the default configuration file
    Install {
        /// Destination of the published file
        #[arg(long, default_value = commands::DEFAULT_CONFIG_PATH)]
        path: PathBuf,

        /// Replace the file if it already exists
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration (YAML) and exit
    ShowConfig,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Install { path, force } => {
            commands::install(&path, force)?;
            println!("Published configuration to {}", path.display());
        }
        Commands::ShowConfig => {
            print!("{}", commands::render_config(cli.config.as_deref())?);
        }
    }
    Ok(())
}
