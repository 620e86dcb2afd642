//! VinylVault command-line client.
//!
//! Searches the Discogs catalog and prints normalized records.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use vinyl_vault::cli;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr so `--json` output stays pipeable
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("vinyl_vault=info".parse()?))
        .init();

    cli::run_command(&args)
}
