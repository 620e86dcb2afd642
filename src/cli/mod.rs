//! Command-line interface for vinyl-vault.
//!
//! This module provides CLI commands for searching the catalog, looking up
//! releases and managing the config file.

mod commands;

pub use commands::{Cli, Commands, run_command};
