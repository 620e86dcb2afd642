//! VinylVault - catalog metadata for a vinyl collection.
//!
//! The [`catalog`] module looks records up on Discogs and normalizes the
//! responses into [`catalog::CanonicalRecord`]s. The [`cli`] module is the
//! command-line front end used by the `vinyl-vault` binary.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
#[cfg(test)]
pub mod test_utils;
