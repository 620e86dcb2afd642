//! Config file inspection and initialization.

use std::path::{Path, PathBuf};

use crate::config::{self, Config, ConfigError};

/// Print the config location and effective settings, or write a default file
pub fn cmd_config(
    settings: &Config,
    path_override: Option<&Path>,
    init: bool,
    force: bool,
) -> anyhow::Result<()> {
    let path = config_file(path_override)?;

    if init {
        if path.exists() && !force {
            anyhow::bail!(
                "Config file {} already exists (use --force to overwrite)",
                path.display()
            );
        }
        config::save_to(&Config::default(), &path)?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let state = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("# Config file: {}{}", path.display(), state);
    print!("{}", toml::to_string_pretty(&redacted(settings))?);
    Ok(())
}

fn config_file(path_override: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match path_override {
        Some(path) => Ok(path.to_path_buf()),
        None => config::config_path().ok_or(ConfigError::NoConfigDir),
    }
}

/// Copy of the settings that is safe to print
fn redacted(settings: &Config) -> Config {
    let mut shown = settings.clone();
    if let Some(token) = shown.credentials.discogs_token.as_mut() {
        *token = "********".to_string();
    }
    shown
}
