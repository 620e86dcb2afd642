//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `search`: One-shot catalog search
//! - `release`: Release lookups by Discogs ID
//! - `browse`: Interactive search box fed from stdin
//! - `settings`: Config file inspection and initialization

mod browse;
mod release;
mod search;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::catalog::{CanonicalRecord, CatalogService, DiscogsClient};
use crate::config::{self, Config};
use crate::error::{Error, Result};

pub use browse::cmd_browse;
pub use release::cmd_release;
pub use search::cmd_search;
pub use settings::cmd_config;

/// VinylVault catalog client
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read settings from this file instead of the standard location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search Discogs for vinyl releases
    Search {
        /// Free-text query (artist, title, or both)
        query: String,
        /// Discogs token or key:secret (or set DISCOGS_TOKEN env var)
        #[arg(short, long, env = "DISCOGS_TOKEN", hide_env_values = true)]
        token: Option<String>,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Look up releases by Discogs ID
    Release {
        /// One or more release IDs, fetched concurrently
        #[arg(required = true)]
        ids: Vec<String>,
        /// Discogs token or key:secret (or set DISCOGS_TOKEN env var)
        #[arg(short, long, env = "DISCOGS_TOKEN", hide_env_values = true)]
        token: Option<String>,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search interactively: one query per line, newer lines supersede older ones
    Browse {
        /// Discogs token or key:secret (or set DISCOGS_TOKEN env var)
        #[arg(short, long, env = "DISCOGS_TOKEN", hide_env_values = true)]
        token: Option<String>,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the config file location and effective settings
    Config {
        /// Write a default config file
        #[arg(long)]
        init: bool,
        /// Overwrite an existing file when used with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let settings = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    match &cli.command {
        Commands::Search { query, token, json } => {
            let rt = Runtime::new()?;
            cmd_search(&rt, &settings, query, token.as_deref(), *json)
        }
        Commands::Release { ids, token, json } => {
            let rt = Runtime::new()?;
            cmd_release(&rt, &settings, ids, token.as_deref(), *json)
        }
        Commands::Browse { token, json } => {
            let rt = Runtime::new()?;
            cmd_browse(&rt, &settings, token.as_deref(), *json)
        }
        Commands::Config { init, force } => {
            cmd_config(&settings, cli.config.as_deref(), *init, *force)
        }
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Pick the credential string: command line / env first, then the config file.
///
/// Blank values are skipped.
fn resolve_token(arg: Option<&str>, settings: &Config) -> Result<String> {
    [arg, settings.credentials.discogs_token.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or(Error::MissingCredentials)
}

fn build_service(token: &str, settings: &Config) -> Result<CatalogService> {
    let client = DiscogsClient::from_config(token, &settings.catalog)?;
    Ok(CatalogService::new(Arc::new(client)))
}

/// Token that fires on Ctrl-C. Must be called from inside the runtime.
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling request");
            trigger.cancel();
        }
    });
    token
}

/// One line per record: `id  Artist - Title (year) [format] #tag ...`
fn describe(record: &CanonicalRecord) -> String {
    let year = record
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "????".to_string());
    let mut line = format!(
        "{:>10}  {} - {} ({}) [{}]",
        record.external_id, record.artist, record.title, year, record.format
    );
    for tag in &record.tags {
        line.push_str(" #");
        line.push_str(tag);
    }
    line
}

fn render_records(records: &[CanonicalRecord], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(records)?);
    }
    Ok(records.iter().map(describe).collect::<Vec<_>>().join("\n"))
}

fn print_records(records: &[CanonicalRecord], json: bool) -> Result<()> {
    let rendered = render_records(records, json)?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecordFormat;
    use crate::test_utils::mock_record;
    use clap::CommandFactory;

    fn settings_with_token(token: Option<&str>) -> Config {
        let mut settings = Config::default();
        settings.credentials.discogs_token = token.map(str::to_string);
        settings
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_release_requires_an_id() {
        assert!(Cli::try_parse_from(["vinyl-vault", "release"]).is_err());

        let cli = Cli::try_parse_from(["vinyl-vault", "release", "1", "2", "--json"]).unwrap();
        match cli.command {
            Commands::Release { ids, json, .. } => {
                assert_eq!(ids, vec!["1", "2"]);
                assert!(json);
            }
            _ => panic!("expected release command"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["vinyl-vault", "config", "--config", "/tmp/vv.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/vv.toml")));
        assert!(Cli::try_parse_from(["vinyl-vault", "config", "--force"]).is_err());
    }

    #[test]
    fn test_resolve_token_prefers_argument() {
        let settings = settings_with_token(Some("from-file"));
        assert_eq!(resolve_token(Some("from-arg"), &settings).unwrap(), "from-arg");
    }

    #[test]
    fn test_resolve_token_falls_back_to_config() {
        let settings = settings_with_token(Some("  from-file  "));
        assert_eq!(resolve_token(None, &settings).unwrap(), "from-file");
        assert_eq!(resolve_token(Some("   "), &settings).unwrap(), "from-file");
    }

    #[test]
    fn test_resolve_token_missing() {
        let result = resolve_token(None, &settings_with_token(Some("")));
        assert!(matches!(result, Err(Error::MissingCredentials)));
    }

    #[test]
    fn test_describe_record() {
        let mut record = CanonicalRecord {
            year: Some(1979),
            ..mock_record("1873013", "Pink Floyd", "The Wall")
        };
        record.add_tag("Rock");
        record.add_tag("Prog Rock");

        assert_eq!(
            describe(&record),
            "   1873013  Pink Floyd - The Wall (1979) [LP] #prog rock #rock"
        );
    }

    #[test]
    fn test_describe_unknown_year() {
        let record = CanonicalRecord {
            format: RecordFormat::Single,
            ..mock_record("7", "Nirvana", "Lithium")
        };
        assert!(describe(&record).ends_with("(????) [Single]"));
    }

    #[test]
    fn test_render_json_uses_camel_case() {
        let records = vec![mock_record("1", "Can", "Tago Mago")];
        let json = render_records(&records, true).unwrap();
        assert!(json.contains("\"externalId\": \"1\""));
        assert!(json.contains("\"imageUrl\""));
        assert!(json.contains("\"format\": \"LP\""));
    }

    #[test]
    fn test_render_text_one_line_per_record() {
        let records = vec![
            mock_record("1", "Can", "Tago Mago"),
            mock_record("2", "Can", "Ege Bamyasi"),
        ];
        assert_eq!(render_records(&records, false).unwrap().lines().count(), 2);
        assert!(render_records(&[], false).unwrap().is_empty());
    }
}
