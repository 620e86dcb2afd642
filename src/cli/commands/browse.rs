//! Interactive search box fed from stdin.
//!
//! Every line is a new query. A line typed while the previous one is still
//! debouncing or in flight supersedes it; an empty line clears the results.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use super::{build_service, print_records, resolve_token};
use crate::catalog::{CatalogError, SearchOutcome, SearchSession};
use crate::config::Config;

pub fn cmd_browse(
    rt: &Runtime,
    settings: &Config,
    token: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let token = resolve_token(token, settings)?;
    let debounce = Duration::from_millis(settings.catalog.search_debounce_ms);

    rt.block_on(async {
        let session = Arc::new(SearchSession::new(
            build_service(&token, settings)?,
            debounce,
        ));
        eprintln!("Type a query and press Enter. An empty line clears, Ctrl-D quits.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut latest: Option<JoinHandle<()>> = None;

        while let Some(line) = lines.next_line().await? {
            let session = session.clone();
            latest = Some(tokio::spawn(async move {
                let outcome = session.submit(&line).await;
                report(&line, outcome, json);
            }));
        }

        // Input closed: let the last query finish
        if let Some(handle) = latest {
            handle.await?;
        }
        Ok::<(), anyhow::Error>(())
    })
}

fn report(query: &str, outcome: Result<SearchOutcome, CatalogError>, json: bool) {
    match outcome {
        Ok(SearchOutcome::Results(records)) => {
            if records.is_empty() {
                println!("No vinyl releases found for {:?}", query.trim());
            } else if let Err(e) = print_records(&records, json) {
                tracing::error!(error = %e, "Failed to print results");
            }
        }
        Ok(SearchOutcome::Cleared) => println!("(cleared)"),
        Ok(SearchOutcome::Superseded) => tracing::debug!(query, "Query superseded"),
        Err(e) => eprintln!("Search for {:?} failed: {}", query.trim(), e),
    }
}
