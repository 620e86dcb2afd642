//! One-shot catalog search.

use tokio::runtime::Runtime;

use super::{build_service, cancel_on_ctrl_c, print_records, resolve_token};
use crate::catalog::Fetch;
use crate::config::Config;
use crate::error::ResultExt;

/// Search Discogs and print the normalized records
pub fn cmd_search(
    rt: &Runtime,
    settings: &Config,
    query: &str,
    token: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let token = resolve_token(token, settings)?;

    rt.block_on(async {
        let service = build_service(&token, settings)?;
        let cancel = cancel_on_ctrl_c();

        let fetched = service
            .search(query, &cancel)
            .await
            .with_context(format!("searching for {:?}", query))?;

        match fetched {
            Fetch::Ready(records) if records.is_empty() && !json => {
                println!("No vinyl releases found for {:?}", query);
            }
            Fetch::Ready(records) => {
                tracing::info!(query, count = records.len(), "Search finished");
                print_records(&records, json)?;
            }
            Fetch::Cancelled => eprintln!("Search cancelled"),
        }
        Ok::<(), anyhow::Error>(())
    })
}
