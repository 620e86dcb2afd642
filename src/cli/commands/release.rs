//! Release lookups by Discogs ID.

use tokio::runtime::Runtime;

use super::{build_service, cancel_on_ctrl_c, print_records, resolve_token};
use crate::catalog::Fetch;
use crate::config::Config;

/// Fetch every ID concurrently and print the records that resolved.
///
/// Fails if any lookup failed, after printing the ones that succeeded.
pub fn cmd_release(
    rt: &Runtime,
    settings: &Config,
    ids: &[String],
    token: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let token = resolve_token(token, settings)?;

    rt.block_on(async {
        let service = build_service(&token, settings)?;
        let cancel = cancel_on_ctrl_c();

        let service = &service;
        let cancel = &cancel;
        let lookups = ids.iter().map(|id| async move {
            (id.as_str(), service.fetch_by_id(id, cancel).await)
        });
        let results = futures::future::join_all(lookups).await;

        let mut records = Vec::with_capacity(results.len());
        let mut failed = 0;
        for (id, result) in results {
            match result {
                Ok(Fetch::Ready(record)) => records.push(record),
                Ok(Fetch::Cancelled) => {
                    eprintln!("Lookup cancelled");
                    return Ok(());
                }
                Err(e) => {
                    failed += 1;
                    tracing::warn!(id, error = %e, "Release lookup failed");
                    eprintln!("Release {}: {}", id, e);
                }
            }
        }

        print_records(&records, json)?;

        if failed > 0 {
            anyhow::bail!("{} of {} release lookups failed", failed, ids.len());
        }
        Ok::<(), anyhow::Error>(())
    })
}
