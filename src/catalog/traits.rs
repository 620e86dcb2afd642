//! Trait definition for catalog lookups.
//!
//! The service layer and CLI depend on [`CatalogApi`] rather than on the
//! Discogs client directly, so tests can substitute a mock catalog.

use async_trait::async_trait;

use super::discogs::DiscogsClient;
use super::domain::{CanonicalRecord, CatalogError};

/// The two operations the rest of the app needs from a music catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Search releases and return normalized records in upstream order.
    async fn search(&self, query: &str) -> Result<Vec<CanonicalRecord>, CatalogError>;

    /// Fetch one release; the record's `external_id` is `id`.
    async fn fetch_by_id(&self, id: &str) -> Result<CanonicalRecord, CatalogError>;
}

#[async_trait]
impl CatalogApi for DiscogsClient {
    async fn search(&self, query: &str) -> Result<Vec<CanonicalRecord>, CatalogError> {
        DiscogsClient::search(self, query).await
    }

    async fn fetch_by_id(&self, id: &str) -> Result<CanonicalRecord, CatalogError> {
        DiscogsClient::fetch_by_id(self, id).await
    }
}
