//! Catalog service - cancellable lookups for the app's search flow
//!
//! Each lookup is an independent unit of work that the caller can abandon.
//! A cancelled lookup resolves to [`Fetch::Cancelled`], which is not an
//! error: nothing is delivered and nothing needs to be shown to the user.
//!
//! [`SearchSession`] models the search box: typing a new query supersedes
//! the one in flight, and the API is only hit once input settles.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use super::domain::{CanonicalRecord, CatalogError};
use super::traits::CatalogApi;

/// Default quiet period before a typed query is sent
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Outcome of a lookup that may be cancelled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch<T> {
    Ready(T),
    Cancelled,
}

impl<T> Fetch<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Fetch::Ready(value) => Some(value),
            Fetch::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Fetch::Cancelled)
    }
}

/// Cancellable front end over any [`CatalogApi`]
#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn CatalogApi>,
}

impl CatalogService {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    /// Search, giving up silently if `cancel` fires first
    pub async fn search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Fetch<Vec<CanonicalRecord>>, CatalogError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(query, "Search cancelled");
                Ok(Fetch::Cancelled)
            }
            result = self.api.search(query) => result.map(Fetch::Ready),
        }
    }

    /// Fetch one release, giving up silently if `cancel` fires first
    pub async fn fetch_by_id(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Fetch<CanonicalRecord>, CatalogError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(id, "Release lookup cancelled");
                Ok(Fetch::Cancelled)
            }
            result = self.api.fetch_by_id(id) => result.map(Fetch::Ready),
        }
    }
}

/// What a search-box submission ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results for this query
    Results(Vec<CanonicalRecord>),
    /// The query was blank; the result list should be emptied
    Cleared,
    /// A newer query replaced this one before it finished
    Superseded,
}

/// Search box driver: latest query wins, input is debounced.
pub struct SearchSession {
    service: CatalogService,
    debounce: Duration,
    current: Mutex<Option<CancellationToken>>,
}

impl SearchSession {
    pub fn new(service: CatalogService, debounce: Duration) -> Self {
        Self {
            service,
            debounce,
            current: Mutex::new(None),
        }
    }

    /// Start a new generation, cancelling whatever was in flight
    pub fn begin(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.current.lock().replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Cancel the in-flight search, if any
    pub fn cancel(&self) {
        if let Some(previous) = self.current.lock().take() {
            previous.cancel();
        }
    }

    /// Submit the search box's current text
    pub async fn submit(&self, query: &str) -> Result<SearchOutcome, CatalogError> {
        let token = self.begin();

        if query.trim().is_empty() {
            return Ok(SearchOutcome::Cleared);
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => return Ok(SearchOutcome::Superseded),
            _ = tokio::time::sleep(self.debounce) => {}
        }

        tracing::debug!(query, "Debounce elapsed, searching");
        match self.service.search(query, &token).await? {
            Fetch::Ready(records) => Ok(SearchOutcome::Results(records)),
            Fetch::Cancelled => Ok(SearchOutcome::Superseded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::traits::mocks::MockCatalog;
    use crate::test_utils::mock_record;

    fn library() -> Vec<CanonicalRecord> {
        vec![
            mock_record("1", "Pink Floyd", "The Wall"),
            mock_record("2", "Pink Floyd", "Animals"),
            mock_record("3", "Can", "Tago Mago"),
        ]
    }

    #[tokio::test]
    async fn test_search_ready() {
        let service = CatalogService::new(Arc::new(MockCatalog::with_results(library())));
        let result = service
            .search("pink", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result.ready().map(|r| r.len()), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_search_is_not_an_error() {
        let mock = Arc::new(MockCatalog::with_results(library()).slow(Duration::from_secs(30)));
        let service = CatalogService::new(mock.clone());
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let result = service.search("pink", &token).await;
        assert_eq!(result, Ok(Fetch::Cancelled));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_rate_limit_wait() {
        use crate::catalog::discogs::DiscogsClient;
        use crate::catalog::transport::HttpResponse;
        use crate::catalog::transport::mocks::ScriptedTransport;
        use crate::test_utils::RELEASE_DETAIL_JSON;

        let transport = Arc::new(ScriptedTransport::new(vec![
            Ok(HttpResponse::new(429, "")),
            Ok(HttpResponse::new(200, RELEASE_DETAIL_JSON)),
        ]));
        let client = DiscogsClient::with_transport(transport.clone(), "t");
        let service = CatalogService::new(Arc::new(client));
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            canceller.cancel();
        });

        let start = tokio::time::Instant::now();
        let result = service.fetch_by_id("367113", &token).await;

        assert_eq!(result, Ok(Fetch::Cancelled));
        // Gave up during the 2 s back-off, before the retry went out
        assert!(start.elapsed() < Duration::from_secs(2));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_pre_cancelled_fetch_skips_api() {
        let mock = Arc::new(MockCatalog::with_results(library()));
        let service = CatalogService::new(mock.clone());
        let token = CancellationToken::new();
        token.cancel();

        let result = service.fetch_by_id("1", &token).await.unwrap();
        assert!(result.is_cancelled());
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_errors_still_surface() {
        let service = CatalogService::new(Arc::new(MockCatalog::with_error(
            CatalogError::Unreachable("offline".to_string()),
        )));
        let result = service.fetch_by_id("1", &CancellationToken::new()).await;
        assert!(matches!(result, Err(CatalogError::Unreachable(_))));
    }

    #[test]
    fn test_begin_cancels_previous_generation() {
        let session = SearchSession::new(
            CatalogService::new(Arc::new(MockCatalog::with_results(vec![]))),
            DEFAULT_DEBOUNCE,
        );
        let first = session.begin();
        let second = session.begin();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        session.cancel();
        assert!(second.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_debounces_then_searches() {
        let mock = Arc::new(MockCatalog::with_results(library()));
        let session = SearchSession::new(CatalogService::new(mock.clone()), DEFAULT_DEBOUNCE);

        let start = tokio::time::Instant::now();
        let outcome = session.submit("tago").await.unwrap();

        assert!(start.elapsed() >= DEFAULT_DEBOUNCE);
        assert!(matches!(outcome, SearchOutcome::Results(ref r) if r.len() == 1));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_query_clears_without_request() {
        let mock = Arc::new(MockCatalog::with_results(library()));
        let session = SearchSession::new(CatalogService::new(mock.clone()), DEFAULT_DEBOUNCE);

        assert_eq!(session.submit("   ").await, Ok(SearchOutcome::Cleared));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_query_supersedes_older() {
        let mock = Arc::new(MockCatalog::with_results(library()));
        let session = Arc::new(SearchSession::new(
            CatalogService::new(mock.clone()),
            DEFAULT_DEBOUNCE,
        ));

        let first = tokio::spawn({
            let session = session.clone();
            async move { session.submit("pink").await }
        });
        // Let the first submission reach its debounce wait
        tokio::time::sleep(Duration::from_millis(100)).await;

        let second = session.submit("pink floyd").await.unwrap();
        let first = first.await.unwrap().unwrap();

        assert_eq!(first, SearchOutcome::Superseded);
        assert!(matches!(second, SearchOutcome::Results(ref r) if r.len() == 2));
        // Only the surviving query reached the catalog
        assert_eq!(mock.calls(), 1);
    }
}
