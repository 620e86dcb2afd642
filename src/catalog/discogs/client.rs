//! Discogs HTTP client
//!
//! Handles communication with the Discogs database API.
//! See: https://www.discogs.com/developers
//!
//! ## API Quirks
//!
//! ### Rate limiting
//! Discogs allows 60 authenticated requests per minute and answers `429` when
//! a client goes over. A throttled request is retried after a fixed delay,
//! at most `rate_limit_retries` times; after that the 429 is returned to
//! the caller as an ordinary upstream error.
//!
//! ### Credentials in the query string
//! Both credential styles (consumer key/secret and personal token) are sent
//! as query parameters, so request URLs contain secrets. Only paths are logged.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::auth::AuthScheme;
use super::{adapter, dto};
use crate::catalog::domain::{CanonicalRecord, CatalogError};
use crate::catalog::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::config::CatalogConfig;

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://api.discogs.com";

/// Discogs caps search pages at this size for our use
pub const MAX_PER_PAGE: u32 = 40;

/// Discogs asks every client to identify itself
const USER_AGENT: &str = concat!(
    "VinylVault/",
    env!("CARGO_PKG_VERSION"),
    " +https://github.com/vinyl-vault/vinyl-vault"
);

/// What to do when Discogs answers 429
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed per request after the first attempt
    pub max_retries: u32,
    /// Fixed pause before each retry
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            delay: Duration::from_secs(2),
        }
    }
}

/// Discogs API client.
///
/// Immutable once built; clones share the underlying connection pool and can
/// be used from concurrent tasks.
#[derive(Clone)]
pub struct DiscogsClient {
    transport: Arc<dyn HttpTransport>,
    auth: AuthScheme,
    base_url: String,
    retry: RetryPolicy,
    per_page: u32,
}

impl DiscogsClient {
    /// Create a client with default settings for the given credential string
    pub fn new(token: &str) -> Result<Self, CatalogError> {
        Self::from_config(token, &CatalogConfig::default())
    }

    /// Create a client from the `[catalog]` config section
    pub fn from_config(token: &str, config: &CatalogConfig) -> Result<Self, CatalogError> {
        let transport = ReqwestTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_transport(Arc::new(transport), token)
            .with_base_url(&config.base_url)
            .with_retry_policy(RetryPolicy {
                max_retries: config.rate_limit_retries,
                delay: Duration::from_millis(config.rate_limit_delay_ms),
            })
            .with_per_page(config.per_page))
    }

    /// Create a client on top of an arbitrary transport
    pub fn with_transport(transport: Arc<dyn HttpTransport>, token: &str) -> Self {
        Self {
            transport,
            auth: AuthScheme::parse(token),
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
            per_page: MAX_PER_PAGE,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Page size for searches, clamped to 1..=40
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    /// Search vinyl releases and return normalized records in upstream order
    pub async fn search(&self, query: &str) -> Result<Vec<CanonicalRecord>, CatalogError> {
        let response: dto::SearchResponse = self.send_search_request(query).await?;
        let records = adapter::to_records(response)?;
        tracing::debug!(query, count = records.len(), "Search complete");
        Ok(records)
    }

    /// Fetch one release by its Discogs ID
    pub async fn fetch_by_id(&self, release_id: &str) -> Result<CanonicalRecord, CatalogError> {
        let release: dto::ReleaseDetails = self.send_release_request(release_id).await?;
        Ok(adapter::to_detail_record(release, release_id))
    }

    async fn send_search_request(&self, query: &str) -> Result<dto::SearchResponse, CatalogError> {
        let request = self.search_request(query)?;
        self.execute(&request).await
    }

    async fn send_release_request(
        &self,
        release_id: &str,
    ) -> Result<dto::ReleaseDetails, CatalogError> {
        let request = self.release_request(release_id)?;
        self.execute(&request).await
    }

    fn search_request(&self, query: &str) -> Result<HttpRequest, CatalogError> {
        if query.trim().is_empty() {
            return Err(CatalogError::InvalidRequest(
                "search query must not be empty".to_string(),
            ));
        }

        let per_page = self.per_page.to_string();
        let params = [
            ("q", query),
            ("type", "release"),
            ("format", "Vinyl"),
            ("per_page", per_page.as_str()),
        ];
        self.build_request("/database/search", &params)
    }

    fn release_request(&self, release_id: &str) -> Result<HttpRequest, CatalogError> {
        if release_id.trim().is_empty() {
            return Err(CatalogError::InvalidRequest(
                "release id must not be empty".to_string(),
            ));
        }
        // "." and ".." survive percent-encoding and would be resolved as path segments
        if release_id.chars().all(|c| c == '.') {
            return Err(CatalogError::InvalidRequest(format!(
                "invalid release id {:?}",
                release_id
            )));
        }

        let path = format!("/releases/{}", urlencoding::encode(release_id));
        self.build_request(&path, &[])
    }

    /// Assemble URL, credentials and headers for a GET
    fn build_request(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<HttpRequest, CatalogError> {
        let query = params
            .iter()
            .copied()
            .chain(self.auth.query_pairs())
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let raw = format!("{}{}?{}", self.base_url, path, query);
        let url = reqwest::Url::parse(&raw)
            .map_err(|e| CatalogError::InvalidRequest(format!("{path}: {e}")))?;

        Ok(HttpRequest {
            url,
            headers: vec![
                ("Accept", "application/json".to_string()),
                ("User-Agent", USER_AGENT.to_string()),
            ],
        })
    }

    /// Send a request, retrying on 429 within the retry budget, and decode the body
    async fn execute<T: DeserializeOwned>(&self, request: &HttpRequest) -> Result<T, CatalogError> {
        let path = request.url.path();
        let mut retries = 0;

        loop {
            tracing::debug!(path, attempt = retries + 1, "Sending request");
            let response = self.transport.get(request).await?;

            match check_status(&response) {
                Ok(()) => {
                    return serde_json::from_str(&response.body).map_err(|e| {
                        tracing::warn!(path, "Undecodable response: {}", e);
                        CatalogError::Decode(e.to_string())
                    });
                }
                Err(CatalogError::RateLimited) if retries < self.retry.max_retries => {
                    retries += 1;
                    tracing::warn!(
                        path,
                        "Rate limited, retrying in {:?} ({}/{})",
                        self.retry.delay,
                        retries,
                        self.retry.max_retries
                    );
                    tokio::time::sleep(self.retry.delay).await;
                }
                Err(CatalogError::RateLimited) => {
                    tracing::warn!(path, "Still rate limited, giving up");
                    return Err(CatalogError::Upstream {
                        status: response.status,
                        body: response.body,
                    });
                }
                Err(e) => {
                    tracing::warn!(path, "Request failed: {}", e);
                    return Err(e);
                }
            }
        }
    }
}

/// Map an HTTP status to success, the internal rate-limit signal, or an upstream error
fn check_status(response: &HttpResponse) -> Result<(), CatalogError> {
    match response.status {
        200..=299 => Ok(()),
        429 => Err(CatalogError::RateLimited),
        status => Err(CatalogError::Upstream {
            status,
            body: response.body.clone(),
        }),
    }
}
