//! HTTP transport used by catalog clients.
//!
//! The request pipeline only needs "send this GET, give me status and body".
//! Keeping that behind [`HttpTransport`] lets tests script upstream
//! responses (429 storms, malformed bodies) without a network.

use std::error::Error as StdError;
use std::io;
use std::time::Duration;

use async_trait::async_trait;

use super::domain::CatalogError;

/// A fully built GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: reqwest::Url,
    pub headers: Vec<(&'static str, String)>,
}

/// Status and raw body of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Executes a single HTTP exchange.
///
/// Implementations map transport failures to [`CatalogError::Unreachable`]
/// or [`CatalogError::Transport`]; any HTTP status is a successful exchange.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, CatalogError>;
}

/// Production transport backed by reqwest
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, CatalogError> {
        let mut builder = self.http_client.get(request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.send().await.map_err(classify_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_reqwest_error)?;

        Ok(HttpResponse { status, body })
    }
}

/// Split connectivity loss from every other transport failure.
///
/// Only socket-level failures count as offline. A failed DNS lookup is
/// reported as [`CatalogError::Transport`] even though a device without a
/// network usually fails there first: the resolver error looks the same
/// whether the network is down or the host name is wrong.
fn classify_reqwest_error(error: reqwest::Error) -> CatalogError {
    if error.is_timeout() {
        return CatalogError::Transport(format!("request timed out: {error}"));
    }

    if let Some(kind) = io_error_kind(&error)
        && is_connectivity_loss(kind)
    {
        return CatalogError::Unreachable(error.to_string());
    }

    CatalogError::Transport(error.to_string())
}

/// Find the innermost I/O error kind in an error's source chain
fn io_error_kind(error: &(dyn StdError + 'static)) -> Option<io::ErrorKind> {
    let mut current: Option<&(dyn StdError + 'static)> = Some(error);
    let mut kind = None;
    while let Some(err) = current {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            kind = Some(io_err.kind());
        }
        current = err.source();
    }
    kind
}

fn is_connectivity_loss(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof
            | io::ErrorKind::NetworkUnreachable
            | io::ErrorKind::HostUnreachable
            | io::ErrorKind::NetworkDown
    )
}
