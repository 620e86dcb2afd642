//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`CatalogError`](crate::catalog::CatalogError),
//! [`ConfigError`](crate::config::ConfigError)), while the binary uses
//! `anyhow` for convenient error propagation.
//!
//! # Example
//!
//! ```ignore
//! use vinyl_vault::error::{Result, ResultExt};
//!
//! fn lookup(client: &DiscogsClient) -> Result<()> {
//!     let record = rt.block_on(client.fetch_by_id("367113"))
//!         .with_context("fetching release 367113")?;
//!     Ok(())
//! }
//! ```

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Catalog lookup failed
    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::catalog::CatalogError),

    /// Reading or writing the config file failed
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// No Discogs credentials anywhere
    #[error("No Discogs token configured (use --token, DISCOGS_TOKEN or the config file)")]
    MissingCredentials,

    /// Output could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, crate::catalog::CatalogError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Catalog(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;

    #[test]
    fn test_error_with_context() {
        let err = Error::MissingCredentials.context("while searching");
        let msg = err.to_string();
        assert!(msg.contains("while searching"));
        assert!(msg.contains("DISCOGS_TOKEN"));
    }

    #[test]
    fn test_catalog_result_ext() {
        let result: std::result::Result<(), CatalogError> = Err(CatalogError::Upstream {
            status: 404,
            body: "Release not found.".to_string(),
        });
        let err = result.with_context("fetching release 0").unwrap_err();

        assert!(err.to_string().starts_with("fetching release 0"));
        match err {
            Error::WithContext { source, .. } => {
                assert!(matches!(*source, Error::Catalog(ref e) if e.status() == Some(404)));
            }
            other => panic!("expected context wrapper, got {other:?}"),
        }
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(Error::MissingCredentials);
        let with_ctx = result.with_context("additional context");
        assert!(with_ctx.unwrap_err().to_string().contains("additional context"));
    }
}
