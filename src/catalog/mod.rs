//! Catalog module - looks up vinyl releases in an external music catalog.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - [`CanonicalRecord`] and [`CatalogError`]
//! - **API DTOs** (`discogs/dto.rs`) - Exact Discogs response shapes
//! - **Adapter** (`discogs/adapter.rs`) - Converts DTOs to domain models
//! - **Client** (`discogs/client.rs`) - Request pipeline with rate-limit retry
//! - **Transport** (`transport.rs`) - The HTTP exchange, behind a trait
//! - **Service** (`service.rs`) - Cancellable lookups and the search session
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use vinyl_vault::catalog::{CatalogService, DiscogsClient, Fetch};
//!
//! let client = DiscogsClient::new("key:secret")?;
//! let service = CatalogService::new(Arc::new(client));
//!
//! let cancel = CancellationToken::new();
//! if let Fetch::Ready(records) = service.search("nevermind", &cancel).await? {
//!     for record in records {
//!         println!("{} - {} ({})", record.artist, record.title, record.format);
//!     }
//! }
//! ```

pub mod discogs;
pub mod domain;
pub mod service;
pub mod traits;
pub mod transport;

pub use discogs::{DiscogsClient, RetryPolicy};
pub use domain::{CanonicalRecord, CatalogError, RecordFormat};
pub use service::{CatalogService, Fetch, SearchOutcome, SearchSession};
pub use traits::CatalogApi;
