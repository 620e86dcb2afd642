//! Discogs database API integration
//!
//! Searches vinyl releases and fetches release details, normalizing both into
//! [`CanonicalRecord`](crate::catalog::CanonicalRecord)s.
//!
//! API docs: https://www.discogs.com/developers

mod adapter;
mod auth;
mod client;
pub mod dto;

pub use auth::AuthScheme;
pub use client::{DEFAULT_BASE_URL, DiscogsClient, MAX_PER_PAGE, RetryPolicy};
