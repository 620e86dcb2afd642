//! Internal domain models for catalog lookups.
//!
//! These types are OUR types - they don't change when the Discogs API changes.
//! Every upstream response is converted into a [`CanonicalRecord`] by an adapter.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Artist used when none can be recovered from the upstream payload
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Title used when the upstream title is blank
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Image reference the app renders as its bundled placeholder sleeve
pub const PLACEHOLDER_IMAGE: &str = "default-album";

/// Maximum length of a single tag, in characters
pub const MAX_TAG_LEN: usize = 50;

/// Physical release category of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RecordFormat {
    #[default]
    #[serde(rename = "LP")]
    Lp,
    #[serde(rename = "EP")]
    Ep,
    Single,
}

impl RecordFormat {
    /// Classify a release from free-text format tokens.
    ///
    /// Matching is by substring over every token: "single" wins, then "ep",
    /// otherwise LP. Discogs descriptions that merely contain the letters
    /// (e.g. "Repress") therefore count as EP.
    /// An empty token list is an LP.
    pub fn classify<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lowered: Vec<String> = tokens
            .into_iter()
            .map(|t| t.as_ref().to_lowercase())
            .collect();

        if lowered.iter().any(|t| t.contains("single")) {
            return RecordFormat::Single;
        }

        if lowered.iter().any(|t| t.contains("ep")) {
            return RecordFormat::Ep;
        }

        RecordFormat::Lp
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordFormat::Lp => "LP",
            RecordFormat::Ep => "EP",
            RecordFormat::Single => "Single",
        }
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A music release in the app's canonical shape, independent of the catalog it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    /// Release title (trimmed, never empty)
    pub title: String,
    /// Artist name (trimmed, never empty)
    pub artist: String,
    /// Release year, when upstream knows it
    pub year: Option<i32>,
    /// LP / EP / Single
    pub format: RecordFormat,
    /// Lower-cased genre and style tags
    pub tags: BTreeSet<String>,
    /// Artwork URL or [`PLACEHOLDER_IMAGE`]
    pub image_url: String,
    /// Identifier in the upstream catalog
    pub external_id: String,
}

impl CanonicalRecord {
    /// Add a user-supplied tag using the same rules as normalization.
    ///
    /// Returns `false` when the tag is blank, too long or already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let normalized = tag.trim().to_lowercase();
        if normalized.is_empty() || normalized.chars().count() > MAX_TAG_LEN {
            return false;
        }
        self.tags.insert(normalized)
    }

    /// Remove a tag, ignoring case
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(&tag.trim().to_lowercase())
    }
}

/// Errors that can occur while talking to the catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("No internet connection. Please check your network settings.")]
    Unreachable(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Consumed by the request pipeline's retry loop; callers see
    /// `Upstream { status: 429, .. }` once the retry budget is spent.
    #[error("Too many requests. Please try again in a moment.")]
    RateLimited,
}

impl CatalogError {
    /// True when the failure is about connectivity rather than the request itself
    pub fn is_offline(&self) -> bool {
        matches!(self, CatalogError::Unreachable(_))
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Upstream { status, .. } => Some(*status),
            CatalogError::RateLimited => Some(429),
            _ => None,
        }
    }
}
