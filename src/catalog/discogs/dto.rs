//! Discogs API Data Transfer Objects
//!
//! These types match what the Discogs database API returns.
//! DO NOT use these types outside the discogs module - convert to domain types.
//!
//! API Reference: https://www.discogs.com/developers
//!
//! Only the fields the adapter consumes are declared, plus `pagination`,
//! which the contract tests check; serde ignores the rest.
//! Discogs field names are already snake_case, which is also ours.

use serde::Deserialize;

/// A field Discogs sends sometimes as a number and sometimes as a string.
///
/// `null` and a missing field both decode to `Absent`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(untagged)]
pub enum LooseScalar {
    Integer(i64),
    Text(String),
    #[default]
    Absent,
}

impl LooseScalar {
    /// Interpret as a release year.
    ///
    /// Numeric strings are parsed; anything unparseable is `None`, never an
    /// error. Discogs reports an unknown year as `0`, so non-positive values
    /// are treated as absent too.
    pub fn year(&self) -> Option<i32> {
        let year = match self {
            LooseScalar::Integer(n) => i32::try_from(*n).ok(),
            LooseScalar::Text(s) => s.trim().parse::<i32>().ok(),
            LooseScalar::Absent => None,
        }?;
        (year > 0).then_some(year)
    }

    /// Interpret as an identifier, keeping its decimal form for numbers
    pub fn external_id(&self) -> Option<String> {
        match self {
            LooseScalar::Integer(n) => Some(n.to_string()),
            LooseScalar::Text(s) if !s.trim().is_empty() => Some(s.clone()),
            LooseScalar::Text(_) | LooseScalar::Absent => None,
        }
    }
}

/// `/database/search` response
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Paging block included with every search
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    pub page: Option<u32>,
    pub pages: Option<u32>,
    pub per_page: Option<u32>,
    pub items: Option<u32>,
}

/// One hit from a release search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    /// Release ID
    #[serde(default)]
    pub id: LooseScalar,
    /// "Artist - Title" combined string
    pub title: String,
    /// Year as a string, e.g. "1979"
    #[serde(default)]
    pub year: LooseScalar,
    /// Small artwork URL ("" when the release has no images)
    pub thumb: Option<String>,
    /// Large artwork URL ("" when the release has no images)
    pub cover_image: Option<String>,
    /// Format tokens, e.g. ["Vinyl", "LP", "Album"]
    pub format: Option<Vec<String>>,
}

/// `/releases/{id}` response
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseDetails {
    #[serde(default)]
    pub id: LooseScalar,
    pub title: String,
    pub artists: Option<Vec<ArtistCredit>>,
    #[serde(default)]
    pub year: LooseScalar,
    pub genres: Option<Vec<String>>,
    pub styles: Option<Vec<String>>,
    pub formats: Option<Vec<Format>>,
    pub images: Option<Vec<Image>>,
}

/// Artist credit on a release
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistCredit {
    /// Artist name, possibly with a numeric disambiguator like "Nirvana (2)"
    pub name: String,
    /// Join phrase to the next credit ("&", ",", "Feat.", or "")
    pub join: Option<String>,
}

/// Physical format entry
#[derive(Debug, Clone, Deserialize)]
pub struct Format {
    /// Medium, e.g. "Vinyl"
    pub name: Option<String>,
    /// e.g. ["7\"", "45 RPM", "Single"]
    pub descriptions: Option<Vec<String>>,
}

/// Release image
#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    /// Full-size image URL
    pub resource_url: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
