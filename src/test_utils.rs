//! Test utilities and fixtures for vinyl-vault tests.
//!
//! Payload fixtures are trimmed copies of real Discogs responses, keeping
//! the fields the adapter reads plus a few it ignores.

use std::collections::BTreeSet;

use crate::catalog::{CanonicalRecord, RecordFormat};

/// `/database/search?q=...&type=release&format=Vinyl` response with three hits:
/// a combined-title LP, a 7" single, and a string-id result with no separator.
pub const SEARCH_RESPONSE_JSON: &str = r#"{
    "pagination": {"page": 1, "pages": 1, "per_page": 40, "items": 3, "urls": {}},
    "results": [
        {
            "id": 1873013,
            "type": "release",
            "title": "Pink Floyd - The Wall",
            "year": "1979",
            "country": "UK",
            "thumb": "https://i.discogs.com/the-wall-150.jpg",
            "cover_image": "https://i.discogs.com/the-wall.jpg",
            "format": ["Vinyl", "LP", "Album"],
            "genre": ["Rock"],
            "style": ["Prog Rock"],
            "resource_url": "https://api.discogs.com/releases/1873013"
        },
        {
            "id": 7097051,
            "type": "release",
            "title": "Nirvana - Smells Like Teen Spirit",
            "year": "1991",
            "thumb": "",
            "cover_image": "",
            "format": ["Vinyl", "7\"", "45 RPM", "Single"]
        },
        {
            "id": "3315342",
            "type": "release",
            "title": "Voyager",
            "format": ["Vinyl", "LP"]
        }
    ]
}"#;

/// `/releases/367113` response
pub const RELEASE_DETAIL_JSON: &str = r#"{
    "id": 367113,
    "status": "Accepted",
    "year": 1991,
    "resource_url": "https://api.discogs.com/releases/367113",
    "artists": [
        {
            "name": "Nirvana",
            "anv": "",
            "join": "",
            "role": "",
            "id": 125246,
            "resource_url": "https://api.discogs.com/artists/125246"
        }
    ],
    "artists_sort": "Nirvana",
    "title": "Nevermind",
    "genres": ["Rock"],
    "styles": ["Grunge", "Alternative Rock"],
    "formats": [
        {"name": "Vinyl", "qty": "1", "descriptions": ["LP", "Album", "Reissue"]}
    ],
    "images": [
        {
            "type": "primary",
            "uri": "https://i.discogs.com/nevermind.jpg",
            "resource_url": "https://i.discogs.com/nevermind-primary.jpg",
            "uri150": "https://i.discogs.com/nevermind-150.jpg",
            "width": 600,
            "height": 600
        }
    ]
}"#;

/// Creates a CanonicalRecord with sensible defaults.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let record = CanonicalRecord {
///     year: Some(1979),
///     ..mock_record("1", "Pink Floyd", "The Wall")
/// };
/// ```
pub fn mock_record(id: &str, artist: &str, title: &str) -> CanonicalRecord {
    CanonicalRecord {
        title: title.to_string(),
        artist: artist.to_string(),
        year: None,
        format: RecordFormat::Lp,
        tags: BTreeSet::new(),
        image_url: crate::catalog::domain::PLACEHOLDER_IMAGE.to_string(),
        external_id: id.to_string(),
    }
}
