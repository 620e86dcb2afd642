//! Adapter layer: Convert Discogs DTOs to domain models
//!
//! This is the ONLY place where Discogs DTO types are converted to domain types.
//! If Discogs changes their response format, only this file and dto.rs need to change.

use std::collections::BTreeSet;

use super::dto;
use crate::catalog::domain::{
    CanonicalRecord, CatalogError, MAX_TAG_LEN, PLACEHOLDER_IMAGE, RecordFormat, UNKNOWN_ARTIST,
    UNKNOWN_TITLE,
};

/// Separator Discogs uses inside combined "Artist - Title" strings
const TITLE_SEPARATOR: &str = " - ";

/// Convert a search response into records, preserving upstream order.
///
/// A hit without an identifier fails the whole conversion; callers never
/// see a partial list.
pub fn to_records(response: dto::SearchResponse) -> Result<Vec<CanonicalRecord>, CatalogError> {
    response
        .results
        .into_iter()
        .enumerate()
        .map(|(index, result)| to_record(result, index))
        .collect()
}

fn to_record(result: dto::SearchResult, index: usize) -> Result<CanonicalRecord, CatalogError> {
    let external_id = result.id.external_id().ok_or_else(|| {
        CatalogError::Decode(format!("search result {index} has no release id"))
    })?;

    let (artist, title) = split_artist_title(&result.title);
    let format = RecordFormat::classify(result.format.iter().flatten());
    let image_url = first_image([result.thumb.as_deref(), result.cover_image.as_deref()]);

    Ok(CanonicalRecord {
        title,
        artist: artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        year: result.year.year(),
        format,
        tags: BTreeSet::new(),
        image_url,
        external_id,
    })
}

/// Convert a release detail into a record.
///
/// `release_id` is the identifier the caller asked for and is carried
/// through unchanged, whatever the payload says.
pub fn to_detail_record(release: dto::ReleaseDetails, release_id: &str) -> CanonicalRecord {
    // Credits win for the artist; the title is always the split half
    let (split_artist, title) = split_artist_title(&release.title);
    let artist = release
        .artists
        .as_deref()
        .and_then(build_artist_string)
        .or(split_artist)
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    let format = release
        .formats
        .as_ref()
        .and_then(|formats| formats.first())
        .map(|first| {
            let tokens = first
                .name
                .iter()
                .chain(first.descriptions.iter().flatten());
            RecordFormat::classify(tokens)
        })
        .unwrap_or_default();

    let tags = build_tags(
        release.genres.iter().flatten().chain(release.styles.iter().flatten()),
    );

    let image_url = first_image([release
        .images
        .as_ref()
        .and_then(|images| images.first())
        .and_then(|image| image.resource_url.as_deref())]);

    CanonicalRecord {
        title,
        artist,
        year: release.year.year(),
        format,
        tags,
        image_url,
        external_id: release_id.to_string(),
    }
}

/// Split "Artist - Title" on the first separator.
///
/// Returns `(None, title)` when there is no separator or the artist half is
/// blank. The title is never empty.
fn split_artist_title(raw: &str) -> (Option<String>, String) {
    match raw.split_once(TITLE_SEPARATOR) {
        Some((artist, title)) => {
            let artist = artist.trim();
            let artist = (!artist.is_empty()).then(|| artist.to_string());
            (artist, clean_title(title))
        }
        None => (None, clean_title(raw)),
    }
}

fn clean_title(raw: &str) -> String {
    let title = raw.trim();
    if title.is_empty() {
        UNKNOWN_TITLE.to_string()
    } else {
        title.to_string()
    }
}

/// Build a display artist from credits, e.g. "Simon & Garfunkel".
///
/// Returns `None` when the credits produce nothing printable.
fn build_artist_string(credits: &[dto::ArtistCredit]) -> Option<String> {
    let mut result = String::new();
    let mut pending_join: Option<&str> = None;

    for credit in credits {
        let name = strip_disambiguator(credit.name.trim());
        if name.is_empty() {
            continue;
        }

        if !result.is_empty() {
            match pending_join.map(str::trim) {
                Some(",") | Some("") | None => result.push_str(", "),
                Some(join) => {
                    result.push(' ');
                    result.push_str(join);
                    result.push(' ');
                }
            }
        }
        result.push_str(name);
        pending_join = credit.join.as_deref();
    }

    (!result.is_empty()).then_some(result)
}

/// Drop Discogs' numeric disambiguator: "Nirvana (2)" -> "Nirvana"
fn strip_disambiguator(name: &str) -> &str {
    let Some(stripped) = name.strip_suffix(')') else {
        return name;
    };
    let Some(open) = stripped.rfind(" (") else {
        return name;
    };
    let number = &stripped[open + 2..];
    if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
        stripped[..open].trim_end()
    } else {
        name
    }
}

/// Merge genre/style lists into a lower-cased, deduplicated tag set
fn build_tags<'a>(entries: impl Iterator<Item = &'a String>) -> BTreeSet<String> {
    entries
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let lowered = truncate_chars(entry, MAX_TAG_LEN).to_lowercase();
            // Lower-casing can grow a few characters (e.g. 'İ')
            truncate_chars(&lowered, MAX_TAG_LEN).to_string()
        })
        .collect()
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

/// First non-empty URL among the candidates, else the placeholder
fn first_image<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> String {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string()
}
