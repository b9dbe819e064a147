//! Decoding of the volumes search response.
//!
//! The top-level envelope is strict: without an integer `totalItems` (and an
//! `items` array whenever matches exist) the whole payload is rejected. Items
//! are lenient: each one is decoded on its own, optional fields fall back to
//! defaults, and an item lacking a title or canonical link is dropped without
//! affecting its neighbours.

use bookscout_common::{Error, Generation, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::types::{Book, CatalogResult};
use crate::config::DEFAULT_NO_AUTHOR;

// ---------------------------------------------------------------------------
// Response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    total_items: u64,
    items: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    canonical_volume_link: Option<String>,
    authors: Option<Value>,
    image_links: Option<Value>,
    average_rating: Option<Value>,
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parser for volumes search responses.
#[derive(Debug, Clone)]
pub struct CatalogParser {
    no_author: String,
}

impl Default for CatalogParser {
    fn default() -> Self {
        Self::new(DEFAULT_NO_AUTHOR)
    }
}

impl CatalogParser {
    /// `no_author` is the author entry given to books listed without authors.
    pub fn new(no_author: impl Into<String>) -> Self {
        Self {
            no_author: no_author.into(),
        }
    }

    /// Parse a response body.
    ///
    /// The returned result carries [`Generation::ZERO`]; the caller stamps the
    /// run's generation.
    pub fn parse(&self, body: &[u8]) -> Result<CatalogResult> {
        let response: VolumesResponse = serde_json::from_slice(body)
            .map_err(|e| Error::parse(format!("invalid volumes response: {e}")))?;

        if response.total_items == 0 {
            return Ok(CatalogResult::empty(0));
        }

        let items = response.items.ok_or_else(|| {
            Error::parse(format!(
                "response reports {} matches but has no `items` array",
                response.total_items
            ))
        })?;

        let item_count = items.len();
        let books: Vec<Book> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| self.parse_item(index, item))
            .collect();

        if books.len() < item_count {
            debug!(
                parsed = books.len(),
                skipped = item_count - books.len(),
                "Dropped catalog items missing required fields"
            );
        }

        Ok(CatalogResult {
            total_items: response.total_items,
            books,
            generation: Generation::ZERO,
        })
    }

    fn parse_item(&self, index: usize, item: Value) -> Option<Book> {
        let volume: Volume = match serde_json::from_value(item) {
            Ok(volume) => volume,
            Err(e) => {
                debug!(index, error = %e, "Skipping undecodable catalog item");
                return None;
            }
        };

        let Some(info) = volume.volume_info else {
            debug!(index, "Skipping catalog item without volumeInfo");
            return None;
        };
        let Some(title) = info.title else {
            debug!(index, "Skipping catalog item without title");
            return None;
        };
        let Some(info_url) = info.canonical_volume_link else {
            debug!(index, title = %title, "Skipping catalog item without canonical link");
            return None;
        };

        Some(Book {
            title,
            authors: self.authors(info.authors.as_ref()),
            rating: rating(info.average_rating.as_ref()),
            info_url,
            thumbnail_url: small_thumbnail(info.image_links.as_ref()),
            thumbnail: None,
        })
    }

    fn authors(&self, value: Option<&Value>) -> Vec<String> {
        let authors: Vec<String> = value
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        if authors.is_empty() {
            vec![self.no_author.clone()]
        } else {
            authors
        }
    }
}

/// Numeric `averageRating`, or `0.0`.
fn rating(value: Option<&Value>) -> f64 {
    value.and_then(Value::as_f64).unwrap_or(0.0)
}

/// `imageLinks.smallThumbnail`, if present as a string.
fn small_thumbnail(value: Option<&Value>) -> Option<String> {
    value
        .and_then(|links| links.get("smallThumbnail"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}
