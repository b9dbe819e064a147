//! Records produced by a catalog search.

use bookscout_common::Generation;
use serde::Serialize;

use crate::images::Thumbnail;

// ---------------------------------------------------------------------------
// Book
// ---------------------------------------------------------------------------

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    /// Display title.
    pub title: String,
    /// Authors in catalog order. Never empty: books listed without authors
    /// carry the configured "no author" text as their only entry.
    pub authors: Vec<String>,
    /// Average rating on a 0-5 scale. `0.0` when the catalog has no rating,
    /// which is indistinguishable from a real zero.
    pub rating: f64,
    /// Canonical link to the book's catalog page.
    pub info_url: String,
    /// Small thumbnail link, if the catalog lists one.
    pub thumbnail_url: Option<String>,
    /// Thumbnail image, filled in by enrichment.
    #[serde(skip)]
    pub thumbnail: Option<Thumbnail>,
}

impl Book {
    /// Authors joined with `", "`.
    pub fn author_line(&self) -> String {
        self.authors.join(", ")
    }
}

// ---------------------------------------------------------------------------
// CatalogResult
// ---------------------------------------------------------------------------

/// Outcome of one completed search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogResult {
    /// Match count reported by the server. May exceed `books.len()` both
    /// because only one page is fetched and because unparsable items are
    /// dropped.
    pub total_items: u64,
    /// Books in server response order.
    pub books: Vec<Book>,
    /// Run that produced this result.
    pub generation: Generation,
}

impl CatalogResult {
    /// A result with no matches.
    pub fn empty(total_items: u64) -> Self {
        Self {
            total_items,
            books: Vec::new(),
            generation: Generation::ZERO,
        }
    }

    /// `true` when the search succeeded but produced no books.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
