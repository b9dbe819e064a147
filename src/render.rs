//! Text and JSON presentation of search outcomes for the command line.

use bookscout_common::{Error, Generation};
use serde::Serialize;
use std::fmt::Write;

use crate::catalog::{Book, CatalogResult};

/// Shown instead of results when a run fails.
pub const FAILURE_MESSAGE: &str = "Problem retrieving results";
/// Shown when a run succeeds without matches.
pub const EMPTY_MESSAGE: &str = "No books found";

/// Render a run outcome as human-readable text.
pub fn render_text(outcome: &Result<CatalogResult, Error>) -> String {
    let result = match outcome {
        Ok(result) => result,
        Err(e) => return format!("{FAILURE_MESSAGE}: {e}\n"),
    };

    let mut out = String::new();
    let _ = writeln!(out, "Total results: {}", result.total_items);

    if result.is_empty() {
        let _ = writeln!(out, "{EMPTY_MESSAGE}");
        return out;
    }

    for (i, book) in result.books.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{:>2}. {}", i + 1, book.title);
        let _ = writeln!(out, "    by {}", book.author_line());
        let _ = writeln!(out, "    rating: {:.1}/5", book.rating);
        let _ = writeln!(out, "    {}", book.info_url);
        let _ = writeln!(out, "    thumbnail: {}", thumbnail_label(book));
    }

    out
}

fn thumbnail_label(book: &Book) -> String {
    match &book.thumbnail {
        Some(thumb) if !thumb.is_placeholder() => {
            let img = thumb.image();
            format!("{}x{} {:?}", img.width, img.height, img.format)
        }
        Some(_) | None => "placeholder".to_string(),
    }
}

// ---------------------------------------------------------------------------
// JSON summary
// ---------------------------------------------------------------------------

/// Serializable view of a delivered run.
#[derive(Debug, Serialize)]
pub struct SearchSummary<'a> {
    pub generation: Generation,
    #[serde(flatten)]
    pub outcome: SummaryOutcome<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryOutcome<'a> {
    Ok {
        total_items: u64,
        books: Vec<BookSummary<'a>>,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Serialize)]
pub struct BookSummary<'a> {
    #[serde(flatten)]
    pub book: &'a Book,
    pub author_line: String,
    pub thumbnail: ThumbnailSummary,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThumbnailSummary {
    Image { width: u32, height: u32, bytes: usize },
    Placeholder,
}

impl<'a> SearchSummary<'a> {
    pub fn new(generation: Generation, outcome: &'a Result<CatalogResult, Error>) -> Self {
        let outcome = match outcome {
            Ok(result) => SummaryOutcome::Ok {
                total_items: result.total_items,
                books: result.books.iter().map(BookSummary::new).collect(),
            },
            Err(e) => SummaryOutcome::Failed {
                error: e.to_string(),
            },
        };
        Self {
            generation,
            outcome,
        }
    }
}

impl<'a> BookSummary<'a> {
    fn new(book: &'a Book) -> Self {
        let thumbnail = match &book.thumbnail {
            Some(thumb) if !thumb.is_placeholder() => {
                let img = thumb.image();
                ThumbnailSummary::Image {
                    width: img.width,
                    height: img.height,
                    bytes: img.bytes.len(),
                }
            }
            Some(_) | None => ThumbnailSummary::Placeholder,
        };

        Self {
            book,
            author_line: book.author_line(),
            thumbnail,
        }
    }
}
