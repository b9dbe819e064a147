//! Thumbnail retrieval.
//!
//! Downloads are best-effort: [`ImageFetcher`] turns every failure into
//! [`Thumbnail::Placeholder`] so a bad link never fails a search.

mod fetcher;
mod thumbnail;

pub use fetcher::{ImageFetcher, ThumbnailSource};
pub use thumbnail::{placeholder, DecodedImage, Thumbnail};
