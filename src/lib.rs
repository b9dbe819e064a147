//! Bookscout - book catalog search with thumbnail enrichment
//!
//! A search fetches one page of the catalog's volumes endpoint, decodes it
//! into [`Book`] records, and downloads every book's thumbnail concurrently.
//! [`SearchPipeline`] runs searches in the background and only ever delivers
//! the newest one.

pub mod catalog;
pub mod config;
pub mod images;
pub mod pipeline;
pub mod render;

pub use bookscout_common::{Error, Generation, MaxResults, Result};
pub use catalog::{Book, CatalogResult};
pub use images::Thumbnail;
pub use pipeline::{RunPhase, SearchDelivery, SearchPipeline};
