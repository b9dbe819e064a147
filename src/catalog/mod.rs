//! Book catalog access: request building, the HTTP client, and the
//! volumes-response parser.
//!
//! # Module layout
//!
//! - [`types`] -- [`Book`] and [`CatalogResult`], the records handed to consumers.
//! - [`query`] -- [`SearchRequest`], turning a free-text query into a catalog URL.
//! - [`client`] -- [`CatalogSource`] trait and the reqwest-backed [`CatalogClient`].
//! - [`parser`] -- [`CatalogParser`], tolerant decoding of the JSON payload.

pub mod client;
pub mod parser;
pub mod query;
pub mod types;

pub use client::{CatalogClient, CatalogSource};
pub use parser::CatalogParser;
pub use query::SearchRequest;
pub use types::{Book, CatalogResult};
