//! Shared helpers for integration tests.
//!
//! Builds catalog payloads and cover images, and wires a [`SearchPipeline`]
//! to a [`MockServer`] standing in for both the catalog and the image host.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use bookscout::catalog::CatalogClient;
use bookscout::images::ImageFetcher;
use bookscout::pipeline::PipelineOptions;
use bookscout::{SearchDelivery, SearchPipeline};
use image::{ImageFormat, Rgb, RgbImage};
use reqwest::Url;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use wiremock::MockServer;

pub const VOLUMES_PATH: &str = "/books/v1/volumes";

/// Encode a solid-colour PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([30, 90, 160]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("failed to encode test PNG");
    buf.into_inner()
}

/// A volume item with every field populated.
pub fn volume(title: &str, authors: &[&str], rating: f64, thumbnail: Option<&str>) -> Value {
    let mut info = json!({
        "title": title,
        "authors": authors,
        "averageRating": rating,
        "canonicalVolumeLink": format!("https://books.example/{}", title.replace(' ', "-")),
    });
    if let Some(url) = thumbnail {
        info["imageLinks"] = json!({ "smallThumbnail": url, "thumbnail": url });
    }
    json!({ "kind": "books#volume", "volumeInfo": info })
}

/// A volumes response body.
pub fn volumes(total: u64, items: Vec<Value>) -> Value {
    json!({ "kind": "books#volumes", "totalItems": total, "items": items })
}

/// Endpoint URL served by `server`.
pub fn endpoint(server: &MockServer) -> Url {
    Url::parse(&format!("{}{}", server.uri(), VOLUMES_PATH)).expect("mock server uri")
}

/// Pipeline backed by real HTTP clients pointed at `server`.
pub fn pipeline(
    server: &MockServer,
    image_timeout: Duration,
) -> (SearchPipeline, mpsc::UnboundedReceiver<SearchDelivery>) {
    let catalog = CatalogClient::with_timeouts(
        Duration::from_secs(2),
        Duration::from_secs(5),
        "bookscout-tests",
    )
    .expect("catalog client");
    let thumbnails = ImageFetcher::with_timeout(image_timeout, false).expect("image fetcher");

    SearchPipeline::new(
        Arc::new(catalog),
        Arc::new(thumbnails),
        PipelineOptions::new(endpoint(server)),
    )
}

/// Wait for the next delivery, failing the test if none arrives.
pub async fn next_delivery(rx: &mut mpsc::UnboundedReceiver<SearchDelivery>) -> SearchDelivery {
    tokio::time::timeout(Duration::from_secs(10), rx.recv())
        .await
        .expect("timed out waiting for delivery")
        .expect("delivery channel closed")
}
