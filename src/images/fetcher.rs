//! Thumbnail download over HTTP.

use std::borrow::Cow;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bookscout_common::Error;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::thumbnail::{DecodedImage, Thumbnail};
use crate::config::ImagesConfig;

/// Source of book thumbnails.
///
/// Implementations never fail: anything that prevents producing the book's
/// own image yields [`Thumbnail::Placeholder`].
#[async_trait]
pub trait ThumbnailSource: Send + Sync {
    /// Fetch the thumbnail at `url`. `None` means the book has no thumbnail
    /// link and must not cause any network traffic.
    async fn fetch(&self, url: Option<&str>) -> Thumbnail;
}

/// Downloads and decodes thumbnails, one GET per call with its own timeout.
pub struct ImageFetcher {
    client: Client,
    force_https: bool,
}

impl ImageFetcher {
    pub fn new(config: &ImagesConfig) -> bookscout_common::Result<Self> {
        Self::with_timeout(config.timeout(), config.force_https)
    }

    pub fn with_timeout(timeout: Duration, force_https: bool) -> bookscout_common::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build image HTTP client: {e}")))?;

        Ok(Self {
            client,
            force_https,
        })
    }

    fn resolve<'a>(&self, url: &'a str) -> Cow<'a, str> {
        match url.strip_prefix("http://") {
            Some(rest) if self.force_https => Cow::Owned(format!("https://{rest}")),
            _ => Cow::Borrowed(url),
        }
    }

    async fn download(&self, url: &str) -> Result<DecodedImage> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to download image from {}", url))?;

        let status = response.status();
        if status != StatusCode::OK {
            anyhow::bail!("HTTP {} downloading image from {}", status.as_u16(), url);
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read image bytes from {}", url))?;

        DecodedImage::decode(bytes).with_context(|| format!("Failed to decode image from {}", url))
    }
}

#[async_trait]
impl ThumbnailSource for ImageFetcher {
    async fn fetch(&self, url: Option<&str>) -> Thumbnail {
        let Some(url) = url else {
            return Thumbnail::Placeholder;
        };

        let url = self.resolve(url);
        match self.download(&url).await {
            Ok(img) => {
                debug!(url = %url, width = img.width, height = img.height, "Thumbnail downloaded");
                Thumbnail::Image(img)
            }
            Err(e) => {
                warn!(url = %url, error = %format!("{e:#}"), "Thumbnail unavailable; using placeholder");
                Thumbnail::Placeholder
            }
        }
    }
}
