//! Decoded thumbnails and the built-in placeholder.

use std::io::Cursor;
use std::sync::OnceLock;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat, ImageResult, Rgba, RgbaImage};

/// Placeholder dimensions, matching the catalog's small thumbnails.
const PLACEHOLDER_WIDTH: u32 = 80;
const PLACEHOLDER_HEIGHT: u32 = 128;
const PLACEHOLDER_FILL: Rgba<u8> = Rgba([0xE0, 0xE0, 0xE0, 0xFF]);

/// An image payload that decoded successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Format detected from the payload's magic bytes.
    pub format: ImageFormat,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// The payload as received.
    pub bytes: Bytes,
}

impl DecodedImage {
    /// Detect the format of `bytes` and decode them fully.
    ///
    /// Decoding validates the payload; the pixels themselves are not kept.
    pub fn decode(bytes: Bytes) -> ImageResult<Self> {
        let format = image::guess_format(&bytes)?;
        let img = image::load_from_memory_with_format(&bytes, format)?;

        Ok(Self {
            format,
            width: img.width(),
            height: img.height(),
            bytes,
        })
    }
}

/// Thumbnail attached to a book by enrichment.
#[derive(Debug, Clone, PartialEq)]
pub enum Thumbnail {
    /// The book's own thumbnail.
    Image(DecodedImage),
    /// No thumbnail link, or the download failed.
    Placeholder,
}

impl Thumbnail {
    /// The image to display: the book's own, or the placeholder.
    pub fn image(&self) -> &DecodedImage {
        match self {
            Self::Image(img) => img,
            Self::Placeholder => placeholder(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// The built-in placeholder: a flat grey PNG, encoded once per process.
pub fn placeholder() -> &'static DecodedImage {
    static PLACEHOLDER: OnceLock<DecodedImage> = OnceLock::new();

    PLACEHOLDER.get_or_init(|| {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            PLACEHOLDER_WIDTH,
            PLACEHOLDER_HEIGHT,
            PLACEHOLDER_FILL,
        ));

        let mut buf = Cursor::new(Vec::new());
        if let Err(e) = img.write_to(&mut buf, ImageFormat::Png) {
            tracing::error!(error = %e, "Failed to encode placeholder image");
        }

        DecodedImage {
            format: ImageFormat::Png,
            width: PLACEHOLDER_WIDTH,
            height: PLACEHOLDER_HEIGHT,
            bytes: Bytes::from(buf.into_inner()),
        }
    })
}
