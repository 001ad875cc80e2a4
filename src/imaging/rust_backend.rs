//! Pure Rust codec backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Format sniffing | `ImageReader::with_guessed_format` (magic bytes, not extension) |
//! | Decode (JPEG, PNG) | `ImageReader::decode` |
//! | Probe | `ImageReader::into_dimensions` (header only) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder::new_with_quality` |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (lossless, quality ignored) |
//! | Encode → WebP / AVIF | JPEG bytes, reported as [`EncodeOutcome::JpegFallback`] |

use super::backend::{
    CodecError, DecodedImage, EncodeOutcome, ImageBackend, ImageInfo, ImageSource,
};
use super::params::{Quality, SourceFormat, TargetFormat};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::borrow::Cow;
use std::io::Write;

/// Backend using the `image` crate's JPEG and PNG codecs.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap `source` in a reader whose format is guessed from content.
fn sniff(
    source: &mut dyn ImageSource,
) -> Result<(ImageReader<&mut dyn ImageSource>, SourceFormat), CodecError> {
    let reader = ImageReader::new(source).with_guessed_format()?;
    let format = match reader.format() {
        Some(ImageFormat::Jpeg) => SourceFormat::Jpeg,
        Some(ImageFormat::Png) => SourceFormat::Png,
        Some(other) => {
            return Err(CodecError::UnsupportedSource(
                other.extensions_str().first().copied().unwrap_or("unknown").to_string(),
            ));
        }
        None => {
            return Err(CodecError::UnsupportedSource(
                "unrecognized image data".to_string(),
            ));
        }
    };
    Ok((reader, format))
}

/// JPEG carries neither alpha nor 16-bit samples; flatten anything else to RGB8.
fn jpeg_compatible(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(image),
        other => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
    }
}

fn write_jpeg(image: &DynamicImage, quality: Quality, out: &mut dyn Write) -> Result<(), CodecError> {
    let encoder = JpegEncoder::new_with_quality(out, quality.as_u8());
    jpeg_compatible(image)
        .write_with_encoder(encoder)
        .map_err(|e| CodecError::Encode(format!("JPEG encode failed: {e}")))
}

fn write_png(image: &DynamicImage, out: &mut dyn Write) -> Result<(), CodecError> {
    image
        .write_with_encoder(PngEncoder::new(out))
        .map_err(|e| CodecError::Encode(format!("PNG encode failed: {e}")))
}

impl ImageBackend for RustBackend {
    fn decode(&self, source: &mut dyn ImageSource) -> Result<DecodedImage, CodecError> {
        let (reader, format) = sniff(source)?;
        let image = reader
            .decode()
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        Ok(DecodedImage { image, format })
    }

    fn encode(
        &self,
        image: &DynamicImage,
        format: TargetFormat,
        quality: Quality,
        out: &mut dyn Write,
    ) -> Result<EncodeOutcome, CodecError> {
        match format {
            TargetFormat::Jpeg => write_jpeg(image, quality, out).map(|_| EncodeOutcome::Native),
            TargetFormat::Png => write_png(image, out).map(|_| EncodeOutcome::Native),
            TargetFormat::WebP | TargetFormat::Avif => {
                write_jpeg(image, quality, out).map(|_| EncodeOutcome::JpegFallback)
            }
        }
    }

    fn probe(&self, source: &mut dyn ImageSource) -> Result<ImageInfo, CodecError> {
        let (reader, format) = sniff(source)?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        Ok(ImageInfo {
            width,
            height,
            format,
        })
    }
}
