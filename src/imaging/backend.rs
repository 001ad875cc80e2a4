//! Codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: decode, encode, and probe. Format-specific behavior lives behind
//! this trait and nowhere else.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate's pure Rust codecs.

use super::params::{Quality, SourceFormat, TargetFormat};
use image::DynamicImage;
use serde::Serialize;
use std::io::{BufRead, Seek, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported source format: {0}")]
    UnsupportedSource(String),
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("unsupported target format: {0}")]
    UnsupportedTarget(String),
    #[error("failed to encode image: {0}")]
    Encode(String),
}

/// Anything a decoder can read from: buffered and seekable.
pub trait ImageSource: BufRead + Seek {}

impl<T: BufRead + Seek> ImageSource for T {}

/// A fully decoded image and the format its bytes were sniffed as.
///
/// Width, height and color model come from the wrapped [`DynamicImage`].
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub format: SourceFormat,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Header-level facts about an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: SourceFormat,
}

/// What the encoder actually wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeOutcome {
    /// The bytes are in the requested format.
    Native,
    /// The requested format has no encoder; JPEG bytes were written instead.
    JpegFallback,
}

/// Trait for codec backends.
///
/// Readers and writers are passed in already opened so callers can tell
/// open/create failures apart from codec failures.
pub trait ImageBackend {
    /// Decode a whole image, detecting the format from content.
    fn decode(&self, source: &mut dyn ImageSource) -> Result<DecodedImage, CodecError>;

    /// Encode `image` as `format` into `out`.
    fn encode(
        &self,
        image: &DynamicImage,
        format: TargetFormat,
        quality: Quality,
        out: &mut dyn Write,
    ) -> Result<EncodeOutcome, CodecError>;

    /// Read dimensions and format from the header without decoding pixels.
    fn probe(&self, source: &mut dyn ImageSource) -> Result<ImageInfo, CodecError>;
}
