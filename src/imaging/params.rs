//! Parameter types for codec operations.
//!
//! These types describe *what* to produce, not *how*. They are the interface
//! between the converters (which decide what files to write) and the
//! [`backend`](super::backend) (which does the pixel work).
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 85). Clamped on construction.
//! - [`TargetFormat`]: Requested output format, parsed case-insensitively from a CLI token.
//! - [`RequestedFormat`]: A [`TargetFormat`] plus the token as the caller spelled it.
//! - [`SourceFormat`]: Format detected from the input's content.

use super::backend::CodecError;
use serde::Serialize;
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: i64) -> Self {
        Self(value.clamp(1, 100) as u32)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Quality as the encoder's `u8` argument.
    pub fn as_u8(self) -> u8 {
        self.0 as u8
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output format requested by the caller.
///
/// `WebP` and `Avif` have no real encoder behind them: the backend writes
/// JPEG bytes for both and reports it through
/// [`EncodeOutcome::JpegFallback`](super::backend::EncodeOutcome).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    Jpeg,
    Png,
    WebP,
    Avif,
}

impl TargetFormat {
    /// Tokens accepted by [`FromStr`], for usage and error text.
    pub const TOKENS: &'static [&'static str] = &["webp", "avif", "jpeg", "jpg", "png"];

    /// True when this target is written as JPEG bytes under its own extension.
    pub fn is_jpeg_fallback(self) -> bool {
        matches!(self, TargetFormat::WebP | TargetFormat::Avif)
    }
}

impl FromStr for TargetFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(TargetFormat::Jpeg),
            "png" => Ok(TargetFormat::Png),
            "webp" => Ok(TargetFormat::WebP),
            "avif" => Ok(TargetFormat::Avif),
            _ => Err(CodecError::UnsupportedTarget(s.to_string())),
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetFormat::Jpeg => "jpeg",
            TargetFormat::Png => "png",
            TargetFormat::WebP => "webp",
            TargetFormat::Avif => "avif",
        };
        f.write_str(name)
    }
}

/// A parsed target format that remembers the caller's token.
///
/// Batch output names use the token verbatim, so `JPEG` yields `a.JPEG`
/// and `jpg` yields `a.jpg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedFormat {
    target: TargetFormat,
    token: String,
}

impl RequestedFormat {
    pub fn target(&self) -> TargetFormat {
        self.target
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl FromStr for RequestedFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self {
            target: s.parse()?,
            token: s.to_string(),
        })
    }
}

impl From<TargetFormat> for RequestedFormat {
    fn from(target: TargetFormat) -> Self {
        Self {
            target,
            token: target.to_string(),
        }
    }
}

/// Format detected from an input's magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Jpeg,
    Png,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Jpeg => f.write_str("jpeg"),
            SourceFormat::Png => f.write_str("png"),
        }
    }
}

const INPUT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// File extensions accepted as conversion inputs.
pub fn supported_input_extensions() -> &'static [&'static str] {
    INPUT_EXTENSIONS
}

/// Extension of `path`'s file name, without the dot.
///
/// Unlike [`Path::extension`], a leading dot counts as a separator: `.png`
/// has the extension `png` and an empty stem.
pub fn file_extension(path: &Path) -> Option<&OsStr> {
    path.extension().or_else(|| {
        let name = path.file_name()?.to_str()?;
        name.strip_prefix('.')
            .filter(|ext| !ext.is_empty())
            .map(OsStr::new)
    })
}

/// Whether `path` carries one of the supported input extensions (any case).
///
/// This is a filter for directory listings and CLI validation only; the
/// actual decode sniffs content and ignores the extension.
pub fn is_supported_input(path: &Path) -> bool {
    file_extension(path)
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            INPUT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
