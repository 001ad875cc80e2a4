//! Image codec adapter: the only place format-specific behavior lives.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Sniff + decode** | `image::ImageReader` (JPEG, PNG) |
//! | **Probe** | `ImageReader::into_dimensions` |
//! | **Encode** | `JpegEncoder` / `PngEncoder`; WebP and AVIF fall back to JPEG |
//!
//! The module is split into:
//! - **Parameters**: quality and format types
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: file-level helpers on top of a backend

pub mod backend;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{CodecError, DecodedImage, EncodeOutcome, ImageBackend, ImageInfo, ImageSource};
pub use operations::{ProbeError, probe};
pub use params::{
    Quality, RequestedFormat, SourceFormat, TargetFormat, file_extension, is_supported_input,
    supported_input_extensions,
};
pub use rust_backend::RustBackend;
