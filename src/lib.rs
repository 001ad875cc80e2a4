//! # imgconv
//!
//! A command-line image format converter. Reads a JPEG or PNG, decodes it,
//! and re-encodes it as JPEG, PNG, WebP or AVIF, either one file at a time
//! or for every eligible file in a directory.
//!
//! # Pipeline
//!
//! ```text
//! CLI args ─► ConvertConfig ─┬─► convert_file   (one input → one output)
//!                            └─► batch_convert  (dir → dir, calls convert_file per entry)
//!                                        │
//!                                        ▼
//!                                 ImageBackend    (sniff, decode, encode, probe)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Codec adapter: format sniffing, decode, per-format encode, header probe |
//! | [`convert`] | Single-file converter and the [`convert::ConvertEvent`] diagnostics |
//! | [`batch`] | Directory converter with skip-and-continue semantics |
//! | [`config`] | [`config::ConvertConfig`], the explicit per-run settings |
//! | [`output`] | CLI output formatting for events and results |
//!
//! # Design Decisions
//!
//! ## WebP and AVIF Are JPEG Bytes
//!
//! There is no WebP or AVIF encoder behind those targets. The bytes written
//! are JPEG at the configured quality, under the requested extension. This
//! is never silent: the backend reports
//! [`imaging::EncodeOutcome::JpegFallback`], the converter turns it into a
//! [`convert::ConvertEvent::JpegFallback`] warning, and
//! [`convert::ConvertedFile::jpeg_fallback`] records it in the result.
//!
//! ## Content Sniffing, Extension Filtering
//!
//! Decoding looks at magic bytes only: a PNG named `photo.jpg` decodes as PNG.
//! Extensions matter in exactly two places: CLI validation of a single input,
//! and the batch filter that picks which directory entries to try.
//!
//! ## Explicit Configuration
//!
//! Quality travels as a [`config::ConvertConfig`] argument to every call.
//! There is no global state, so two conversions with different settings can
//! run in the same process without interfering.
//!
//! ## Sequential Batches
//!
//! Batch entries are converted one at a time in file-name order. Each
//! conversion only touches its own output path, and a failure is reported
//! and skipped rather than aborting the run.

pub mod batch;
pub mod config;
pub mod convert;
pub mod imaging;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
