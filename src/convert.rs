//! Single-file conversion.
//!
//! One input path, one output path, one target format:
//!
//! ```text
//! open input ─► decode (sniffed) ─► create output ─► encode + flush
//!   OpenFailed    DecodeFailed        CreateFailed     EncodeFailed
//! ```
//!
//! The output file is only created after a successful decode, so a bad
//! input never leaves an artifact behind. An encode failure, on the other
//! hand, can leave a truncated file at the output path; it is not removed.
//!
//! ## Diagnostics
//!
//! Progress and warnings are reported as [`ConvertEvent`]s over an optional
//! channel, and rendered by [`output`](crate::output). The batch converter
//! reuses the same event type.

use crate::config::ConvertConfig;
use crate::imaging::{
    CodecError, EncodeOutcome, ImageBackend, Quality, SourceFormat, TargetFormat,
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to open input file {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    DecodeFailed { path: PathBuf, source: CodecError },
    #[error("failed to create output file {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode {path}: {source}")]
    EncodeFailed { path: PathBuf, source: CodecError },
}

/// Progress and warning events emitted while converting.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertEvent {
    /// Input decoded; `format` is what the content sniffed as.
    SourceDecoded {
        path: PathBuf,
        format: SourceFormat,
        width: u32,
        height: u32,
    },
    /// The target has no real encoder and JPEG bytes were written instead.
    JpegFallback {
        output: PathBuf,
        format: TargetFormat,
    },
    BatchStarted {
        input_dir: PathBuf,
        output_dir: PathBuf,
        format: TargetFormat,
        quality: Quality,
    },
    Converting {
        input: PathBuf,
        output: PathBuf,
    },
    /// A directory entry without a supported input extension.
    Skipped {
        name: String,
    },
    /// A per-file failure inside a batch; the batch keeps going.
    Failed {
        input: PathBuf,
        error: String,
    },
    BatchFinished {
        converted: usize,
    },
}

/// Outcome of one successful conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub output: PathBuf,
    pub source_format: SourceFormat,
    pub target_format: TargetFormat,
    pub width: u32,
    pub height: u32,
    /// True when `output` holds JPEG bytes under a WebP/AVIF name.
    pub jpeg_fallback: bool,
}

/// Send an event if anyone is listening. A dropped receiver is not an error.
pub(crate) fn emit(events: Option<&Sender<ConvertEvent>>, event: ConvertEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}

/// Convert `input` to `format`, writing the result to `output`.
///
/// `output` is created or truncated. Quality comes from `config` and is
/// ignored for PNG.
pub fn convert_file(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    format: TargetFormat,
    config: &ConvertConfig,
    events: Option<&Sender<ConvertEvent>>,
) -> Result<ConvertedFile, ConvertError> {
    let source = File::open(input).map_err(|source| ConvertError::OpenFailed {
        path: input.to_path_buf(),
        source,
    })?;

    let decoded = backend
        .decode(&mut BufReader::new(source))
        .map_err(|source| ConvertError::DecodeFailed {
            path: input.to_path_buf(),
            source,
        })?;

    emit(
        events,
        ConvertEvent::SourceDecoded {
            path: input.to_path_buf(),
            format: decoded.format,
            width: decoded.width(),
            height: decoded.height(),
        },
    );

    let file = File::create(output).map_err(|source| ConvertError::CreateFailed {
        path: output.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    let outcome = backend
        .encode(&decoded.image, format, config.quality, &mut writer)
        .and_then(|outcome| {
            writer.flush()?;
            Ok(outcome)
        })
        .map_err(|source| ConvertError::EncodeFailed {
            path: output.to_path_buf(),
            source,
        })?;

    let jpeg_fallback = outcome == EncodeOutcome::JpegFallback;
    if jpeg_fallback {
        emit(
            events,
            ConvertEvent::JpegFallback {
                output: output.to_path_buf(),
                format,
            },
        );
    }

    Ok(ConvertedFile {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        source_format: decoded.format,
        target_format: format,
        width: decoded.width(),
        height: decoded.height(),
        jpeg_fallback,
    })
}
