//! Directory batch conversion.
//!
//! Converts every direct entry of an input directory whose extension is a
//! supported input (`.jpg`, `.jpeg`, `.png`, any case) into the output
//! directory:
//!
//! ```text
//! imgs/                         out/
//! ├── a.jpg      ──convert──►   ├── a.webp
//! ├── b.png      ──convert──►   └── b.webp
//! ├── c.txt      (skipped)
//! └── nested/    (not descended into)
//! ```
//!
//! Entries are visited in file-name order. Output names are the input stem
//! plus the format token exactly as given, so `a.jpg` and `a.png` both map
//! to `a.webp` and the later one overwrites the earlier one. A dotfile such
//! as `.png` has an empty stem and becomes `.webp`.
//!
//! A failure on one file is reported as a [`ConvertEvent::Failed`] and the
//! batch moves on; only the counts come back in the [`BatchSummary`].

use crate::config::ConvertConfig;
use crate::convert::{ConvertEvent, convert_file, emit};
use crate::imaging::{ImageBackend, RequestedFormat, file_extension, is_supported_input};
use serde::Serialize;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("input path {0} is not a directory or doesn't exist")]
    InputNotDirectory(PathBuf),
    #[error("failed to create output directory {path}: {source}")]
    OutputDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read input directory {path}: {source}")]
    ReadDirFailed {
        path: PathBuf,
        source: walkdir::Error,
    },
}

/// Counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Files converted successfully.
    pub converted: usize,
    /// Entries without a supported input extension.
    pub skipped: usize,
    /// Files that failed to open, decode, create or encode.
    pub failed: usize,
}

/// Output file name for `input`: its stem, a dot, then the format token.
///
/// Non-UTF-8 stems are carried over unchanged.
pub fn output_file_name(input: &Path, format: &RequestedFormat) -> OsString {
    let stem = match (input.extension(), file_extension(input)) {
        (Some(_), _) => input.file_stem(),
        // `.png`: the whole name is the extension
        (None, Some(_)) => None,
        (None, None) => input.file_name(),
    };
    let mut name = stem.unwrap_or(OsStr::new("")).to_os_string();
    name.push(".");
    name.push(format.token());
    name
}

/// Convert every supported file directly inside `input_dir` into `output_dir`.
///
/// `input_dir` is checked before anything touches the filesystem; `output_dir`
/// is created (with parents) if missing.
pub fn batch_convert(
    backend: &impl ImageBackend,
    input_dir: &Path,
    output_dir: &Path,
    format: &RequestedFormat,
    config: &ConvertConfig,
    events: Option<&Sender<ConvertEvent>>,
) -> Result<BatchSummary, BatchError> {
    if !input_dir.is_dir() {
        return Err(BatchError::InputNotDirectory(input_dir.to_path_buf()));
    }

    std::fs::create_dir_all(output_dir).map_err(|source| BatchError::OutputDirFailed {
        path: output_dir.to_path_buf(),
        source,
    })?;

    emit(
        events,
        ConvertEvent::BatchStarted {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            format: format.target(),
            quality: config.quality,
        },
    );

    let entries = WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| BatchError::ReadDirFailed {
            path: input_dir.to_path_buf(),
            source,
        })?;

    let mut summary = BatchSummary::default();

    for entry in entries {
        if entry.file_type().is_dir() {
            continue;
        }

        let input = entry.path();
        if !is_supported_input(input) {
            emit(
                events,
                ConvertEvent::Skipped {
                    name: entry.file_name().to_string_lossy().into_owned(),
                },
            );
            summary.skipped += 1;
            continue;
        }
        let output = output_dir.join(output_file_name(input, format));

        emit(
            events,
            ConvertEvent::Converting {
                input: input.to_path_buf(),
                output: output.clone(),
            },
        );

        match convert_file(backend, input, &output, format.target(), config, events) {
            Ok(_) => summary.converted += 1,
            Err(e) => {
                emit(
                    events,
                    ConvertEvent::Failed {
                        input: input.to_path_buf(),
                        error: e.to_string(),
                    },
                );
                summary.failed += 1;
            }
        }
    }

    emit(
        events,
        ConvertEvent::BatchFinished {
            converted: summary.converted,
        },
    );

    Ok(summary)
}
