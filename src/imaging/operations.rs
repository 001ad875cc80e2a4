//! High-level codec operations that touch the filesystem.
//!
//! These open files, then hand readers to the backend.

use super::backend::{CodecError, ImageBackend, ImageInfo};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read header of {path}: {source}")]
    Codec { path: PathBuf, source: CodecError },
}

/// Report width, height and detected format without decoding pixel data.
pub fn probe(backend: &impl ImageBackend, path: &Path) -> Result<ImageInfo, ProbeError> {
    let file = File::open(path).map_err(|source| ProbeError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    backend
        .probe(&mut BufReader::new(file))
        .map_err(|source| ProbeError::Codec {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::imaging::{RustBackend, SourceFormat};
    use crate::test_helpers::{write_jpeg, write_png};

    #[test]
    fn probe_jpeg_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        write_jpeg(&path, 800, 600);

        let info = probe(&RustBackend::new(), &path).unwrap();
        assert_eq!((info.width, info.height), (800, 600));
        assert_eq!(info.format, SourceFormat::Jpeg);
    }

    #[test]
    fn probe_detects_content_not_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("mislabeled.jpg");
        write_png(&path, 10, 7);

        let info = probe(&RustBackend::new(), &path).unwrap();
        assert_eq!(info.format, SourceFormat::Png);
    }

    #[test]
    fn probe_missing_file_is_open_error() {
        let result = probe(&RustBackend::new(), Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(ProbeError::Open { .. })));
    }

    #[test]
    fn probe_garbage_is_codec_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("notes.png");
        std::fs::write(&path, "not an image").unwrap();

        let result = probe(&RustBackend::new(), &path);
        assert!(matches!(
            result,
            Err(ProbeError::Codec {
                source: CodecError::UnsupportedSource(_),
                ..
            })
        ));
    }

    #[test]
    fn probe_uses_backend_probe_not_decode() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("a.jpg");
        write_jpeg(&path, 2, 2);

        let backend = MockBackend::new();
        probe(&backend, &path).unwrap();
        assert_eq!(backend.get_operations(), vec![RecordedOp::Probe]);
    }
}
