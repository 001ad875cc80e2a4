//! CLI output formatting for conversion progress and results.
//!
//! # Output Format
//!
//! ## Single file
//!
//! ```text
//! Input: photo.jpg (800x600, jpeg)
//! Converting photo.jpg to photo.webp (format: webp, quality: 85)
//! Source: photo.jpg (800x600, jpeg)
//! Warning: photo.webp holds JPEG data (no webp encoder available)
//! Successfully converted to photo.webp
//! ```
//!
//! ## Batch
//!
//! ```text
//! Batch converting images from imgs to out (format: webp, quality: 85)
//! Converting imgs/a.jpg to out/a.webp...
//!     Source: imgs/a.jpg (32x24, jpeg)
//!     Warning: out/a.webp holds JPEG data (no webp encoder available)
//! Skipping unsupported file: c.txt
//! Successfully converted 2 images
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that does the I/O. Warnings and
//! per-file failures go to stderr, everything else to stdout.

use crate::batch::BatchSummary;
use crate::convert::{ConvertEvent, ConvertedFile};
use crate::imaging::{ImageInfo, TargetFormat};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn dimensions(width: u32, height: u32) -> String {
    format!("{}x{}", width, height)
}

/// Events that describe something the user should not miss.
pub fn is_warning(event: &ConvertEvent) -> bool {
    matches!(
        event,
        ConvertEvent::JpegFallback { .. } | ConvertEvent::Failed { .. }
    )
}

/// Format a single progress event as display lines.
///
/// `depth` indents per-file detail under a batch's `Converting` line.
pub fn format_convert_event(event: &ConvertEvent, depth: usize) -> Vec<String> {
    let pad = indent(depth);
    match event {
        ConvertEvent::SourceDecoded {
            path,
            format,
            width,
            height,
        } => vec![format!(
            "{}Source: {} ({}, {})",
            pad,
            path.display(),
            dimensions(*width, *height),
            format
        )],
        ConvertEvent::JpegFallback { output, format } => vec![format!(
            "{}Warning: {} holds JPEG data (no {} encoder available)",
            pad,
            output.display(),
            format
        )],
        ConvertEvent::BatchStarted {
            input_dir,
            output_dir,
            format,
            quality,
        } => vec![format!(
            "Batch converting images from {} to {} (format: {}, quality: {})",
            input_dir.display(),
            output_dir.display(),
            format,
            quality
        )],
        ConvertEvent::Converting { input, output } => vec![format!(
            "Converting {} to {}...",
            input.display(),
            output.display()
        )],
        ConvertEvent::Skipped { name } => vec![format!("Skipping unsupported file: {}", name)],
        ConvertEvent::Failed { input, error } => {
            vec![format!("Error converting {}: {}", input.display(), error)]
        }
        ConvertEvent::BatchFinished { converted } => {
            vec![format!("Successfully converted {} images", converted)]
        }
    }
}

pub fn print_convert_event(event: &ConvertEvent, depth: usize) {
    let lines = format_convert_event(event, depth);
    if is_warning(event) {
        for line in lines {
            eprintln!("{}", line);
        }
    } else {
        for line in lines {
            println!("{}", line);
        }
    }
}

/// Header line describing an input before single-file conversion.
pub fn format_probe(path: &Path, info: &ImageInfo) -> String {
    format!(
        "Input: {} ({}, {})",
        path.display(),
        dimensions(info.width, info.height),
        info.format
    )
}

/// Line announcing a single-file conversion.
pub fn format_single_start(
    input: &Path,
    output: &Path,
    format: TargetFormat,
    quality: u32,
) -> String {
    format!(
        "Converting {} to {} (format: {}, quality: {})",
        input.display(),
        output.display(),
        format,
        quality
    )
}

pub fn format_converted(result: &ConvertedFile) -> Vec<String> {
    vec![format!("Successfully converted to {}", result.output.display())]
}

pub fn print_converted(result: &ConvertedFile) {
    for line in format_converted(result) {
        println!("{}", line);
    }
}

/// Batch totals. The success count is also printed by the
/// [`ConvertEvent::BatchFinished`] line; this adds the skip/failure split.
pub fn format_batch_summary(summary: &BatchSummary) -> Vec<String> {
    let mut lines = Vec::new();
    if summary.skipped > 0 || summary.failed > 0 {
        lines.push(format!(
            "{}{} skipped, {} failed",
            indent(1),
            summary.skipped,
            summary.failed
        ));
    }
    lines
}

pub fn print_batch_summary(summary: &BatchSummary) {
    for line in format_batch_summary(summary) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{Quality, SourceFormat};
    use std::path::PathBuf;

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(1), "    ");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn format_source_decoded() {
        let event = ConvertEvent::SourceDecoded {
            path: PathBuf::from("photo.jpg"),
            format: SourceFormat::Jpeg,
            width: 800,
            height: 600,
        };
        assert_eq!(
            format_convert_event(&event, 0),
            vec!["Source: photo.jpg (800x600, jpeg)"]
        );
        assert_eq!(
            format_convert_event(&event, 1),
            vec!["    Source: photo.jpg (800x600, jpeg)"]
        );
    }

    #[test]
    fn format_fallback_warning_names_format() {
        let event = ConvertEvent::JpegFallback {
            output: PathBuf::from("out/a.avif"),
            format: TargetFormat::Avif,
        };
        assert_eq!(
            format_convert_event(&event, 0),
            vec!["Warning: out/a.avif holds JPEG data (no avif encoder available)"]
        );
        assert!(is_warning(&event));
    }

    #[test]
    fn format_batch_started() {
        let event = ConvertEvent::BatchStarted {
            input_dir: PathBuf::from("imgs"),
            output_dir: PathBuf::from("imgs/converted"),
            format: TargetFormat::WebP,
            quality: Quality::new(75),
        };
        assert_eq!(
            format_convert_event(&event, 0),
            vec!["Batch converting images from imgs to imgs/converted (format: webp, quality: 75)"]
        );
    }

    #[test]
    fn format_skip_and_failure() {
        let skipped = ConvertEvent::Skipped {
            name: "c.txt".to_string(),
        };
        assert_eq!(
            format_convert_event(&skipped, 0),
            vec!["Skipping unsupported file: c.txt"]
        );
        assert!(!is_warning(&skipped));

        let failed = ConvertEvent::Failed {
            input: PathBuf::from("imgs/b.jpg"),
            error: "failed to decode imgs/b.jpg: bad data".to_string(),
        };
        assert_eq!(
            format_convert_event(&failed, 0),
            vec!["Error converting imgs/b.jpg: failed to decode imgs/b.jpg: bad data"]
        );
        assert!(is_warning(&failed));
    }

    #[test]
    fn format_batch_finished() {
        let event = ConvertEvent::BatchFinished { converted: 2 };
        assert_eq!(
            format_convert_event(&event, 0),
            vec!["Successfully converted 2 images"]
        );
    }

    #[test]
    fn format_probe_line() {
        let info = ImageInfo {
            width: 20,
            height: 10,
            format: SourceFormat::Png,
        };
        assert_eq!(
            format_probe(Path::new("in.png"), &info),
            "Input: in.png (20x10, png)"
        );
    }

    #[test]
    fn format_single_start_line() {
        assert_eq!(
            format_single_start(Path::new("a.png"), Path::new("a.jpg"), TargetFormat::Jpeg, 85),
            "Converting a.png to a.jpg (format: jpeg, quality: 85)"
        );
    }

    #[test]
    fn batch_summary_silent_when_clean() {
        let summary = BatchSummary {
            converted: 3,
            skipped: 0,
            failed: 0,
        };
        assert!(format_batch_summary(&summary).is_empty());
    }

    #[test]
    fn batch_summary_reports_skips_and_failures() {
        let summary = BatchSummary {
            converted: 2,
            skipped: 1,
            failed: 1,
        };
        assert_eq!(format_batch_summary(&summary), vec!["    1 skipped, 1 failed"]);
    }
}
