//! Conversion configuration.
//!
//! A [`ConvertConfig`] is built once per run (by the CLI, or by a library
//! caller) and passed by reference into every conversion call. There is no
//! config file, no environment lookup and no process-wide state.
//!
//! ```text
//! quality = 85   # JPEG quality, also used for the WebP/AVIF fallback (1-100)
//! ```

use crate::imaging::Quality;

/// Settings shared by every file converted in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertConfig {
    pub quality: Quality,
}

impl ConvertConfig {
    /// Config with `quality` clamped to 1-100.
    pub fn with_quality(quality: i64) -> Self {
        Self {
            quality: Quality::new(quality),
        }
    }
}
