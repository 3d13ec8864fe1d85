//! Result types returned by a completed download.

use serde::Serialize;
use std::path::PathBuf;

/// Everything a successful run produced.
///
/// Returned by [`crate::download::download`]. The page image buffers
/// themselves are consumed by assembly and are not retained here; a
/// successful output always means every page made it into the PDF.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadOutput {
    /// Account identifier (first URL path segment).
    pub account: String,

    /// Document identifier (last URL path segment, output filename base).
    pub document: String,

    /// Where the assembled PDF was written.
    pub output_path: PathBuf,

    /// Timing and size counters for the run.
    pub stats: DownloadStats,
}

/// Counters describing one download run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DownloadStats {
    /// Pages listed by the document manifest.
    pub pages: usize,

    /// Total bytes of image data fetched.
    pub bytes_fetched: u64,

    /// Size of the written PDF in bytes.
    pub output_bytes: u64,

    /// Wall-clock time spent in the page fetch loop.
    pub fetch_duration_ms: u64,

    /// Wall-clock time spent decoding images and writing the PDF.
    pub assemble_duration_ms: u64,

    /// End-to-end wall-clock time, metadata request included.
    pub total_duration_ms: u64,
}
