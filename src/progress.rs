//! Progress-callback trait for per-page download events.
//!
//! Inject an [`Arc<dyn DownloadProgressCallback>`] via
//! [`crate::config::DownloadConfigBuilder::progress_callback`] to receive an
//! event after every page fetch attempt.
//!
//! The fetch loop is strictly sequential, so events always arrive in page
//! order: `on_download_start`, then one `on_page_fetched` or `on_page_error`
//! per page, then `on_download_complete`. The trait is still `Send + Sync`
//! so an implementation can be shared with whatever renders it (a terminal
//! progress bar, a log line, a GUI channel).

use std::sync::Arc;

/// Called by the download pipeline as it fetches each page image.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait DownloadProgressCallback: Send + Sync {
    /// Called once, after the metadata is fetched and before any page.
    ///
    /// # Arguments
    /// * `total_pages` — number of page images the manifest lists
    fn on_download_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called when a page image was fetched with status 200.
    ///
    /// # Arguments
    /// * `page_num`    — 1-indexed page number
    /// * `total_pages` — total pages in the document
    /// * `byte_len`    — size of the downloaded image buffer
    fn on_page_fetched(&self, page_num: usize, total_pages: usize, byte_len: usize) {
        let _ = (page_num, total_pages, byte_len);
    }

    /// Called when a page image came back with a non-200 status.
    ///
    /// The loop continues to the next page after this event; the failure
    /// becomes fatal later, during assembly.
    fn on_page_error(&self, page_num: usize, total_pages: usize, error: &str) {
        let _ = (page_num, total_pages, error);
    }

    /// Called once after every page has been attempted.
    ///
    /// # Arguments
    /// * `total_pages`   — total pages in the document
    /// * `fetched_count` — pages that came back with status 200
    fn on_download_complete(&self, total_pages: usize, fetched_count: usize) {
        let _ = (total_pages, fetched_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl DownloadProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::DownloadConfig`].
pub type ProgressCallback = Arc<dyn DownloadProgressCallback>;
