//! Sequential page-image fetching.
//!
//! One GET per page, strictly in manifest order, over the shared client.
//! A non-200 response is logged, recorded as [`PageFetch::Failed`] and the
//! loop moves on; the failure turns fatal later, when assembly reaches the
//! absent buffer. A transport-level error (unreachable host, broken body
//! stream) aborts the whole run instead — there is no notion of a document
//! whose connection half-worked.

use crate::config::DownloadConfig;
use crate::error::{IssuuDlError, PageError};
use reqwest::blocking::Client;
use tracing::{debug, error};

/// The outcome of fetching one page image.
///
/// An explicit tagged result rather than an `Option`: downstream code can
/// tell "the fetch failed" apart from "the server returned zero bytes", and
/// the failure keeps its page number and reason.
#[derive(Debug, Clone)]
pub enum PageFetch {
    /// Status 200; the raw image bytes as received.
    Fetched { page: usize, bytes: Vec<u8> },
    /// Non-200 status; the page has no buffer.
    Failed { page: usize, error: PageError },
}

impl PageFetch {
    /// 1-indexed page number this outcome belongs to.
    pub fn page(&self) -> usize {
        match self {
            PageFetch::Fetched { page, .. } | PageFetch::Failed { page, .. } => *page,
        }
    }

    /// Whether the page has a buffer.
    pub fn is_fetched(&self) -> bool {
        matches!(self, PageFetch::Fetched { .. })
    }

    /// Buffer length, zero for failed pages.
    pub fn byte_len(&self) -> usize {
        match self {
            PageFetch::Fetched { bytes, .. } => bytes.len(),
            PageFetch::Failed { .. } => 0,
        }
    }
}

/// Fetch every page image, in order.
///
/// Returns one [`PageFetch`] per input URL, index-aligned with the input.
/// The progress callback (if configured) fires after every attempt,
/// success and failure alike.
pub fn fetch_pages(
    client: &Client,
    config: &DownloadConfig,
    urls: &[String],
) -> Result<Vec<PageFetch>, IssuuDlError> {
    let total = urls.len();
    let mut pages = Vec::with_capacity(total);

    for (idx, url) in urls.iter().enumerate() {
        let page = idx + 1;
        debug!(page, %url, "Downloading page image");

        let outcome = fetch_page(client, page, url)?;
        if let Some(cb) = config.progress_callback.as_ref() {
            match &outcome {
                PageFetch::Fetched { bytes, .. } => cb.on_page_fetched(page, total, bytes.len()),
                PageFetch::Failed { error, .. } => {
                    cb.on_page_error(page, total, &error.to_string())
                }
            }
        }
        pages.push(outcome);
    }

    Ok(pages)
}

/// One GET. Non-200 becomes a recorded [`PageFetch::Failed`]; transport
/// errors propagate as fatal.
fn fetch_page(client: &Client, page: usize, url: &str) -> Result<PageFetch, IssuuDlError> {
    let response = client.get(url).send()?;
    let status = response.status().as_u16();

    if status != 200 {
        let err = PageError::BadStatus {
            page,
            url: url.to_string(),
            status,
        };
        error!("{err}");
        return Ok(PageFetch::Failed { page, error: err });
    }

    let bytes = response.bytes()?.to_vec();
    Ok(PageFetch::Fetched { page, bytes })
}
