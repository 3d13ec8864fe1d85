//! Reader-API metadata: one GET, parsed into the ordered page manifest.
//!
//! The reader endpoint returns a JSON object of the shape
//! `{"document": {"pages": [{"imageUri": "…"}, …]}}`. The page array order
//! defines the final PDF page order — nothing downstream reorders. All
//! other fields in the response (dimensions, layers, text overlays) are
//! ignored.

use crate::config::DownloadConfig;
use crate::error::IssuuDlError;
use crate::pipeline::locate::DocumentRef;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

/// Top-level reader API response. Only the `document` key is consumed.
#[derive(Debug, Deserialize)]
pub struct ReaderResponse {
    pub document: DocumentManifest,
}

/// The ordered list of page descriptors for one document.
#[derive(Debug, Deserialize)]
pub struct DocumentManifest {
    pub pages: Vec<PageDescriptor>,
}

/// Metadata record naming the location of one page's rendered image.
#[derive(Debug, Deserialize)]
pub struct PageDescriptor {
    /// Host-relative image path, e.g. `image.isu.pub/…/page_1.jpg`.
    #[serde(rename = "imageUri")]
    pub image_uri: String,
}

impl DocumentManifest {
    /// Number of pages the manifest lists.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Fully-qualified image URLs, in manifest order.
    pub fn page_urls(&self, config: &DownloadConfig) -> Vec<String> {
        self.pages
            .iter()
            .map(|p| format!("{}{}", config.image_url_prefix, p.image_uri))
            .collect()
    }
}

/// Build the metadata endpoint URL for a document.
pub fn metadata_url(config: &DownloadConfig, doc: &DocumentRef) -> String {
    format!(
        "{}/{}/{}/reader3_4.json",
        config.reader_url, doc.account, doc.document
    )
}

/// Fetch and parse the document manifest. Exactly one round trip, no retries.
///
/// # Errors
/// * [`IssuuDlError::MetadataFetch`] — the endpoint answered non-200.
/// * [`IssuuDlError::MetadataParse`] — the body was not the expected JSON.
/// * [`IssuuDlError::Http`] — the request could not be completed at all.
pub fn fetch_manifest(
    client: &Client,
    config: &DownloadConfig,
    doc: &DocumentRef,
) -> Result<DocumentManifest, IssuuDlError> {
    let url = metadata_url(config, doc);

    debug!(%url, "Sending metadata request");
    let response = client.get(url.as_str()).send()?;

    let status = response.status();
    if status.as_u16() != 200 {
        return Err(IssuuDlError::MetadataFetch {
            url,
            status: status.as_u16(),
        });
    }

    let body = response.text()?;
    let parsed: ReaderResponse =
        serde_json::from_str(&body).map_err(|source| IssuuDlError::MetadataParse { source })?;

    debug!(pages = parsed.document.pages.len(), "Parsed manifest");
    Ok(parsed.document)
}
