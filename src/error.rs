//! Error types for the issuu-dl library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`IssuuDlError`] — **Fatal**: the download cannot produce a complete
//!   document (bad URL, metadata endpoint failure, undecodable page image).
//!   Returned as `Err(IssuuDlError)` from [`crate::download::download`].
//!
//! * [`PageError`] — **Non-fatal at fetch time**: a single page image came
//!   back with a bad HTTP status. The fetch loop records it and keeps going;
//!   it resurfaces as a fatal [`IssuuDlError::ImageDecode`] when assembly
//!   reaches the absent buffer. There is deliberately no skip-and-continue:
//!   a document with silently missing pages is worse than no document.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the issuu-dl library.
///
/// Page-level fetch failures use [`PageError`] and are carried inside
/// [`crate::pipeline::fetch::PageFetch`] rather than propagated here.
#[derive(Debug, Error)]
pub enum IssuuDlError {
    // ── URL errors ────────────────────────────────────────────────────────
    /// The input string is not an Issuu document URL.
    #[error("Invalid URL '{input}': expected a URL starting with '{expected_prefix}'")]
    InvalidUrl {
        input: String,
        expected_prefix: String,
    },

    /// The URL path does not decompose into account/…/document.
    #[error("Unrecognized URL path '{path}': expected at least account/…/document segments")]
    MalformedPath { path: String },

    // ── Metadata errors ───────────────────────────────────────────────────
    /// The reader API answered with a non-200 status.
    #[error("Metadata request to '{url}' failed with HTTP {status}")]
    MetadataFetch { url: String, status: u16 },

    /// The reader API body was not the expected JSON shape.
    #[error("Failed to parse document metadata: {source}")]
    MetadataParse {
        #[source]
        source: serde_json::Error,
    },

    // ── Assembly errors ───────────────────────────────────────────────────
    /// A page buffer is absent (its fetch failed) or is not a decodable image.
    #[error("Page {page} cannot be placed in the PDF: {detail}")]
    ImageDecode { page: usize, detail: String },

    /// The document metadata listed zero pages; there is nothing to assemble.
    #[error("Document has no pages; refusing to write an empty PDF")]
    EmptyDocument,

    /// Could not write the assembled PDF to disk.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// lopdf failed to serialise the assembled document.
    #[error("PDF assembly failed: {0}")]
    PdfAssembly(String),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Transport ─────────────────────────────────────────────────────────
    /// A request could not be issued or its body could not be read at all
    /// (DNS failure, refused connection, broken stream). Unlike a bad
    /// status, this aborts the run.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A non-fatal fetch failure for a single page.
///
/// Stored inside [`crate::pipeline::fetch::PageFetch::Failed`]. The overall
/// download continues past it; assembly later refuses the absent buffer.
#[derive(Debug, Clone, Error)]
pub enum PageError {
    /// The image endpoint answered with a non-200 status.
    #[error("Page {page}: image URL '{url}' received bad status code {status}")]
    BadStatus {
        page: usize,
        url: String,
        status: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_display_names_prefix() {
        let e = IssuuDlError::InvalidUrl {
            input: "https://example.com/doc".into(),
            expected_prefix: "https://issuu.com/".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("https://issuu.com/"), "got: {msg}");
        assert!(msg.contains("example.com"), "got: {msg}");
    }

    #[test]
    fn metadata_fetch_display_has_status() {
        let e = IssuuDlError::MetadataFetch {
            url: "https://reader3.isu.pub/a/d/reader3_4.json".into(),
            status: 403,
        };
        assert!(e.to_string().contains("403"));
    }

    #[test]
    fn image_decode_display_names_page() {
        let e = IssuuDlError::ImageDecode {
            page: 7,
            detail: "buffer is absent".into(),
        };
        assert!(e.to_string().contains("Page 7"));
    }

    #[test]
    fn bad_status_display() {
        let e = PageError::BadStatus {
            page: 2,
            url: "https://image.isu.pub/a/2.jpg".into(),
            status: 404,
        };
        let msg = e.to_string();
        assert!(msg.contains("404"), "got: {msg}");
        assert!(msg.contains("2.jpg"), "got: {msg}");
    }
}
