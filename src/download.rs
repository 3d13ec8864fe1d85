//! Top-level download entry point.
//!
//! Wires the pipeline stages together in their fixed order: locate →
//! metadata → fetch → assemble. Strictly linear and fully synchronous — one
//! page at a time, in manifest order, every call blocking until complete.
//! A single HTTP client is built up front and reused for the metadata
//! request and every image request, so connection setup and DNS resolution
//! are paid once per host rather than once per page.

use crate::config::DownloadConfig;
use crate::error::IssuuDlError;
use crate::output::{DownloadOutput, DownloadStats};
use crate::pipeline::{assemble, fetch, locate, metadata};
use reqwest::blocking::Client;
use std::time::Instant;
use tracing::info;

/// Download a document and write `{document}.pdf` into the configured
/// output directory.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `url` — full Issuu document URL, e.g.
///   `https://issuu.com/acme/docs/report-2024`
/// * `config` — endpoints, user agent, output directory, progress callback
///
/// # Errors
/// Any [`IssuuDlError`] aborts the run; there is no partial output. A page
/// whose image request returns a bad status is carried forward by the fetch
/// loop but fails the run during assembly — the tool never silently writes
/// a document with missing pages.
pub fn download(url: &str, config: &DownloadConfig) -> Result<DownloadOutput, IssuuDlError> {
    let total_start = Instant::now();

    // ── Step 1: Validate and decompose the URL ───────────────────────────
    let doc_ref = locate::parse_document_url(url, config)?;
    info!("Starting download: {}/{}", doc_ref.account, doc_ref.document);

    // ── Step 2: One shared session for every request ─────────────────────
    let client = build_client(config)?;

    // ── Step 3: Fetch the page manifest ──────────────────────────────────
    let manifest = metadata::fetch_manifest(&client, config, &doc_ref)?;
    let page_urls = manifest.page_urls(config);
    info!("Downloading {} pages", page_urls.len());

    if let Some(cb) = config.progress_callback.as_ref() {
        cb.on_download_start(page_urls.len());
    }

    // ── Step 4: Fetch every page image, in order ─────────────────────────
    let fetch_start = Instant::now();
    let pages = fetch::fetch_pages(&client, config, &page_urls)?;
    let fetch_duration_ms = fetch_start.elapsed().as_millis() as u64;

    let fetched = pages.iter().filter(|p| p.is_fetched()).count();
    let bytes_fetched: u64 = pages.iter().map(|p| p.byte_len() as u64).sum();

    if let Some(cb) = config.progress_callback.as_ref() {
        cb.on_download_complete(pages.len(), fetched);
    }

    // ── Step 5: Assemble the PDF ─────────────────────────────────────────
    let assemble_start = Instant::now();
    let assembled = assemble::write_pdf(&pages, &doc_ref.document, config)?;
    let assemble_duration_ms = assemble_start.elapsed().as_millis() as u64;

    let stats = DownloadStats {
        pages: pages.len(),
        bytes_fetched,
        output_bytes: assembled.bytes_written,
        fetch_duration_ms,
        assemble_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "Wrote {} ({} pages, {} bytes) in {}ms",
        assembled.path.display(),
        stats.pages,
        stats.output_bytes,
        stats.total_duration_ms
    );

    Ok(DownloadOutput {
        account: doc_ref.account,
        document: doc_ref.document,
        output_path: assembled.path,
        stats,
    })
}

/// Build the shared blocking client: identifying `User-Agent` on every
/// request, and no request timeout — a hung endpoint blocks rather than
/// failing, matching the tool's single-shot, no-retry contract.
fn build_client(config: &DownloadConfig) -> Result<Client, IssuuDlError> {
    Ok(Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(None)
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_fails_before_any_network_access() {
        let config = DownloadConfig::default();
        let err = download("https://example.com/acme/docs/report", &config).unwrap_err();
        assert!(matches!(err, IssuuDlError::InvalidUrl { .. }));
    }

    #[test]
    fn short_path_fails_before_any_network_access() {
        let config = DownloadConfig::default();
        let err = download("https://issuu.com/acme", &config).unwrap_err();
        assert!(matches!(err, IssuuDlError::MalformedPath { .. }));
    }

    #[test]
    fn client_builds_from_default_config() {
        build_client(&DownloadConfig::default()).unwrap();
    }
}
