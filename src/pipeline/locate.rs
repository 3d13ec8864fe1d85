//! URL validation and decomposition into account/document identifiers.
//!
//! An Issuu document URL looks like
//! `https://issuu.com/{account}/docs/{document}`. Only the first and the
//! last path segments matter; whatever sits between them is ignored. That
//! tolerance is observed upstream behaviour and is kept as-is — a URL with
//! extra path structure still resolves as long as its first segment is the
//! account and its last is the document.

use crate::config::DownloadConfig;
use crate::error::IssuuDlError;
use reqwest::Url;
use tracing::debug;

/// The two identifiers extracted from a document URL.
///
/// Derived once, before any network access, and immutable afterwards.
/// `document` doubles as the output filename base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// Publisher namespace: first path segment.
    pub account: String,
    /// Document identifier: last path segment.
    pub document: String,
}

/// Validate the input URL and split it into a [`DocumentRef`].
///
/// # Errors
/// * [`IssuuDlError::InvalidUrl`] — the string does not start with the
///   configured portal prefix, or does not parse as a URL at all.
/// * [`IssuuDlError::MalformedPath`] — the path has fewer than three
///   segments, so account and document cannot both be identified.
pub fn parse_document_url(
    input: &str,
    config: &DownloadConfig,
) -> Result<DocumentRef, IssuuDlError> {
    if !input.starts_with(&config.portal_url) {
        return Err(IssuuDlError::InvalidUrl {
            input: input.to_string(),
            expected_prefix: config.portal_url.clone(),
        });
    }

    let url = Url::parse(input).map_err(|_| IssuuDlError::InvalidUrl {
        input: input.to_string(),
        expected_prefix: config.portal_url.clone(),
    })?;

    let path = url.path();
    let trimmed = path.trim_matches('/');
    let segments: Vec<&str> = trimmed.split('/').collect();

    if trimmed.is_empty() || segments.len() < 3 {
        return Err(IssuuDlError::MalformedPath {
            path: path.to_string(),
        });
    }

    // First segment is the account, last the document; segments in between
    // (normally the literal "docs") are ignored.
    let account = segments[0].to_string();
    let document = segments[segments.len() - 1].to_string();

    if account.is_empty() || document.is_empty() {
        return Err(IssuuDlError::MalformedPath {
            path: path.to_string(),
        });
    }

    debug!(%account, %document, "Parsed document URL");
    Ok(DocumentRef { account, document })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DownloadConfig {
        DownloadConfig::default()
    }

    #[test]
    fn parses_canonical_document_url() {
        let r = parse_document_url("https://issuu.com/acme/docs/report-2024", &config()).unwrap();
        assert_eq!(r.account, "acme");
        assert_eq!(r.document, "report-2024");
    }

    #[test]
    fn middle_segments_are_ignored() {
        let r = parse_document_url(
            "https://issuu.com/acme/docs/archive/2024/report-2024",
            &config(),
        )
        .unwrap();
        assert_eq!(r.account, "acme");
        assert_eq!(r.document, "report-2024");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let r = parse_document_url("https://issuu.com/acme/docs/report-2024/", &config()).unwrap();
        assert_eq!(r.document, "report-2024");
    }

    #[test]
    fn query_string_does_not_leak_into_document() {
        let r = parse_document_url(
            "https://issuu.com/acme/docs/report-2024?utm_source=share",
            &config(),
        )
        .unwrap();
        assert_eq!(r.document, "report-2024");
    }

    #[test]
    fn rejects_foreign_host() {
        let err = parse_document_url("https://example.com/acme/docs/report", &config()).unwrap_err();
        assert!(matches!(err, IssuuDlError::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_http_scheme_on_https_prefix() {
        // Prefix comparison is literal, like the original: http:// is not
        // https://issuu.com/.
        let err = parse_document_url("http://issuu.com/acme/docs/report", &config()).unwrap_err();
        assert!(matches!(err, IssuuDlError::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_short_path() {
        let err = parse_document_url("https://issuu.com/acme/report", &config()).unwrap_err();
        assert!(matches!(err, IssuuDlError::MalformedPath { .. }));
    }

    #[test]
    fn rejects_bare_portal_url() {
        let err = parse_document_url("https://issuu.com/", &config()).unwrap_err();
        assert!(matches!(err, IssuuDlError::MalformedPath { .. }));
    }

    #[test]
    fn custom_portal_prefix_is_honoured() {
        let config = DownloadConfig::builder()
            .portal_url("http://127.0.0.1:9000/")
            .build()
            .unwrap();
        let r = parse_document_url("http://127.0.0.1:9000/acme/docs/report", &config).unwrap();
        assert_eq!(r.account, "acme");
        assert_eq!(r.document, "report");
    }
}
