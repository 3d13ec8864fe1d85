//! Configuration for a document download.
//!
//! The original tool kept its base URL and request header in module-level
//! constants; here every knob lives in one [`DownloadConfig`] passed
//! explicitly into each pipeline stage, so nothing is process-global and two
//! runs with different endpoints can coexist in one process (which is also
//! what lets the test suite point a run at a local mock server).

use crate::error::IssuuDlError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Configuration for downloading one Issuu document.
///
/// Built via [`DownloadConfig::builder()`] or [`DownloadConfig::default()`].
///
/// # Example
/// ```rust
/// use issuu_dl::DownloadConfig;
///
/// let config = DownloadConfig::builder()
///     .output_dir("downloads")
///     .build()
///     .unwrap();
/// assert_eq!(config.user_agent, "issuu-dl");
/// ```
#[derive(Clone)]
pub struct DownloadConfig {
    /// Required prefix of the input URL. Default: `https://issuu.com/`.
    ///
    /// Anything not starting with this string is rejected before any network
    /// access happens.
    pub portal_url: String,

    /// Base URL of the reader metadata API. Default: `https://reader3.isu.pub`.
    ///
    /// The metadata endpoint for a document is
    /// `{reader_url}/{account}/{document}/reader3_4.json`.
    pub reader_url: String,

    /// Prefix turning each manifest `imageUri` (a host-relative path) into a
    /// fetchable URL. Default: `https://`.
    pub image_url_prefix: String,

    /// Value of the `User-Agent` header sent with every request, metadata
    /// and images alike. Default: `issuu-dl`.
    pub user_agent: String,

    /// Directory the assembled `{document}.pdf` is written to. Default: `.`.
    pub output_dir: PathBuf,

    /// Optional per-page progress callback. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            portal_url: "https://issuu.com/".to_string(),
            reader_url: "https://reader3.isu.pub".to_string(),
            image_url_prefix: "https://".to_string(),
            user_agent: "issuu-dl".to_string(),
            output_dir: PathBuf::from("."),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for DownloadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadConfig")
            .field("portal_url", &self.portal_url)
            .field("reader_url", &self.reader_url)
            .field("image_url_prefix", &self.image_url_prefix)
            .field("user_agent", &self.user_agent)
            .field("output_dir", &self.output_dir)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl DownloadConfig {
    /// Create a new builder for `DownloadConfig`.
    pub fn builder() -> DownloadConfigBuilder {
        DownloadConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`DownloadConfig`].
#[derive(Debug)]
pub struct DownloadConfigBuilder {
    config: DownloadConfig,
}

impl DownloadConfigBuilder {
    pub fn portal_url(mut self, url: impl Into<String>) -> Self {
        self.config.portal_url = url.into();
        self
    }

    pub fn reader_url(mut self, url: impl Into<String>) -> Self {
        // A trailing slash would double up when the path is appended.
        let mut url = url.into();
        while url.ends_with('/') {
            url.pop();
        }
        self.config.reader_url = url;
        self
    }

    pub fn image_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.image_url_prefix = prefix.into();
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<DownloadConfig, IssuuDlError> {
        let c = &self.config;
        if !c.portal_url.starts_with("http://") && !c.portal_url.starts_with("https://") {
            return Err(IssuuDlError::InvalidConfig(format!(
                "portal_url must start with http:// or https://, got '{}'",
                c.portal_url
            )));
        }
        if c.reader_url.is_empty() {
            return Err(IssuuDlError::InvalidConfig("reader_url is empty".into()));
        }
        if c.user_agent.is_empty() {
            return Err(IssuuDlError::InvalidConfig("user_agent is empty".into()));
        }
        Ok(self.config)
    }
}
