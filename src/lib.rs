//! # issuu-dl
//!
//! Download a public Issuu document's page images and assemble them into a
//! single PDF.
//!
//! Issuu renders every page of a publicly viewable document as an image and
//! exposes the ordered list of those images through its reader API. This
//! crate walks that list: it resolves the document identifiers from the
//! share URL, fetches the page manifest, downloads each page image one at a
//! time, and writes the lot out as `{document}.pdf`.
//!
//! ## Pipeline Overview
//!
//! ```text
//! URL
//!  │
//!  ├─ 1. Locate    validate the issuu.com prefix, split account/document
//!  ├─ 2. Metadata  GET reader3_4.json, parse the ordered page manifest
//!  ├─ 3. Fetch     one GET per page image, sequential, manifest order
//!  └─ 4. Assemble  decode each image, write {document}.pdf
//! ```
//!
//! Everything is deliberately synchronous and sequential: one shared HTTP
//! session, one request in flight at any moment, pages kept in manifest
//! order end to end. There are no retries and no partial output — a page
//! that cannot be fetched or decoded fails the whole run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use issuu_dl::{download, DownloadConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DownloadConfig::default();
//!     let output = download("https://issuu.com/acme/docs/report-2024", &config)?;
//!     println!("wrote {} ({} pages)", output.output_path.display(), output.stats.pages);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `issuu-dl` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! issuu-dl = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod download;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{DownloadConfig, DownloadConfigBuilder};
pub use download::download;
pub use error::{IssuuDlError, PageError};
pub use output::{DownloadOutput, DownloadStats};
pub use pipeline::fetch::PageFetch;
pub use pipeline::locate::DocumentRef;
pub use progress::{DownloadProgressCallback, NoopProgressCallback, ProgressCallback};
