//! CLI binary for issuu-dl.
//!
//! A thin shim over the library crate that maps the two CLI flags to a
//! `DownloadConfig`, renders download progress, and owns the process exit
//! code. All pipeline errors bubble up here; nothing below this file ever
//! terminates the process.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use issuu_dl::{download, DownloadConfig, DownloadProgressCallback, ProgressCallback};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress: a single percentage bar that overwrites itself in
/// place after every page attempt. Failed pages get their own log line so
/// they stay visible above the moving bar.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Create a callback whose bar length is set by `on_download_start`
    /// once the page manifest is known.
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0);

        // Spinner only until the metadata tells us the page count.
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(spinner_style);
        bar.set_prefix("Resolving");
        bar.set_message("Fetching document metadata…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }

    /// Switch to the percentage bar once the total is known.
    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {percent:>3}%  {pos}/{len} pages",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Downloading");
    }
}

impl DownloadProgressCallback for CliProgressCallback {
    fn on_download_start(&self, total_pages: usize) {
        self.activate_bar(total_pages);
    }

    fn on_page_fetched(&self, _page_num: usize, _total_pages: usize, _byte_len: usize) {
        self.bar.inc(1);
    }

    fn on_page_error(&self, page_num: usize, total_pages: usize, error: &str) {
        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            red("✗"),
            page_num,
            total_pages,
            red(error),
        ));
        self.bar.inc(1);
    }

    fn on_download_complete(&self, total_pages: usize, fetched_count: usize) {
        let failed = total_pages.saturating_sub(fetched_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} pages downloaded",
                green("✔"),
                bold(&fetched_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} pages downloaded  ({} failed)",
                red("✘"),
                bold(&fetched_count.to_string()),
                total_pages,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Download a document into the current directory
  issuu-dl -u https://issuu.com/acme/docs/report-2024

  # Same, with debug-level logging
  issuu-dl -u https://issuu.com/acme/docs/report-2024 -v

The output file is named after the last URL path segment:
the URL above produces ./report-2024.pdf, overwriting any
existing file of that name.
"#;

/// Download a public Issuu document as a single PDF.
#[derive(Parser, Debug)]
#[command(
    name = "issuu-dl",
    version,
    about = "Download a public Issuu document's pages and assemble them into a PDF",
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Full Issuu document URL, e.g. https://issuu.com/acme/docs/report-2024.
    #[arg(short, long)]
    url: String,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // ── Logging setup, before any other work ─────────────────────────────
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // Single top-level handler: inner components propagate errors, only
    // this function decides the exit code.
    if let Err(err) = run(&cli) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let progress = CliProgressCallback::new_dynamic();

    let config = DownloadConfig::builder()
        .progress_callback(progress as ProgressCallback)
        .build()
        .context("Invalid configuration")?;

    let output = download(&cli.url, &config).context("Download failed")?;

    eprintln!(
        "   {}  {}",
        bold(&output.output_path.display().to_string()),
        dim(&format!(
            "{} pages, {} bytes, {}ms",
            output.stats.pages, output.stats.output_bytes, output.stats.total_duration_ms
        )),
    );
    Ok(())
}
