//! asyncdl fetches several HTTP resources concurrently, writes each one to
//! its own sink, and draws a live multi-row progress dashboard in the terminal.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use asyncdl::Error;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! asyncdl::download_files(&[
//!     ("https://example.com/a.zip", "downloads/a.zip"),
//!     ("https://example.com/b.zip", "downloads/b.zip"),
//! ])
//! .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! The asyncdl crate is organized into several modules:
//!
//! - [`download`] - The resource fetcher, the sink capability and the transfer handler
//! - [`downloader`] - The [`MultiDownloader`] orchestrating transfers and redraws
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client setup and the transport capability
//! - [`progress`] - Progress state, row rendering and in-place terminal redraw
//! - [`utils`] - Shared utility functions

pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod progress;
pub mod utils;

pub use download::{DownloadHandler, Downloader, Sink};
pub use downloader::{
    multi_download_with, FailurePolicy, MultiDownloader, MultiDownloaderBuilder, TransferOptions,
};
pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig, Transport};
pub use progress::{MultiProgressBar, Progress, ProgressBar};

use std::path::Path;

/// Runs the transfers of `handlers` with default options and `chunk_size`,
/// drawing the dashboard on stderr.
pub async fn multi_download<S: Sink>(
    handlers: &mut [DownloadHandler<S>],
    chunk_size: usize,
) -> Result<()> {
    MultiDownloaderBuilder::new()
        .chunk_size(chunk_size)
        .build()
        .multi_download(handlers)
        .await
}

/// Downloads each `(url, path)` pair into a file, all at once.
///
/// Every destination is opened before any request is sent, so a bad URL or an
/// unwritable path fails early.
pub async fn download_files<U, P>(pairs: &[(U, P)]) -> Result<()>
where
    U: AsRef<str>,
    P: AsRef<Path>,
{
    let mut handlers = Vec::with_capacity(pairs.len());
    for (url, path) in pairs {
        handlers.push(DownloadHandler::create(url.as_ref(), path).await?);
    }
    multi_download(&mut handlers, TransferOptions::DEFAULT_CHUNK_SIZE).await
}
