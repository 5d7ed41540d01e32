//! Orchestration of concurrent transfers.
//!
//! A multi download runs in three phases and never goes back:
//!
//! 1. **Probe**: every handler probes its resource size concurrently. No
//!    transfer starts before all probes are done, because the column widths
//!    of the dashboard are computed once from every known total.
//! 2. **Display setup**: one [`ProgressBar`] per handler, titled with its URL,
//!    gathered in a [`MultiProgressBar`] whose display scope is opened.
//! 3. **Transfer**: every handler copies its body concurrently, and each chunk
//!    triggers one redraw of the whole dashboard. The display scope is closed
//!    when the transfers are over, whether they succeeded or not.
//!
//! All futures are polled on the calling task: transfers interleave at their
//! suspension points but never run in parallel.
//!
//! # Examples
//!
//! ```rust,no_run
//! use asyncdl::download::DownloadHandler;
//! use asyncdl::downloader::MultiDownloaderBuilder;
//!
//! # async fn example() -> asyncdl::Result<()> {
//! let mut handlers = vec![
//!     DownloadHandler::create("https://example.com/a.zip", "out/a.zip").await?,
//!     DownloadHandler::create("https://example.com/b.zip", "out/b.zip").await?,
//! ];
//!
//! let downloader = MultiDownloaderBuilder::new().chunk_size(16 * 1024).build();
//! downloader.multi_download(&mut handlers).await?;
//! # Ok(())
//! # }
//! ```

use super::config::{FailurePolicy, MultiDownloaderConfig, TransferOptions};
use crate::download::{DownloadHandler, Sink};
use crate::error::Result;
use crate::http::{create_http_client, HttpClientConfig, Transport};
use crate::progress::{AnsiTerminal, MultiProgressBar, ProgressBar, Terminal};

use futures::future::{join_all, try_join_all};
use std::fmt;
use std::fmt::Debug;
use tracing::debug;

/// Represents the download controller.
///
/// A multi downloader can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use asyncdl::downloader::MultiDownloaderBuilder;
///
/// let d = MultiDownloaderBuilder::new().build();
/// # }
/// ```
#[derive(Clone)]
pub struct MultiDownloader {
    config: MultiDownloaderConfig,
}

impl Debug for MultiDownloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiDownloader")
            .field("config", &self.config)
            .finish()
    }
}

impl MultiDownloader {
    /// Creates a new MultiDownloader with the given configuration.
    pub(crate) fn new(config: MultiDownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the maximum chunk size.
    pub fn chunk_size(&self) -> usize {
        self.config.options.chunk_size
    }

    /// Gets the failure policy.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.config.options.failure_policy
    }

    /// Gets the transfer options.
    pub fn options(&self) -> TransferOptions {
        self.config.options
    }

    /// Gets the HTTP client configuration.
    pub fn http(&self) -> &HttpClientConfig {
        &self.config.http
    }

    /// Runs the transfers, drawing the dashboard on stderr.
    pub async fn multi_download<S: Sink>(&self, handlers: &mut [DownloadHandler<S>]) -> Result<()> {
        self.multi_download_to(handlers, AnsiTerminal::stderr()).await
    }

    /// Runs the transfers, drawing the dashboard on `terminal`.
    pub async fn multi_download_to<S, W>(
        &self,
        handlers: &mut [DownloadHandler<S>],
        terminal: W,
    ) -> Result<()>
    where
        S: Sink,
        W: Terminal,
    {
        let client = create_http_client(self.config.http.clone())?;
        multi_download_with(&client, handlers, terminal, self.config.options).await
    }
}

/// Runs the transfers of `handlers` over `transport`, drawing on `terminal`.
///
/// Probe failures are reported before the dashboard is set up. Transfer
/// failures are handled according to `options.failure_policy`.
pub async fn multi_download_with<T, S, W>(
    transport: &T,
    handlers: &mut [DownloadHandler<S>],
    terminal: W,
    options: TransferOptions,
) -> Result<()>
where
    T: Transport,
    S: Sink,
    W: Terminal,
{
    debug!("Probing {} resources", handlers.len());
    try_join_all(handlers.iter_mut().map(|h| h.begin(transport))).await?;

    let bars = handlers
        .iter()
        .map(|h| Ok(ProgressBar::new(h.progress()?, h.downloader().url().as_str())))
        .collect::<Result<Vec<_>>>()?;
    let multi = MultiProgressBar::new(bars, terminal);
    let scope = multi.enter()?;

    debug!("Starting {} transfers", handlers.len());
    let multi = &multi;
    let transfers = handlers
        .iter_mut()
        .map(|h| h.run(transport, options.chunk_size, move |_| multi.update()));

    let result = match options.failure_policy {
        FailurePolicy::Continue => join_all(transfers)
            .await
            .into_iter()
            .collect::<Result<Vec<_>>>(),
        FailurePolicy::Abort => try_join_all(transfers).await,
    };

    let released = scope.release();
    match &result {
        Ok(sizes) => debug!("Transferred {} bytes", sizes.iter().sum::<u64>()),
        Err(e) => debug!("Transfers failed: {}", e),
    }
    result.and(released)
}
