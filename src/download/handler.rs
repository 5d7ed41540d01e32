//! Transfer handler.
//!
//! A [`DownloadHandler`] binds one [`Downloader`] to one [`Sink`] and owns the
//! [`Progress`] of that transfer. Its life has two steps:
//!
//! 1. [`begin`](DownloadHandler::begin) probes the resource size and creates
//!    the progress.
//! 2. [`run`](DownloadHandler::run) copies the body chunk by chunk into the
//!    sink, advancing the progress and notifying an observer after each chunk.
//!
//! Both steps are cancellation checkpoints for the handler's
//! [`CancellationToken`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use asyncdl::download::DownloadHandler;
//! use asyncdl::http::{create_http_client, HttpClientConfig};
//!
//! # async fn example() -> asyncdl::Result<()> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let mut handler = DownloadHandler::from_url("https://example.com/file.zip", Vec::<u8>::new())?;
//!
//! handler.begin(&client).await?;
//! let written = handler.run(&client, 4096, |_| Ok(())).await?;
//! assert_eq!(written, handler.sink().len() as u64);
//! # Ok(())
//! # }
//! ```

use super::download::Downloader;
use super::sink::Sink;
use crate::error::{Error, Result};
use crate::http::Transport;
use crate::progress::progress::lock;
use crate::progress::{Progress, SharedProgress};

use futures::TryStreamExt;
use std::path::Path;
use tokio::{
    fs::{self, File, OpenOptions},
    io::AsyncWriteExt,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Copies one resource into one sink, tracking its progress.
#[derive(Debug)]
pub struct DownloadHandler<S> {
    downloader: Downloader,
    sink: S,
    progress: Option<SharedProgress>,
    cancel: CancellationToken,
}

impl<S: Sink> DownloadHandler<S> {
    /// Unit label of the transfer progress.
    pub const SIZE_UNIT: &'static str = "B";

    /// Creates a handler writing the resource of `downloader` into `sink`.
    ///
    /// Fails with [`Error::Configuration`] if the sink is not writable.
    pub fn new(downloader: Downloader, sink: S) -> Result<Self> {
        if !sink.is_writable() {
            return Err(Error::Configuration(format!(
                "the output of {} is not writable",
                downloader.url()
            )));
        }
        Ok(Self {
            downloader,
            sink,
            progress: None,
            cancel: CancellationToken::new(),
        })
    }

    /// Creates a handler for a URL string.
    pub fn from_url(url: &str, sink: S) -> Result<Self> {
        Self::new(Downloader::try_from(url)?, sink)
    }

    /// The fetcher of this transfer.
    pub fn downloader(&self) -> &Downloader {
        &self.downloader
    }

    /// The sink of this transfer.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the handler and returns its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// A token cancelling this transfer at its next checkpoint.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// The progress of this transfer.
    ///
    /// Fails with [`Error::State`] until [`begin`](Self::begin) has completed.
    pub fn progress(&self) -> Result<SharedProgress> {
        self.progress.clone().ok_or_else(|| {
            Error::State(format!(
                "the progress of {} was not set, call begin() first",
                self.downloader.url()
            ))
        })
    }

    /// Copy of the current progress.
    pub fn snapshot(&self) -> Result<Progress> {
        Ok(lock(&self.progress()?).clone())
    }

    /// Probes the resource size and creates the progress.
    ///
    /// Calling it again probes again and replaces the progress.
    pub async fn begin<T: Transport>(&mut self, transport: &T) -> Result<()> {
        let content_length = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(self.cancelled()),
            size = self.downloader.probe_size(transport) => size?,
        };
        self.progress = Some(Progress::new(0, content_length, Some(Self::SIZE_UNIT)).shared());
        Ok(())
    }

    /// Copies the body into the sink.
    ///
    /// After each chunk is written and counted, `on_chunk` is called with the
    /// updated progress; an error from it stops the transfer. Returns the
    /// number of bytes written. Bytes written before a failure stay in the sink.
    pub async fn run<T, F>(
        &mut self,
        transport: &T,
        chunk_size: usize,
        mut on_chunk: F,
    ) -> Result<u64>
    where
        T: Transport,
        F: FnMut(&Progress) -> Result<()>,
    {
        let progress = self.progress()?;
        let cancel = self.cancel.clone();

        let mut chunks = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(self.cancelled()),
            chunks = self.downloader.read(transport, chunk_size) => chunks?,
        };

        debug!("Retrieving chunks of {}", self.downloader.url());
        let mut written: u64 = 0;
        loop {
            let chunk = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(self.cancelled()),
                chunk = chunks.try_next() => chunk?,
            };
            let Some(chunk) = chunk else { break };

            self.sink.write_all(&chunk).await?;
            written += chunk.len() as u64;

            let snapshot = {
                let mut progress = lock(&progress);
                progress.update(Some(chunk.len() as u64));
                progress.clone()
            };
            on_chunk(&snapshot)?;
        }
        self.sink.flush().await?;

        debug!("Retrieved {} bytes from {}", written, self.downloader.url());
        Ok(written)
    }

    fn cancelled(&self) -> Error {
        debug!("Transfer of {} was cancelled", self.downloader.url());
        Error::Cancelled(self.downloader.url().to_string())
    }
}

impl DownloadHandler<File> {
    /// Creates a handler writing `url` into a file at `path`.
    ///
    /// Missing parent directories are created and an existing file is
    /// truncated. A read-only destination is a [`Error::Configuration`].
    pub async fn create(url: &str, path: impl AsRef<Path>) -> Result<Self> {
        let downloader = Downloader::try_from(url)?;
        let path = path.as_ref();

        if let Ok(metadata) = fs::metadata(path).await {
            if metadata.permissions().readonly() {
                return Err(Error::Configuration(format!(
                    "the destination {:?} is read-only",
                    path
                )));
            }
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            debug!("Creating destination directory {:?}", parent);
            fs::create_dir_all(parent).await?;
        }

        debug!("Creating destination file {:?}", path);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .await?;

        Self::new(downloader, file)
    }
}
