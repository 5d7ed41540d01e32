//! Resource fetcher.
//!
//! A [`Downloader`] is bound to one URL. It discovers the declared size of the
//! resource with a probe, then exposes the body as a [`Chunks`] stream of
//! bounded byte buffers.
//!
//! # Examples
//!
//! ```rust,no_run
//! use asyncdl::download::Downloader;
//! use asyncdl::http::{create_http_client, HttpClientConfig};
//! use futures::TryStreamExt;
//!
//! # async fn example() -> asyncdl::Result<()> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let mut downloader = Downloader::try_from("https://example.com/file.zip")?;
//!
//! let size = downloader.probe_size(&client).await?;
//! println!("declared size: {:?}", size);
//!
//! let mut chunks = downloader.read(&client, 4096).await?;
//! while let Some(chunk) = chunks.try_next().await? {
//!     assert!(chunk.len() <= 4096);
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::http::{BodyStream, Transport};
use crate::utils::parse_content_length;

use bytes::Bytes;
use futures::stream::{Stream, StreamExt};
use reqwest::Url;
use std::convert::TryFrom;
use std::fmt;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tracing::debug;

/// Fetches one remote resource.
#[derive(Debug, Clone)]
pub struct Downloader {
    url: Url,
    content_length: Option<u64>,
}

impl Downloader {
    /// Creates a new [`Downloader`] for `url`.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            content_length: None,
        }
    }

    /// URL of the resource.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Declared size found by the last probe.
    ///
    /// `None` before probing, or when the server did not declare a size.
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Retrieves the declared size of the resource and caches it.
    ///
    /// Returns `None` if the "content-length" header is missing or if its value
    /// is not an u64. A failing request is a transport error.
    pub async fn probe_size<T: Transport>(&mut self, transport: &T) -> Result<Option<u64>> {
        debug!("Probing {}", &self.url);
        let headers = transport.head(&self.url).await?;
        self.content_length = parse_content_length(&headers);
        debug!("{} declares {:?} bytes", &self.url, self.content_length);
        Ok(self.content_length)
    }

    /// Requests the resource and returns its body in chunks of at most
    /// `chunk_size` bytes.
    ///
    /// The stream is one-shot: reading the resource again needs a new call.
    pub async fn read<T: Transport>(&self, transport: &T, chunk_size: usize) -> Result<Chunks> {
        if chunk_size == 0 {
            return Err(Error::Configuration(
                "the chunk size must be greater than zero".into(),
            ));
        }
        debug!("Fetching {}", &self.url);
        let body = transport.get(&self.url).await?;
        Ok(Chunks::new(body, chunk_size))
    }
}

impl TryFrom<&Url> for Downloader {
    type Error = Error;

    fn try_from(value: &Url) -> Result<Self> {
        match value.scheme() {
            "http" | "https" => Ok(Downloader::new(value.clone())),
            scheme => Err(Error::InvalidUrl(format!(
                "The url \"{}\" uses the unsupported scheme \"{}\"",
                value, scheme
            ))),
        }
    }
}

impl TryFrom<&str> for Downloader {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Url::parse(value)
            .map_err(|e| {
                Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", value, e))
            })
            .and_then(|u| Downloader::try_from(&u))
    }
}

/// Body of a resource, split in chunks of at most `chunk_size` bytes.
///
/// Chunks are produced as the network delivers them; the whole body is never
/// held in memory. Empty buffers are skipped, and the stream ends with the
/// body. After an error the stream ends.
pub struct Chunks {
    body: BodyStream,
    pending: Bytes,
    chunk_size: usize,
    done: bool,
}

impl Chunks {
    pub(crate) fn new(body: BodyStream, chunk_size: usize) -> Self {
        Self {
            body,
            pending: Bytes::new(),
            chunk_size,
            done: false,
        }
    }
}

impl fmt::Debug for Chunks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunks")
            .field("pending", &self.pending.len())
            .field("chunk_size", &self.chunk_size)
            .field("done", &self.done)
            .finish()
    }
}

impl Stream for Chunks {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        loop {
            if !this.pending.is_empty() {
                let at = this.chunk_size.min(this.pending.len());
                return Poll::Ready(Some(Ok(this.pending.split_to(at))));
            }
            if this.done {
                return Poll::Ready(None);
            }
            match ready!(this.body.poll_next_unpin(cx)) {
                Some(Ok(bytes)) => this.pending = bytes,
                Some(Err(e)) => {
                    this.done = true;
                    return Poll::Ready(Some(Err(e)));
                }
                None => this.done = true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{stream, TryStreamExt};

    fn body(parts: &[&'static [u8]]) -> BodyStream {
        let parts = parts.to_vec();
        stream::iter(parts.into_iter().map(|p| Ok(Bytes::from_static(p)))).boxed()
    }

    #[tokio::test]
    async fn test_chunks_split_large_buffers() {
        let chunks = Chunks::new(body(&[b"abcdefg", b"", b"hi"]), 3);
        let collected: Vec<Bytes> = chunks.try_collect().await.unwrap();
        assert_eq!(
            collected,
            vec![
                Bytes::from_static(b"abc"),
                Bytes::from_static(b"def"),
                Bytes::from_static(b"g"),
                Bytes::from_static(b"hi"),
            ]
        );
    }

    #[tokio::test]
    async fn test_chunks_empty_body() {
        let mut chunks = Chunks::new(body(&[]), 16);
        assert!(chunks.try_next().await.unwrap().is_none());
        assert!(chunks.try_next().await.unwrap().is_none());
    }

    #[test]
    fn test_try_from_str() {
        let d = Downloader::try_from("https://example.com/file.zip").unwrap();
        assert_eq!(d.url().as_str(), "https://example.com/file.zip");
        assert_eq!(d.content_length(), None);
    }

    #[test]
    fn test_try_from_invalid() {
        assert!(matches!(
            Downloader::try_from("not a url"),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            Downloader::try_from("ftp://example.com/file.zip"),
            Err(Error::InvalidUrl(_))
        ));
    }
}
