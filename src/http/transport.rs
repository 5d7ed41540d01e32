//! The HTTP capability used by the fetchers.
//!
//! A [`Transport`] knows two requests: a metadata-only probe returning the
//! response headers, and a full request returning the body as a stream of
//! byte buffers. Both follow redirects. The crate implements it for
//! [`ClientWithMiddleware`]; tests and embedders can bring their own.

use crate::error::{Error, Result};

use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use reqwest::{header::HeaderMap, Url};
use reqwest_middleware::ClientWithMiddleware;
use std::future::Future;
use tracing::debug;

/// A response body, as it arrives from the network.
pub type BodyStream = BoxStream<'static, Result<Bytes>>;

/// HTTP capability injected into the fetchers.
pub trait Transport: Sync {
    /// Sends a metadata-only request and returns the response headers.
    fn head(&self, url: &Url) -> impl Future<Output = Result<HeaderMap>> + Send;

    /// Sends a full request and returns its body stream.
    ///
    /// An error status is reported as a transport failure.
    fn get(&self, url: &Url) -> impl Future<Output = Result<BodyStream>> + Send;
}

impl Transport for ClientWithMiddleware {
    async fn head(&self, url: &Url) -> Result<HeaderMap> {
        let res = ClientWithMiddleware::head(self, url.clone()).send().await?;
        debug!("HEAD {} returned {}", url, res.status());
        Ok(res.headers().clone())
    }

    async fn get(&self, url: &Url) -> Result<BodyStream> {
        let res = ClientWithMiddleware::get(self, url.clone()).send().await?;
        debug!("GET {} returned {}", url, res.status());
        let res = res.error_for_status()?;
        Ok(res.bytes_stream().map_err(Error::from).boxed())
    }
}
