use super::{
    config::{FailurePolicy, MultiDownloaderConfig},
    downloader::MultiDownloader,
};

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::Proxy;
use std::time::Duration;

/// A builder used to create a [`MultiDownloader`].
///
/// ```rust
/// # fn main()  {
/// use asyncdl::downloader::MultiDownloaderBuilder;
///
/// let d = MultiDownloaderBuilder::new().chunk_size(8192).build();
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MultiDownloaderBuilder {
    config: MultiDownloaderConfig,
}

impl MultiDownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        MultiDownloaderBuilder::default()
    }

    /// Set the maximum size of the chunks read from the bodies.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.options.chunk_size = chunk_size;
        self
    }

    /// Set what happens to the other transfers when one fails.
    pub fn failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.config.options.failure_policy = failure_policy;
        self
    }

    /// Route the requests through a proxy.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.config.http.proxy = Some(proxy);
        self
    }

    /// Set the total timeout of each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.http.timeout = Some(timeout);
        self
    }

    /// Set the timeout of the connect phase of each request.
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.config.http.connect_timeout = Some(connect_timeout);
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.http.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be
    /// merged into a single one.
    ///
    /// # Example
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue, HeaderMap};
    /// use asyncdl::downloader::MultiDownloaderBuilder;
    ///
    /// let ua = HeaderValue::from_str("curl/7.87").expect("Invalid UA");
    ///
    /// let builder = MultiDownloaderBuilder::new()
    ///     .headers(HeaderMap::from_iter([(header::USER_AGENT, ua)]))
    ///     .build();
    /// ```
    ///
    /// See also [`header()`](Self::header).
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.http.headers = Some(new);
        self
    }

    /// Add the http header.
    ///
    /// # Example
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use asyncdl::downloader::MultiDownloaderBuilder;
    ///
    /// let ua = HeaderValue::from_str("curl/7.87").expect("Invalid UA");
    ///
    /// let builder = MultiDownloaderBuilder::new()
    ///     .header(header::USER_AGENT, ua)
    ///     .build();
    /// ```
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();
        new.insert(name, value);

        self.config.http.headers = Some(new);
        self
    }

    /// Create the [`MultiDownloader`] with the specified options.
    pub fn build(self) -> MultiDownloader {
        MultiDownloader::new(self.config)
    }
}
