#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use asyncdl::download::{DownloadHandler, Sink};
use asyncdl::http::{BodyStream, Transport};
use asyncdl::{Error, Result};
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
use reqwest::Url;
use tokio::io::AsyncWrite;

// Common test constants
pub const SIZED_URL: &str = "http://domain.com/sized.bin";
pub const UNSIZED_URL: &str = "http://domain.com/unsized.bin";
pub const TERMINAL_WIDTH: usize = 60;

/// Builds a transport error the way a middleware would report it
pub fn transport_error(message: &str) -> Error {
    Error::Transport {
        source: reqwest_middleware::Error::Middleware(anyhow::anyhow!(message.to_string())),
    }
}

/// Creates test content of the specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Splits content into network buffers of the given size
pub fn split(content: &[u8], size: usize) -> Vec<Vec<u8>> {
    content.chunks(size).map(|c| c.to_vec()).collect()
}

// === Fake transport ===

/// A resource served by [`FakeTransport`]
#[derive(Debug, Clone, Default)]
pub struct FakeResource {
    /// Raw Content-Length header value, if any
    pub content_length: Option<&'static str>,
    /// Body buffers, in order
    pub buffers: Vec<Vec<u8>>,
    /// Delay before the probe answers
    pub probe_delay: Duration,
    /// Delay before each body buffer
    pub buffer_delay: Duration,
    /// The probe fails
    pub fail_probe: bool,
    /// The body fails after this many buffers
    pub fail_after: Option<usize>,
}

impl FakeResource {
    /// A resource declaring its size
    pub fn sized(content: &[u8], buffer_size: usize) -> Self {
        let length: &'static str = Box::leak(content.len().to_string().into_boxed_str());
        Self {
            content_length: Some(length),
            buffers: split(content, buffer_size),
            ..Default::default()
        }
    }

    /// A resource without declared size
    pub fn undeclared(content: &[u8], buffer_size: usize) -> Self {
        Self {
            buffers: split(content, buffer_size),
            ..Default::default()
        }
    }

    pub fn probe_delay(mut self, delay: Duration) -> Self {
        self.probe_delay = delay;
        self
    }

    pub fn buffer_delay(mut self, delay: Duration) -> Self {
        self.buffer_delay = delay;
        self
    }

    pub fn fail_probe(mut self) -> Self {
        self.fail_probe = true;
        self
    }

    pub fn fail_after(mut self, buffers: usize) -> Self {
        self.fail_after = Some(buffers);
        self
    }
}

/// In-memory transport recording every probe, request and delivered buffer
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    resources: HashMap<String, FakeResource>,
    events: Arc<Mutex<Vec<String>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, resource: FakeResource) -> Self {
        self.resources.insert(url.to_string(), resource);
        self
    }

    /// Events in the order they happened: `probe:<url>`, `get:<url>`, `chunk:<url>`
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    fn resource(&self, url: &Url) -> Result<&FakeResource> {
        self.resources
            .get(url.as_str())
            .ok_or_else(|| transport_error(&format!("unknown url {}", url)))
    }
}

impl Transport for FakeTransport {
    async fn head(&self, url: &Url) -> Result<HeaderMap> {
        let resource = self.resource(url)?;
        if !resource.probe_delay.is_zero() {
            tokio::time::sleep(resource.probe_delay).await;
        }
        self.record(format!("probe:{}", url));
        if resource.fail_probe {
            return Err(transport_error("probe failed"));
        }

        let mut headers = HeaderMap::new();
        if let Some(length) = resource.content_length {
            headers.insert(CONTENT_LENGTH, HeaderValue::from_static(length));
        }
        Ok(headers)
    }

    async fn get(&self, url: &Url) -> Result<BodyStream> {
        let resource = self.resource(url)?.clone();
        self.record(format!("get:{}", url));

        let mut items: Vec<Result<Bytes>> = resource
            .buffers
            .into_iter()
            .take(resource.fail_after.unwrap_or(usize::MAX))
            .map(|b| Ok(Bytes::from(b)))
            .collect();
        if resource.fail_after.is_some() {
            items.push(Err(transport_error("connection reset")));
        }

        let events = self.events.clone();
        let name = url.to_string();
        let delay = resource.buffer_delay;
        let body = stream::iter(items).then(move |item| {
            let events = events.clone();
            let name = name.clone();
            async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                if item.is_ok() {
                    events.lock().unwrap().push(format!("chunk:{}", name));
                }
                item
            }
        });
        Ok(body.boxed())
    }
}

// === Sinks ===

/// A sink that refuses writes
#[derive(Debug, Default)]
pub struct ReadOnlySink;

impl AsyncWrite for ReadOnlySink {
    fn poll_write(self: Pin<&mut Self>, _: &mut Context<'_>, _: &[u8]) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only")))
    }

    fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

impl Sink for ReadOnlySink {
    fn is_writable(&self) -> bool {
        false
    }
}

/// A sink that claims to be writable but fails on every write
#[derive(Debug, Default)]
pub struct BrokenSink;

impl AsyncWrite for BrokenSink {
    fn poll_write(self: Pin<&mut Self>, _: &mut Context<'_>, _: &[u8]) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "disk unplugged")))
    }

    fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

impl Sink for BrokenSink {}

// === Handler helpers ===

/// Creates an in-memory handler for a URL
pub fn create_memory_handler(url: &str) -> DownloadHandler<Vec<u8>> {
    DownloadHandler::from_url(url, Vec::new()).expect("Failed to create handler")
}

/// Counts the occurrences of `needle` in `haystack`
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Position of the first event starting with `prefix`
pub fn first_event(events: &[String], prefix: &str) -> Option<usize> {
    events.iter().position(|e| e.starts_with(prefix))
}
