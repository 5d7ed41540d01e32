//! HTTP module containing HTTP client functionality.
//!
//! # Overview
//!
//! The HTTP module is organized into two components:
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`transport`] - The [`Transport`] capability the fetchers talk to
//!
//! # Examples
//!
//! ```rust,no_run
//! use asyncdl::http::{create_http_client, HttpClientConfig, Transport};
//! use reqwest::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let url = Url::parse("https://example.com/file.zip")?;
//! let headers = Transport::head(&client, &url).await?;
//! println!("{:?}", headers.get("content-length"));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod transport;

pub use client::{create_http_client, HttpClientConfig};
pub use transport::{BodyStream, Transport};
