//! Download module containing the per-resource machinery.
//!
//! # Overview
//!
//! The download module is organized into three components:
//!
//! - [`download`] - [`Downloader`], the resource fetcher, and its [`Chunks`] stream
//! - [`handler`] - [`DownloadHandler`], binding a fetcher to a sink and a progress
//! - [`sink`] - The [`Sink`] capability the handlers write into
//!
//! # Examples
//!
//! ```rust
//! use asyncdl::download::{DownloadHandler, Downloader};
//!
//! # fn example() -> asyncdl::Result<()> {
//! let downloader = Downloader::try_from("https://example.com/file.zip")?;
//! let handler = DownloadHandler::new(downloader, Vec::<u8>::new())?;
//!
//! // The progress only exists once the size was probed.
//! assert!(handler.progress().is_err());
//! # Ok(())
//! # }
//! ```

#[allow(clippy::module_inception)]
pub mod download;
pub mod handler;
pub mod sink;

pub use download::{Chunks, Downloader};
pub use handler::DownloadHandler;
pub use sink::Sink;
