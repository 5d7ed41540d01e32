//! Downloader module containing the orchestration of concurrent transfers.
//!
//! This module provides the [`MultiDownloader`] struct and its associated
//! builder for configuring and running several transfers behind one live
//! dashboard.
//!
//! # Overview
//!
//! The downloader module is organized into three main components:
//!
//! - `downloader` - [`MultiDownloader`] and the generic [`multi_download_with`] core
//! - `builder` - [`MultiDownloaderBuilder`] for configuration using the builder pattern
//! - `config` - Configuration structures and the [`FailurePolicy`]
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use asyncdl::download::DownloadHandler;
//! use asyncdl::downloader::MultiDownloaderBuilder;
//!
//! # async fn example() -> asyncdl::Result<()> {
//! let mut handlers = vec![
//!     DownloadHandler::create("https://example.com/file.zip", "file.zip").await?,
//! ];
//! MultiDownloaderBuilder::new().build().multi_download(&mut handlers).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Stopping Everything on the First Failure
//!
//! ```rust
//! use asyncdl::downloader::{FailurePolicy, MultiDownloaderBuilder};
//! use std::time::Duration;
//!
//! let downloader = MultiDownloaderBuilder::new()
//!     .failure_policy(FailurePolicy::Abort)
//!     .timeout(Duration::from_secs(60))
//!     .build();
//! ```

pub mod builder;
pub mod config;
#[allow(clippy::module_inception)]
pub mod downloader;

pub use builder::MultiDownloaderBuilder;
pub use config::{FailurePolicy, MultiDownloaderConfig, TransferOptions};
pub use downloader::{multi_download_with, MultiDownloader};
