//! Configuration structures and defaults for the multi downloader.
//!
//! # Examples
//!
//! ```rust
//! use asyncdl::downloader::{FailurePolicy, TransferOptions};
//!
//! let options = TransferOptions {
//!     chunk_size: 64 * 1024,
//!     failure_policy: FailurePolicy::Abort,
//! };
//! assert_eq!(TransferOptions::default().chunk_size, 1024);
//! # let _ = options;
//! ```

use crate::http::HttpClientConfig;

/// What happens to the other transfers when one of them fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Every transfer runs to its own end; the first failure in row order is
    /// reported once all of them are done.
    #[default]
    Continue,
    /// The first failure stops every other transfer and is reported at once.
    Abort,
}

/// Options of the transfer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    /// Maximum size of a chunk read from a body, in bytes.
    pub chunk_size: usize,
    /// Policy applied when a transfer fails.
    pub failure_policy: FailurePolicy,
}

impl TransferOptions {
    pub const DEFAULT_CHUNK_SIZE: usize = 1024;
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// Configuration structure for the multi downloader.
#[derive(Debug, Clone, Default)]
pub struct MultiDownloaderConfig {
    /// Transfer phase options.
    pub options: TransferOptions,
    /// HTTP client options.
    pub http: HttpClientConfig,
}
