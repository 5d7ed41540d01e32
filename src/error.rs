//! Error handling for the asyncdl library.
//!
//! Every fallible operation in the crate returns [`Result`], and nothing is
//! swallowed along the way: probe, stream, sink and terminal failures all
//! surface to the caller of [`multi_download`](crate::multi_download).

use std::io;
use thiserror::Error;

/// Errors that can happen when using asyncdl.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A transfer was set up with an unusable parameter.
    ///
    /// Returned before any I/O takes place, e.g. when the sink is not
    /// writable or the chunk size is zero.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An operation was called in the wrong lifecycle state.
    ///
    /// Reading a handler's progress before it was probed, or redrawing a
    /// multi progress bar outside of its display scope.
    #[error("State error: {0}")]
    State(String),

    /// The probe or the body stream failed.
    ///
    /// Covers connection, DNS, timeout and HTTP status failures. Bytes already
    /// written to the sink are left as-is.
    #[error("Transport error")]
    Transport {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// The terminal width could not be determined.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// The transfer was cancelled through its cancellation token.
    #[error("Transfer cancelled: {0}")]
    Cancelled(String),

    /// I/O Error.
    ///
    /// Wraps failures while writing to a sink, creating a destination file or
    /// writing escape sequences to the terminal.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Transport {
            source: source.into(),
        }
    }
}

/// Result type alias for operations that can fail with an asyncdl error.
pub type Result<T> = std::result::Result<T, Error>;
