//! Progress tracking and terminal rendering.
//!
//! This module holds everything the live dashboard is made of, leaf first:
//!
//! - `progress` - [`Progress`], the value/total/unit state of one transfer
//! - `bar` - [`ProgressBar`], one width-constrained row drawn from a progress
//! - `multi` - [`MultiProgressBar`], aligned rows redrawn in place together
//! - `terminal` - the [`Terminal`] control interface and its implementations
//!
//! # Examples
//!
//! ```rust
//! use asyncdl::progress::{BufferTerminal, MultiProgressBar, Progress, ProgressBar};
//!
//! # fn main() -> asyncdl::Result<()> {
//! let terminal = BufferTerminal::new(40);
//! let bars = vec![ProgressBar::new(Progress::new(5, Some(10), None).shared(), "file.zip")];
//! let multi = MultiProgressBar::new(bars, terminal.clone());
//!
//! let scope = multi.enter()?;
//! multi.update()?;
//! scope.release()?;
//!
//! assert!(terminal.contents().contains("file.zip"));
//! # Ok(())
//! # }
//! ```

pub(crate) mod bar;
pub(crate) mod multi;
#[allow(clippy::module_inception)]
pub(crate) mod progress;
pub mod terminal;

pub use bar::ProgressBar;
pub use multi::{DisplayScope, MultiProgressBar};
pub use progress::{Progress, SharedProgress};
pub use terminal::{AnsiTerminal, BufferTerminal, Terminal};
