//! Terminal control used by the progress bars.
//!
//! The redraw protocol only needs four operations on top of plain writes:
//! clearing the current line, moving the cursor up, and hiding or showing the
//! cursor. They are grouped in the [`Terminal`] trait so the rendering code
//! never emits escape sequences on its own.
//!
//! Two implementations ship with the crate:
//!
//! - [`AnsiTerminal`] writes raw ANSI sequences to stderr or stdout and asks
//!   the attached terminal device for its width.
//! - [`BufferTerminal`] records everything in memory and reports a fixed
//!   width. It is handy to embed the dashboard in another output, and in tests.
//!
//! # Examples
//!
//! ```rust
//! use asyncdl::progress::{BufferTerminal, Terminal};
//!
//! let mut terminal = BufferTerminal::new(80);
//! terminal.hide_cursor().unwrap();
//! assert_eq!(terminal.contents(), "\x1b[?25l");
//! assert_eq!(terminal.width().unwrap(), 80);
//! ```

use crate::error::{Error, Result};

use console::Term;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Clears the current line and returns to column 0.
pub const CLEAR_LINE: &str = "\x1b[2K\r";
/// Hides the cursor.
pub const HIDE_CURSOR: &str = "\x1b[?25l";
/// Shows the cursor.
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// Output device able to take part in the in-place redraw protocol.
pub trait Terminal: Write + Send {
    /// Number of columns available for a row.
    fn width(&self) -> Result<usize>;

    /// Clears the current line and returns the cursor to column 0.
    fn clear_line(&mut self) -> io::Result<()> {
        self.write_all(CLEAR_LINE.as_bytes())
    }

    /// Moves the cursor up by `rows` lines.
    fn move_up(&mut self, rows: usize) -> io::Result<()> {
        write!(self, "\x1b[{}A", rows)
    }

    /// Hides the cursor.
    fn hide_cursor(&mut self) -> io::Result<()> {
        self.write_all(HIDE_CURSOR.as_bytes())
    }

    /// Shows the cursor.
    fn show_cursor(&mut self) -> io::Result<()> {
        self.write_all(SHOW_CURSOR.as_bytes())
    }
}

/// A real terminal device.
///
/// Output is buffered until flushed, so one redraw of every row reaches the
/// device in a single write.
#[derive(Debug, Clone)]
pub struct AnsiTerminal {
    term: Term,
}

impl AnsiTerminal {
    /// Draws on standard error.
    pub fn stderr() -> Self {
        Self {
            term: Term::buffered_stderr(),
        }
    }

    /// Draws on standard output.
    pub fn stdout() -> Self {
        Self {
            term: Term::buffered_stdout(),
        }
    }

    /// Returns true if the output is attached to a terminal device.
    pub fn is_term(&self) -> bool {
        self.term.is_term()
    }
}

impl Default for AnsiTerminal {
    fn default() -> Self {
        Self::stderr()
    }
}

impl Write for AnsiTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.term.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.term.flush()
    }
}

impl Terminal for AnsiTerminal {
    fn width(&self) -> Result<usize> {
        self.term
            .size_checked()
            .map(|(_rows, columns)| usize::from(columns))
            .ok_or_else(|| Error::Terminal("output is not attached to a terminal".into()))
    }
}

/// In-memory terminal with a fixed width.
///
/// Clones share the same buffer, so a clone can be kept to inspect what was
/// drawn after the original was handed to a
/// [`MultiProgressBar`](super::MultiProgressBar).
#[derive(Debug, Clone, Default)]
pub struct BufferTerminal {
    width: Option<usize>,
    buffer: Arc<Mutex<Vec<u8>>>,
    flushes: Arc<Mutex<usize>>,
}

impl BufferTerminal {
    /// Creates a terminal reporting `width` columns.
    pub fn new(width: usize) -> Self {
        Self {
            width: Some(width),
            ..Default::default()
        }
    }

    /// Creates a terminal whose width cannot be queried, like a redirected stream.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Number of times the output was flushed.
    pub fn flushes(&self) -> usize {
        *self.flushes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for BufferTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        *self.flushes.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

impl Terminal for BufferTerminal {
    fn width(&self) -> Result<usize> {
        self.width
            .ok_or_else(|| Error::Terminal("terminal width is unknown".into()))
    }
}
