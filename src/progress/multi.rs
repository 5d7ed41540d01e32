//! In-place redraw of several progress rows.
//!
//! A [`MultiProgressBar`] reserves one terminal row per bar and redraws all of
//! them together on every [`update`](MultiProgressBar::update): the cursor
//! jumps back to the top of the reserved block, every row is cleared and
//! rewritten, and the terminal is flushed once at the end.
//!
//! Redraws only happen inside a display scope, obtained with
//! [`enter`](MultiProgressBar::enter). The scope hides the cursor and shows it
//! again when released or dropped, including when a transfer fails halfway.
//!
//! # Examples
//!
//! ```rust
//! use asyncdl::progress::{BufferTerminal, MultiProgressBar, Progress, ProgressBar};
//!
//! # fn main() -> asyncdl::Result<()> {
//! let progress = Progress::new(0, Some(100), Some("B")).shared();
//! let bars = vec![
//!     ProgressBar::new(progress.clone(), "one"),
//!     ProgressBar::new(Progress::new(0, None, Some("B")).shared(), "three"),
//! ];
//! let multi = MultiProgressBar::new(bars, BufferTerminal::new(80));
//!
//! let scope = multi.enter()?;
//! progress.lock().unwrap().update(Some(50));
//! multi.update()?;
//! scope.release()?;
//! # Ok(())
//! # }
//! ```

use super::bar::ProgressBar;
use super::terminal::Terminal;
use crate::error::{Error, Result};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::warn;

/// A fixed set of aligned progress rows sharing one terminal.
///
/// Transfers running concurrently call [`update`](Self::update) through a
/// shared reference. The terminal sits behind a mutex so two redraws never
/// interleave their escape sequences.
#[derive(Debug)]
pub struct MultiProgressBar<T> {
    bars: Vec<ProgressBar>,
    terminal: Mutex<T>,
    active: AtomicBool,
}

impl<T: Terminal> MultiProgressBar<T> {
    /// Creates a multi progress bar drawing `bars` on `terminal`, in order.
    ///
    /// Every bar gets the widest title and the widest progress text of the set
    /// as its column widths, so all rows line up.
    pub fn new(mut bars: Vec<ProgressBar>, terminal: T) -> Self {
        let max_title_length = bars.iter().map(|b| b.title_text().chars().count()).max();
        let max_progress_length = bars
            .iter()
            .map(|b| b.progress_text().chars().count())
            .max();
        for bar in bars.iter_mut() {
            bar.set_properties(max_title_length, max_progress_length);
        }

        Self {
            bars,
            terminal: Mutex::new(terminal),
            active: AtomicBool::new(false),
        }
    }

    /// The rows, in display order.
    pub fn bars(&self) -> &[ProgressBar] {
        &self.bars
    }

    /// Returns true while a display scope is open.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Opens the display scope.
    ///
    /// Reserves one blank line per bar and hides the cursor. Opening a second
    /// scope while one is active is a [`Error::State`].
    pub fn enter(&self) -> Result<DisplayScope<'_, T>> {
        if self.active.swap(true, Ordering::SeqCst) {
            return Err(Error::State(
                "the display scope of this multi progress bar is already open".into(),
            ));
        }

        let mut terminal = self.terminal();
        let reserved = "\n".repeat(self.bars.len());
        let written = terminal
            .write_all(reserved.as_bytes())
            .and_then(|_| terminal.hide_cursor())
            .and_then(|_| terminal.flush());
        if let Err(e) = written {
            self.active.store(false, Ordering::SeqCst);
            return Err(e.into());
        }

        Ok(DisplayScope { multi: self })
    }

    /// Redraws every row.
    ///
    /// Fails with [`Error::State`] outside of a display scope.
    pub fn update(&self) -> Result<()> {
        if !self.is_active() {
            return Err(Error::State(
                "MultiProgressBar::update must be called inside a display scope".into(),
            ));
        }

        let mut terminal = self.terminal();
        terminal.move_up(self.bars.len())?;
        for bar in &self.bars {
            bar.update(&mut *terminal, Some("\n"), false)?;
        }
        terminal.flush()?;
        Ok(())
    }

    /// Closes the display scope, showing the cursor again.
    ///
    /// The reserved rows stay on screen. Does nothing if no scope is open.
    fn exit(&self) -> Result<()> {
        if !self.active.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        let mut terminal = self.terminal();
        terminal.show_cursor()?;
        terminal.flush()?;
        Ok(())
    }

    fn terminal(&self) -> MutexGuard<'_, T> {
        self.terminal.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An open display scope.
///
/// The cursor is shown again when the scope is released or dropped, whichever
/// comes first.
#[must_use = "the display scope closes as soon as it is dropped"]
#[derive(Debug)]
pub struct DisplayScope<'a, T: Terminal> {
    multi: &'a MultiProgressBar<T>,
}

impl<T: Terminal> DisplayScope<'_, T> {
    /// Closes the scope and reports a failure to restore the cursor.
    pub fn release(self) -> Result<()> {
        self.multi.exit()
    }
}

impl<T: Terminal> Drop for DisplayScope<'_, T> {
    fn drop(&mut self) {
        if let Err(e) = self.multi.exit() {
            warn!("Failed to restore the cursor: {}", e);
        }
    }
}
