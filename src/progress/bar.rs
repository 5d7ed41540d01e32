//! Rendering of one progress row.
//!
//! A row is made of three columns separated by a single space:
//!
//! ```text
//! <title> [=========            ] <progress>
//! ```
//!
//! The title is left-aligned, the progress text right-aligned, and the bar
//! takes whatever width the terminal has left. The bar is dropped entirely
//! when the terminal is too narrow or the total is unknown.

use super::progress::{lock, SharedProgress};
use super::terminal::Terminal;
use crate::error::Result;

/// Character used to fill the completed part of the bar.
const FILL: char = '=';

/// A single progress row, drawn from the current state of a shared [`Progress`](super::Progress).
///
/// The bar holds no rendering cache: every call reads the progress again.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    progress: SharedProgress,
    title: String,
    max_title_length: Option<usize>,
    max_progress_length: Option<usize>,
    max_bar_length: Option<usize>,
}

impl ProgressBar {
    /// Creates a bar for `progress` with the given title.
    pub fn new(progress: SharedProgress, title: impl Into<String>) -> Self {
        Self {
            progress,
            title: title.into(),
            max_title_length: None,
            max_progress_length: None,
            max_bar_length: None,
        }
    }

    /// Pads the bar column to `max_bar_length`.
    ///
    /// The padding never goes past the width the terminal leaves for the bar,
    /// so a row always fits on one line.
    pub fn with_max_bar_length(mut self, max_bar_length: usize) -> Self {
        self.max_bar_length = Some(max_bar_length);
        self
    }

    /// Sets the column widths. `None` keeps the current setting.
    pub fn set_properties(
        &mut self,
        max_title_length: Option<usize>,
        max_progress_length: Option<usize>,
    ) {
        self.max_title_length = max_title_length.or(self.max_title_length);
        self.max_progress_length = max_progress_length.or(self.max_progress_length);
    }

    /// The progress drawn by this bar.
    pub fn progress(&self) -> &SharedProgress {
        &self.progress
    }

    /// The raw title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Width of the title column, if set.
    pub fn max_title_length(&self) -> Option<usize> {
        self.max_title_length
    }

    /// Width of the progress column, if set.
    pub fn max_progress_length(&self) -> Option<usize> {
        self.max_progress_length
    }

    /// Title clipped or padded to the title column width.
    ///
    /// Without an explicit width the title keeps its own length.
    pub fn title_text(&self) -> String {
        let width = self
            .max_title_length
            .unwrap_or_else(|| self.title.chars().count());
        if width < 1 {
            return String::new();
        }
        let clipped: String = self.title.chars().take(width).collect();
        format!("{:<width$}", clipped)
    }

    /// Rendered progress right-aligned to the progress column width.
    pub fn progress_text(&self) -> String {
        let progress = lock(&self.progress).render();
        let width = self
            .max_progress_length
            .unwrap_or_else(|| progress.chars().count());
        if width < 1 {
            return String::new();
        }
        format!("{:>width$}", progress)
    }

    /// Bar column text for a terminal of `terminal_width` columns.
    ///
    /// `others` are the texts of the other columns of the row. The bar gets the
    /// remaining width minus one separator per other column and its two frame
    /// characters. If one column or less is left, the bar is omitted.
    pub fn bar_text(&self, terminal_width: usize, others: &[&str]) -> String {
        let others_length: usize = others.iter().map(|o| o.chars().count()).sum();
        let padding_length = others.len() + 2;
        let bar_max_length = terminal_width
            .saturating_sub(others_length)
            .saturating_sub(padding_length);
        if bar_max_length <= 1 {
            return String::new();
        }

        let bar = match lock(&self.progress).ratio() {
            Some(ratio) => {
                let filled = ((bar_max_length as f64 * ratio) as usize).min(bar_max_length);
                let fill: String = std::iter::repeat(FILL).take(filled).collect();
                format!("[{:<bar_max_length$}]", fill)
            }
            None => String::new(),
        };

        let width = self
            .max_bar_length
            .unwrap_or_else(|| bar.chars().count())
            .min(bar_max_length + 2);
        if width < 1 {
            return String::new();
        }
        format!("{:<width$}", bar)
    }

    /// Full row text for a terminal of `terminal_width` columns, trimmed.
    pub fn line(&self, terminal_width: usize) -> String {
        let title = self.title_text();
        let progress = self.progress_text();
        let bar = self.bar_text(terminal_width, &[&title, &progress]);
        [title, bar, progress].join(" ").trim().to_string()
    }

    /// Redraws this row in place.
    ///
    /// The cursor must already sit on this bar's row. The line is cleared, the
    /// row written, then `end` (usually a newline) is appended if given, and
    /// the terminal flushed if `flush` is set.
    pub fn update<T>(&self, terminal: &mut T, end: Option<&str>, flush: bool) -> Result<()>
    where
        T: Terminal + ?Sized,
    {
        let line = self.line(terminal.width()?);
        terminal.clear_line()?;
        terminal.write_all(line.as_bytes())?;
        if let Some(end) = end {
            terminal.write_all(end.as_bytes())?;
        }
        if flush {
            terminal.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{BufferTerminal, Progress};

    fn bar(value: u64, total: Option<u64>, title: &str) -> ProgressBar {
        ProgressBar::new(Progress::new(value, total, Some("B")).shared(), title)
    }

    #[test]
    fn test_title_text_padding_and_clipping() {
        let mut pb = bar(0, Some(10), "abc");
        assert_eq!(pb.title_text(), "abc");
        pb.set_properties(Some(6), None);
        assert_eq!(pb.title_text(), "abc   ");
        pb.set_properties(Some(2), None);
        assert_eq!(pb.title_text(), "ab");
    }

    #[test]
    fn test_empty_title_has_no_column() {
        let pb = bar(0, Some(10), "");
        assert_eq!(pb.title_text(), "");
    }

    #[test]
    fn test_progress_text_right_aligned() {
        let mut pb = bar(3, Some(10), "t");
        pb.set_properties(None, Some(10));
        assert_eq!(pb.progress_text(), "    3/10 B");
    }

    #[test]
    fn test_bar_text_fills_remaining_width() {
        let pb = bar(5, Some(10), "t");
        // 20 - (1 + 7) - 4 = 8 cells inside the frame.
        let text = pb.bar_text(20, &["t", " 5/10 B"]);
        assert_eq!(text, "[====    ]");
        assert_eq!(pb.line(20).chars().count(), 20);
    }

    #[test]
    fn test_bar_text_narrow_terminal() {
        let pb = bar(5, Some(10), "title");
        assert_eq!(pb.bar_text(10, &["title", " 5/10 B"]), "");
        assert_eq!(pb.bar_text(0, &[]), "");
        assert_eq!(pb.bar_text(3, &[]), "");
    }

    #[test]
    fn test_bar_text_unknown_total() {
        let pb = bar(5, None, "t");
        assert_eq!(pb.bar_text(80, &["t", "5 B"]), "");
        assert_eq!(pb.line(80), "t  5 B");
    }

    #[test]
    fn test_max_bar_length_is_capped_by_terminal() {
        let pb = bar(5, Some(10), "t").with_max_bar_length(40);
        assert_eq!(pb.bar_text(20, &["t", " 5/10 B"]), "[====    ]");
        assert_eq!(pb.line(20), "t [====    ]  5/10 B");
        assert_eq!(pb.line(20).chars().count(), 20);
    }

    #[test]
    fn test_max_bar_length_keeps_column_without_total() {
        let pb = bar(5, None, "t").with_max_bar_length(6);
        assert_eq!(pb.bar_text(80, &["t", "5 B"]), "      ");
        assert_eq!(pb.line(80), "t        5 B");
        assert_eq!(pb.bar_text(8, &["t", "5 B"]), "");
    }

    #[test]
    fn test_update_writes_one_row() {
        let pb = bar(10, Some(10), "t");
        let mut terminal = BufferTerminal::new(14);
        pb.update(&mut terminal, Some("\n"), true).unwrap();
        assert_eq!(terminal.contents(), "\x1b[2K\rt [==] 10/10 B\n");
        assert_eq!(terminal.flushes(), 1);
    }
}
