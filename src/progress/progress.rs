//! Progress state of a single transfer.
//!
//! A [`Progress`] is pure state: a running value, an optional known total and
//! an optional unit label. It never performs I/O; rendering only produces the
//! text that a [`ProgressBar`](super::ProgressBar) places in its progress column.
//!
//! # Examples
//!
//! ```rust
//! use asyncdl::progress::Progress;
//!
//! let mut progress = Progress::new(0, Some(10), Some("B"));
//! progress.update(Some(3));
//! assert_eq!(progress.render(), " 3/10 B");
//!
//! // The value never runs past a known total.
//! progress.update(Some(100));
//! assert_eq!(progress.value(), 10);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Progress shared between the transfer that advances it and the bar that draws it.
pub type SharedProgress = Arc<Mutex<Progress>>;

/// Locks a [`SharedProgress`], recovering the state if a holder panicked.
pub(crate) fn lock(progress: &SharedProgress) -> MutexGuard<'_, Progress> {
    progress.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Value, total and unit of one transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    value: u64,
    total: Option<u64>,
    unit: Option<String>,
}

impl Progress {
    /// Creates a new [`Progress`].
    ///
    /// If a total is given, the starting value is clamped to it.
    pub fn new(value: u64, total: Option<u64>, unit: Option<&str>) -> Self {
        Self {
            value: total.map_or(value, |t| value.min(t)),
            total,
            unit: unit.map(String::from),
        }
    }

    /// Wraps the progress so it can be shared with a progress bar.
    pub fn shared(self) -> SharedProgress {
        Arc::new(Mutex::new(self))
    }

    /// Current value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Declared total, if known.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Unit label, if any.
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Advances the progress.
    ///
    /// Without a delta the value is ticked by one. With a delta the value is
    /// increased by it. Either way a known total caps the value; an unknown
    /// total leaves it unbounded.
    pub fn update(&mut self, delta: Option<u64>) {
        let next = self.value.saturating_add(delta.unwrap_or(1));
        self.value = match self.total {
            Some(total) => next.min(total),
            None => next,
        };
    }

    /// Sets the value explicitly, capped by a known total.
    pub fn reset(&mut self, value: u64) {
        self.value = self.total.map_or(value, |t| value.min(t));
    }

    /// Completed ratio in `[0, 1]`, or `None` when there is no usable total.
    pub fn ratio(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => Some(self.value as f64 / total as f64),
            _ => None,
        }
    }

    /// Renders the progress column text.
    ///
    /// - total and unit: `"<value>/<total> <unit>"`, value right-aligned to the
    ///   width of the total
    /// - total only: `"<pct> %"` with one decimal
    /// - unit only: `"<value> <unit>"`
    /// - neither: empty
    pub fn render(&self) -> String {
        match (self.total, self.unit.as_deref()) {
            (Some(total), Some(unit)) => {
                let width = total.to_string().len();
                format!("{:>width$}/{} {}", self.value, total, unit)
            }
            (Some(_), None) => {
                format!("{:.1} %", 100.0 * self.ratio().unwrap_or(0.0))
            }
            (None, Some(unit)) => format!("{} {}", self.value, unit),
            (None, None) => String::new(),
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_render_with_total_and_unit() {
        let progress = Progress::new(3, Some(10), Some("B"));
        assert_eq!(progress.render(), " 3/10 B");

        let progress = Progress::new(10, Some(10), Some("B"));
        assert_eq!(progress.render(), "10/10 B");
    }

    #[test]
    fn test_render_percentage() {
        assert_eq!(Progress::new(5, Some(10), None).render(), "50.0 %");
        assert_eq!(Progress::new(1, Some(3), None).render(), "33.3 %");
        assert_eq!(Progress::new(0, Some(0), None).render(), "0.0 %");
    }

    #[test]
    fn test_render_without_total() {
        assert_eq!(Progress::new(7, None, Some("B")).render(), "7 B");
        assert_eq!(Progress::new(7, None, None).render(), "");
    }

    #[test]
    fn test_update_without_delta_ticks() {
        let mut progress = Progress::new(0, None, None);
        progress.update(None);
        progress.update(None);
        assert_eq!(progress.value(), 2);
    }

    #[test]
    fn test_update_unknown_total_is_unbounded() {
        let mut progress = Progress::new(0, None, Some("B"));
        progress.update(Some(1_000));
        progress.update(Some(24));
        assert_eq!(progress.value(), 1_024);
        assert_eq!(progress.total(), None);
    }

    #[test]
    fn test_update_clamps_to_total() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let total = rng.random_range(0..500u64);
            let mut progress = Progress::new(0, Some(total), Some("B"));
            let mut previous = 0;
            for _ in 0..20 {
                if rng.random_bool(0.2) {
                    progress.update(None);
                } else {
                    progress.update(Some(rng.random_range(0..100)));
                }
                assert!(progress.value() <= total);
                assert!(progress.value() >= previous);
                previous = progress.value();
            }
        }
    }

    #[test]
    fn test_reset() {
        let mut progress = Progress::new(8, Some(10), None);
        progress.reset(2);
        assert_eq!(progress.value(), 2);
        progress.reset(42);
        assert_eq!(progress.value(), 10);
    }
}
