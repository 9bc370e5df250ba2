//! Rotation policies

use std::path::PathBuf;
use std::time::Duration;
use tracing_appender::rolling::Rotation;

/// Size threshold used when none is given (100MB)
pub const DEFAULT_MAX_SIZE_MB: u64 = 100;

const HOUR: u64 = 60 * 60;
const DAY: u64 = 24 * HOUR;

/// Size-based rotation policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRotation {
    /// Rotate once the active file reaches this many megabytes
    pub max_size_mb: u64,
    /// Number of rotated files to keep; 0 keeps all of them
    pub max_backups: usize,
    /// Gzip files once they are rotated out
    pub compress: bool,
}

impl Default for SizeRotation {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            max_backups: 0,
            compress: false,
        }
    }
}

impl SizeRotation {
    pub fn new(max_size_mb: u64, max_backups: usize) -> Self {
        Self {
            max_size_mb: if max_size_mb == 0 {
                DEFAULT_MAX_SIZE_MB
            } else {
                max_size_mb
            },
            max_backups,
            ..Default::default()
        }
    }

    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Length of one time-rotated file.
///
/// Intervals shorter than a day roll hourly; anything else (including an
/// unset interval) rolls daily.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Hourly,
    Daily,
}

impl TimeWindow {
    pub fn from_interval(interval: Duration) -> Self {
        let secs = interval.as_secs();
        if secs > 0 && secs < DAY {
            TimeWindow::Hourly
        } else {
            TimeWindow::Daily
        }
    }

    pub(crate) fn rotation(self) -> Rotation {
        match self {
            TimeWindow::Hourly => Rotation::HOURLY,
            TimeWindow::Daily => Rotation::DAILY,
        }
    }

    /// Date suffix of the file covering a given UTC instant
    pub fn date_format(self) -> &'static str {
        match self {
            TimeWindow::Hourly => "%Y-%m-%d-%H",
            TimeWindow::Daily => "%Y-%m-%d",
        }
    }

    fn length(self) -> Duration {
        match self {
            TimeWindow::Hourly => Duration::from_secs(HOUR),
            TimeWindow::Daily => Duration::from_secs(DAY),
        }
    }
}

/// Time-based rotation policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRotation {
    /// Path kept as a symlink to the active file
    pub link_name: Option<PathBuf>,
    /// Keep files covering this much time; zero keeps all of them
    pub max_age: Duration,
    pub window: TimeWindow,
}

impl Default for TimeRotation {
    fn default() -> Self {
        Self {
            link_name: None,
            max_age: Duration::ZERO,
            window: TimeWindow::Daily,
        }
    }
}

impl TimeRotation {
    /// Number of files that cover `max_age`, or `None` to keep everything
    pub fn max_files(&self) -> Option<usize> {
        if self.max_age.is_zero() {
            return None;
        }
        let files = self.max_age.as_secs().div_ceil(self.window.length().as_secs());
        Some(usize::try_from(files.max(1)).unwrap_or(usize::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_rotation_zero_uses_default() {
        let config = SizeRotation::new(0, 3);
        assert_eq!(config.max_size_mb, DEFAULT_MAX_SIZE_MB);
        assert_eq!(config.max_backups, 3);
        assert!(SizeRotation::new(5, 0).with_compress(true).compress);
    }

    #[test]
    fn test_window_from_interval() {
        assert_eq!(TimeWindow::from_interval(Duration::ZERO), TimeWindow::Daily);
        assert_eq!(
            TimeWindow::from_interval(Duration::from_secs(HOUR)),
            TimeWindow::Hourly
        );
        assert_eq!(
            TimeWindow::from_interval(Duration::from_secs(6 * HOUR)),
            TimeWindow::Hourly
        );
        assert_eq!(
            TimeWindow::from_interval(Duration::from_secs(DAY)),
            TimeWindow::Daily
        );
        assert_eq!(
            TimeWindow::from_interval(Duration::from_secs(7 * DAY)),
            TimeWindow::Daily
        );
    }

    #[test]
    fn test_max_files_covers_max_age() {
        let daily = TimeRotation {
            max_age: Duration::from_secs(7 * DAY),
            ..Default::default()
        };
        assert_eq!(daily.max_files(), Some(7));

        let hourly = TimeRotation {
            max_age: Duration::from_secs(2 * DAY),
            window: TimeWindow::Hourly,
            ..Default::default()
        };
        assert_eq!(hourly.max_files(), Some(48));

        let partial = TimeRotation {
            max_age: Duration::from_secs(DAY + 1),
            ..Default::default()
        };
        assert_eq!(partial.max_files(), Some(2));

        assert_eq!(TimeRotation::default().max_files(), None);
    }
}
