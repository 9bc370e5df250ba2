//! rotalog Rotate - Rotating file writers
//!
//! Two independent rotation policies, each exposed as a plain [`std::io::Write`]:
//! - [`SizeRotatingWriter`] wraps a `logroller` size-based roller that keeps a
//!   bounded number of (optionally gzipped) backups.
//! - [`TimeRotatingWriter`] wraps a `tracing_appender` rolling appender that
//!   opens a new dated file every window, and keeps a symlink to the active file.
//!
//! Neither writer synchronizes itself; wrap them in a mutex when shared.

mod error;
mod rotation;
mod size;
mod time;

use std::path::{Path, PathBuf};

pub use error::{Result, RotateError};
pub use rotation::{SizeRotation, TimeRotation, TimeWindow, DEFAULT_MAX_SIZE_MB};
pub use size::SizeRotatingWriter;
pub use time::{TimeRotatingWriter, TimeRotatingWriterBuilder};

/// Split a log path into its directory and file name
pub(crate) fn split_path(path: &Path) -> Result<(PathBuf, String)> {
    if path.as_os_str().is_empty() {
        return Err(RotateError::EmptyFilename);
    }
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| RotateError::InvalidFilename(path.display().to_string()))?
        .to_string();
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((directory, file_name))
}
