//! Size-rotated log family

use logroller::{Compression, LogRollerBuilder, Rotation, RotationSize};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, RotateError};
use crate::rotation::SizeRotation;
use crate::split_path;

/// Writer that rolls its file over once it reaches a size limit.
///
/// Rolling, retention and compression are done by `logroller`; backups are
/// named by its size-based convention next to `path`.
pub struct SizeRotatingWriter {
    path: PathBuf,
    inner: Box<dyn Write + Send>,
}

impl SizeRotatingWriter {
    /// Open the family rooted at `path`, creating its directory if needed
    pub fn open(path: impl Into<PathBuf>, policy: &SizeRotation) -> Result<Self> {
        let path = path.into();
        let (directory, file_name) = split_path(&path)?;
        fs::create_dir_all(&directory)?;

        let directory_str = directory
            .to_str()
            .ok_or_else(|| RotateError::InvalidFilename(directory.display().to_string()))?;

        let mut builder = LogRollerBuilder::new(directory_str, file_name.as_str())
            .rotation(Rotation::SizeBased(RotationSize::MB(policy.max_size_mb)));
        if policy.max_backups > 0 {
            // A count the platform cannot express keeps everything
            if let Ok(keep) = policy.max_backups.try_into() {
                builder = builder.max_keep_files(keep);
            }
        }
        if policy.compress {
            builder = builder.compression(Compression::Gzip);
        }

        let roller = builder
            .build()
            .map_err(|e| RotateError::SizeWriter(e.to_string()))?;

        debug!(
            "Opened size-rotated log {} ({} MB, keep {}, compress {})",
            path.display(),
            policy.max_size_mb,
            policy.max_backups,
            policy.compress
        );

        Ok(Self {
            path,
            inner: Box::new(roller),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Write for SizeRotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl fmt::Debug for SizeRotatingWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeRotatingWriter")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
