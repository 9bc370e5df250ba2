//! Time-rotated log family
//!
//! Files are written by `tracing_appender`'s rolling appender as
//! `<name>.<date>` next to the configured path, one per UTC window. The
//! configured link path is kept as a symlink to the file of the current
//! window.

use chrono::Utc;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};
use tracing_appender::rolling::RollingFileAppender;

use crate::error::{Result, RotateError};
use crate::rotation::{TimeRotation, TimeWindow};
use crate::split_path;

/// Suffix of the temporary link renamed over the real one
const LINK_TMP_SUFFIX: &str = ".link-tmp";

/// Writer that switches files at fixed time intervals
pub struct TimeRotatingWriter {
    appender: RollingFileAppender,
    directory: PathBuf,
    prefix: String,
    config: TimeRotation,
    linked: Option<PathBuf>,
}

/// Builder for [`TimeRotatingWriter`]
pub struct TimeRotatingWriterBuilder {
    filename: PathBuf,
    config: TimeRotation,
}

impl TimeRotatingWriterBuilder {
    /// Keep `link` as a symlink to the active file
    pub fn link_name(mut self, link: impl Into<PathBuf>) -> Self {
        self.config.link_name = Some(link.into());
        self
    }

    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.config.max_age = max_age;
        self
    }

    /// Requested interval between files, mapped onto a [`TimeWindow`]
    pub fn rotation_time(mut self, rotation_time: Duration) -> Self {
        self.config.window = TimeWindow::from_interval(rotation_time);
        self
    }

    pub fn build(self) -> Result<TimeRotatingWriter> {
        TimeRotatingWriter::with_config(self.filename, self.config)
    }
}

impl TimeRotatingWriter {
    /// Start building a writer whose files are named after `filename`
    pub fn builder(filename: impl Into<PathBuf>) -> TimeRotatingWriterBuilder {
        TimeRotatingWriterBuilder {
            filename: filename.into(),
            config: TimeRotation::default(),
        }
    }

    pub fn with_config(filename: PathBuf, config: TimeRotation) -> Result<Self> {
        if config
            .link_name
            .as_ref()
            .is_some_and(|link| link.as_os_str().is_empty())
        {
            return Err(RotateError::EmptyFilename);
        }
        let (directory, prefix) = split_path(&filename)?;

        let mut builder = RollingFileAppender::builder()
            .rotation(config.window.rotation())
            .filename_prefix(prefix.clone());
        if let Some(max_files) = config.max_files() {
            builder = builder.max_log_files(max_files);
        }
        let appender = builder.build(&directory)?;

        let mut writer = Self {
            appender,
            directory,
            prefix,
            config,
            linked: None,
        };
        writer.refresh_link();
        Ok(writer)
    }

    /// File of the current UTC window
    pub fn current_path(&self) -> PathBuf {
        let date = Utc::now().format(self.config.window.date_format());
        self.directory.join(format!("{}.{}", self.prefix, date))
    }

    pub fn link_name(&self) -> Option<&Path> {
        self.config.link_name.as_deref()
    }

    fn refresh_link(&mut self) {
        let Some(link) = self.config.link_name.clone() else {
            return;
        };
        let current = self.current_path();
        if self.linked.as_ref() == Some(&current) || !current.exists() {
            return;
        }

        match replace_link(&link, &current) {
            Ok(()) => {
                debug!("Linked {} to {}", link.display(), current.display());
                self.linked = Some(current);
            }
            Err(e) => warn!("Failed to update log link {}: {}", link.display(), e),
        }
    }
}

#[cfg(unix)]
fn replace_link(link: &Path, target: &Path) -> io::Result<()> {
    let link_target = if link.parent() == target.parent() {
        target
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| target.to_path_buf())
    } else {
        target.to_path_buf()
    };

    let mut tmp = link.as_os_str().to_os_string();
    tmp.push(LINK_TMP_SUFFIX);
    let tmp = PathBuf::from(tmp);
    let _ = fs::remove_file(&tmp);

    std::os::unix::fs::symlink(&link_target, &tmp)?;
    fs::rename(&tmp, link)
}

#[cfg(not(unix))]
fn replace_link(link: &Path, _target: &Path) -> io::Result<()> {
    debug!("Log links are only maintained on unix platforms: {}", link.display());
    Ok(())
}

impl Write for TimeRotatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.appender.write(buf)?;
        self.refresh_link();
        Ok(written)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.appender.write_all(buf)?;
        self.refresh_link();
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.appender.flush()
    }
}

impl fmt::Debug for TimeRotatingWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeRotatingWriter")
            .field("directory", &self.directory)
            .field("prefix", &self.prefix)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
